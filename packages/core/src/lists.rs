//! Tracked-key and recipient list files.
//!
//! Both loaders are lenient: unusable lines are dropped and only counted,
//! and a file that cannot be read yields an empty list so the run goes on.

use std::fs;
use std::io;
use std::path::Path;

use crate::summary::types::TrackedKey;

/// Entries kept from a list file plus the number of lines dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedList<T> {
    pub entries: Vec<T>,
    pub skipped: usize,
}

impl<T> ParsedList<T> {
    fn from_lines<'a, F>(text: &'a str, mut parse: F) -> Self
    where
        F: FnMut(&'a str) -> Option<T>,
    {
        let mut entries = Vec::new();
        let mut skipped = 0;
        for line in text.lines() {
            match parse(line) {
                Some(entry) => entries.push(entry),
                None => skipped += 1,
            }
        }
        Self { entries, skipped }
    }
}

/// A key line is, once trimmed, a run of ASCII digits that fits a `u64`.
pub fn parse_tracked_keys(text: &str) -> ParsedList<TrackedKey> {
    ParsedList::from_lines(text, |line| {
        let line = line.trim();
        if line.is_empty() || !line.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        line.parse().ok()
    })
}

/// A recipient line is any line containing `@`, trimmed.
pub fn parse_recipients(text: &str) -> ParsedList<String> {
    ParsedList::from_lines(text, |line| {
        line.contains('@').then(|| line.trim().to_string())
    })
}

pub fn read_tracked_keys(path: impl AsRef<Path>) -> Vec<TrackedKey> {
    read_list(path.as_ref(), "drug keys", parse_tracked_keys)
}

pub fn read_recipients(path: impl AsRef<Path>) -> Vec<String> {
    read_list(path.as_ref(), "recipients", parse_recipients)
}

fn read_list<T>(path: &Path, what: &str, parse: fn(&str) -> ParsedList<T>) -> Vec<T> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::error!("{} file not found: {}", capitalize(what), path.display());
            return Vec::new();
        }
        Err(err) => {
            tracing::error!("Error reading {} from {}: {}", what, path.display(), err);
            return Vec::new();
        }
    };

    let parsed = parse(&text);
    tracing::info!(
        "Read {} {} from {} ({} lines skipped)",
        parsed.entries.len(),
        what,
        path.display(),
        parsed.skipped
    );
    parsed.entries
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn keys_skip_blank_and_non_numeric_lines() {
        let parsed = parse_tracked_keys("101\n\n  202  \nabc\n-5\n+7\n3.5\n0\n");

        assert_eq!(parsed.entries, vec![101, 202, 0]);
        assert_eq!(parsed.skipped, 5);
    }

    #[test]
    fn keys_keep_file_order_and_duplicates() {
        let parsed = parse_tracked_keys("3\n1\n3\n");
        assert_eq!(parsed.entries, vec![3, 1, 3]);
    }

    #[test]
    fn key_too_large_for_u64_is_skipped() {
        let parsed = parse_tracked_keys("99999999999999999999999\n12\n");

        assert_eq!(parsed.entries, vec![12]);
        assert_eq!(parsed.skipped, 1);
    }

    #[test]
    fn recipients_require_an_at_sign() {
        let parsed = parse_recipients(" alice@example.com \nnot-an-address\n\nbob@example.org");

        assert_eq!(parsed.entries, vec!["alice@example.com", "bob@example.org"]);
        assert_eq!(parsed.skipped, 2);
    }

    #[test]
    fn reads_keys_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "101").unwrap();
        writeln!(file, "oops").unwrap();
        writeln!(file, "202").unwrap();

        assert_eq!(read_tracked_keys(file.path()), vec![101, 202]);
    }

    #[test]
    fn reads_recipients_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "pharmacy@example.com").unwrap();

        assert_eq!(read_recipients(file.path()), vec!["pharmacy@example.com"]);
    }

    #[test]
    fn missing_file_yields_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("drugs.txt");

        assert!(read_tracked_keys(&missing).is_empty());
        assert!(read_recipients(&missing).is_empty());
    }

    #[test]
    fn directory_path_yields_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_tracked_keys(dir.path()).is_empty());
    }
}
