use crate::summary::provider::ShortageSource;
use crate::summary::types::{QueryOutcome, Section, SummaryReport, TrackedKey};

/// Query every key once, in order, and build the report.
///
/// A failed lookup only affects its own entry; the loop always runs to the
/// end of `keys`.
pub async fn generate_summary<S>(source: &S, keys: &[TrackedKey]) -> SummaryReport
where
    S: ShortageSource + Sync + ?Sized,
{
    let mut report = SummaryReport::default();

    for &key in keys {
        let outcome = source.query(key).await;
        let (section, entry) = classify(key, &outcome);
        report.push(section, entry);
    }

    tracing::info!("Generated summary successfully");
    report
}

/// Map one outcome to its report section and line.
pub fn classify(key: TrackedKey, outcome: &QueryOutcome) -> (Section, String) {
    match outcome {
        QueryOutcome::Success(record) if record.is_resolved() => {
            (Section::Resolved, record.entry(key))
        }
        QueryOutcome::Success(record) => (Section::Active, record.entry(key)),
        failure => {
            let description = failure.failure_description().unwrap_or_default();
            (Section::Active, format!("Key {}: {}", key, description))
        }
    }
}
