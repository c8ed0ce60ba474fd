use std::fmt;
use std::path::Path;

use ini::{Ini, ParseOption, Properties};

use crate::error::AppError;

/// Settings for one run, loaded once from the INI file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub email: EmailSettings,
    pub api: ApiSettings,
}

/// `[email]` section.
#[derive(Clone)]
pub struct EmailSettings {
    pub smtp_server: String,
    pub smtp_port: u16,
    pub sender_email: String,
    pub sender_password: String,
    pub subject: String,
}

/// `[api]` section.
#[derive(Clone)]
pub struct ApiSettings {
    pub api_key: String,
    pub base_url: String,
}

impl fmt::Debug for EmailSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailSettings")
            .field("smtp_server", &self.smtp_server)
            .field("smtp_port", &self.smtp_port)
            .field("sender_email", &self.sender_email)
            .field("sender_password", &"<redacted>")
            .field("subject", &self.subject)
            .finish()
    }
}

impl fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiSettings")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

// Values are taken literally: passwords and keys may contain quotes or
// backslashes. Option names match case-insensitively (crate feature).
fn parse_option() -> ParseOption {
    ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    }
}

impl Settings {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let source_name = path.display().to_string();

        let ini = Ini::load_from_file_opt(path, parse_option()).map_err(|err| {
            AppError::ConfigRead {
                path: source_name.clone(),
                message: err.to_string(),
            }
        })?;

        tracing::info!("Successfully read {}", source_name);
        Self::from_ini(&ini, &source_name)
    }

    pub fn from_ini_str(text: &str, source_name: &str) -> Result<Self, AppError> {
        let ini = Ini::load_from_str_opt(text, parse_option()).map_err(|err| {
            AppError::ConfigRead {
                path: source_name.to_string(),
                message: err.to_string(),
            }
        })?;
        Self::from_ini(&ini, source_name)
    }

    fn from_ini(ini: &Ini, source_name: &str) -> Result<Self, AppError> {
        let email = Section::new(ini, "email", source_name);
        let api = Section::new(ini, "api", source_name);

        let smtp_port = {
            let raw = email.require("smtp_port")?;
            raw.trim()
                .parse::<u16>()
                .map_err(|err| email.invalid("smtp_port", raw, err.to_string()))?
        };

        let settings = Self {
            email: EmailSettings {
                smtp_server: email.require("smtp_server")?.to_string(),
                smtp_port,
                sender_email: email.require("sender_email")?.to_string(),
                sender_password: email.require("sender_password")?.to_string(),
                subject: email.require("subject")?.to_string(),
            },
            api: ApiSettings {
                api_key: api.require("api_key")?.to_string(),
                base_url: api.require("base_url")?.to_string(),
            },
        };

        tracing::info!("Email and API configuration loaded successfully");
        Ok(settings)
    }
}

/// One named section of the file, possibly absent.
struct Section<'a> {
    name: &'static str,
    source_name: &'a str,
    properties: Option<&'a Properties>,
}

impl<'a> Section<'a> {
    fn new(ini: &'a Ini, name: &'static str, source_name: &'a str) -> Self {
        Self {
            name,
            source_name,
            properties: ini.section(Some(name)),
        }
    }

    fn require(&self, key: &str) -> Result<&'a str, AppError> {
        self.properties
            .and_then(|props| props.get(key))
            .ok_or_else(|| AppError::MissingKey {
                source_name: self.source_name.to_string(),
                section: self.name.to_string(),
                key: key.to_string(),
            })
    }

    fn invalid(&self, key: &str, value: &str, reason: String) -> AppError {
        AppError::InvalidValue {
            source_name: self.source_name.to_string(),
            section: self.name.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_CONFIG: &str = "\
[email]
smtp_server = smtp.example.com
smtp_port = 587
sender_email = alerts@example.com
sender_password = p\\ss\"word
subject = Weekly Drug Shortages

[api]
api_key = secret-key
base_url = https://api.example.com/v1/
";

    #[test]
    fn loads_every_required_key() {
        let settings = Settings::from_ini_str(FULL_CONFIG, "config.ini").unwrap();

        assert_eq!(settings.email.smtp_server, "smtp.example.com");
        assert_eq!(settings.email.smtp_port, 587);
        assert_eq!(settings.email.sender_email, "alerts@example.com");
        assert_eq!(settings.email.subject, "Weekly Drug Shortages");
        assert_eq!(settings.api.api_key, "secret-key");
        assert_eq!(settings.api.base_url, "https://api.example.com/v1/");
    }

    #[test]
    fn password_is_taken_literally() {
        let settings = Settings::from_ini_str(FULL_CONFIG, "config.ini").unwrap();
        assert_eq!(settings.email.sender_password, "p\\ss\"word");
    }

    #[test]
    fn missing_key_names_section_and_key() {
        let text = FULL_CONFIG.replace("api_key = secret-key\n", "");
        let err = Settings::from_ini_str(&text, "config.ini").unwrap_err();

        match err {
            AppError::MissingKey { section, key, .. } => {
                assert_eq!(section, "api");
                assert_eq!(key, "api_key");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn option_names_are_case_insensitive() {
        let text = FULL_CONFIG
            .replace("smtp_server", "SMTP_Server")
            .replace("api_key", "API_KEY");

        let settings = Settings::from_ini_str(&text, "config.ini").unwrap();

        assert_eq!(settings.email.smtp_server, "smtp.example.com");
        assert_eq!(settings.api.api_key, "secret-key");
    }

    #[test]
    fn missing_section_is_reported_as_missing_key() {
        let text = "[api]\napi_key = k\nbase_url = https://x/\n";
        let err = Settings::from_ini_str(text, "config.ini").unwrap_err();
        assert!(matches!(err, AppError::MissingKey { ref section, .. } if section == "email"));
    }

    #[test]
    fn non_numeric_port_is_invalid() {
        let text = FULL_CONFIG.replace("smtp_port = 587", "smtp_port = submission");
        let err = Settings::from_ini_str(&text, "config.ini").unwrap_err();
        assert!(matches!(err, AppError::InvalidValue { ref key, .. } if key == "smtp_port"));
    }

    #[test]
    fn unreadable_file_is_a_read_error() {
        let err = Settings::from_file("/definitely/not/here/config.ini").unwrap_err();
        assert!(matches!(err, AppError::ConfigRead { .. }));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let settings = Settings::from_ini_str(FULL_CONFIG, "config.ini").unwrap();
        let rendered = format!("{:?}", settings);

        assert!(!rendered.contains("secret-key"));
        assert!(!rendered.contains("p\\ss"));
        assert!(!rendered.contains("p\\\\ss"));
        assert!(rendered.contains("<redacted>"));
        assert!(rendered.contains("smtp.example.com"));
    }
}
