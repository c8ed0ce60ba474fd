use thiserror::Error;

/// Unified application error.
///
/// Only configuration problems reach `main` as errors; lookup and delivery
/// failures are reported through [`QueryOutcome`](crate::summary::QueryOutcome)
/// and [`Delivery`](crate::alerts::email::Delivery) instead.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read {path}: {message}")]
    ConfigRead { path: String, message: String },

    #[error("Missing configuration in {source_name}: [{section}] {key}")]
    MissingKey {
        source_name: String,
        section: String,
        key: String,
    },

    #[error("Invalid configuration in {source_name}: [{section}] {key} = {value:?} ({reason})")]
    InvalidValue {
        source_name: String,
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    #[error("Mail error: {0}")]
    Mail(String),
}

impl AppError {
    pub fn mail(message: impl Into<String>) -> Self {
        Self::Mail(message.into())
    }
}
