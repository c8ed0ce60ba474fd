//! One run of the weekly check.
//!
//! Looks up every tracked key, logs the rendered summary and emails it.
//! Nothing here returns an error: lookup and delivery problems are logged
//! and the run is still considered complete.

use lettre::AsyncTransport;

use crate::alerts::email::{Delivery, EmailNotifier};
use crate::config::Settings;
use crate::services::shortages::ShortageClient;
use crate::summary::{generate_summary, ShortageSource, TrackedKey};

/// Run the check against the configured API and SMTP relay.
pub async fn run(settings: &Settings, keys: &[TrackedKey], recipients: &[String]) -> Delivery {
    let client = ShortageClient::from_settings(&settings.api);

    match EmailNotifier::from_settings(&settings.email) {
        Ok(notifier) => run_with(&client, &notifier, keys, recipients).await,
        Err(err) => {
            // Still produce and log the summary before giving up on email.
            run_summary(&client, keys).await;
            tracing::error!("Error sending email: {}", err);
            Delivery::Failed(err.to_string())
        }
    }
}

/// Execute a single run with the given source and notifier. Extracted for
/// testability.
pub async fn run_with<S, T>(
    source: &S,
    notifier: &EmailNotifier<T>,
    keys: &[TrackedKey],
    recipients: &[String],
) -> Delivery
where
    S: ShortageSource + Sync + ?Sized,
    T: AsyncTransport + Send + Sync,
    T::Error: std::fmt::Display,
{
    let report = run_summary(source, keys).await;
    notifier.send(&report, recipients).await
}

async fn run_summary<S>(source: &S, keys: &[TrackedKey]) -> String
where
    S: ShortageSource + Sync + ?Sized,
{
    tracing::info!(
        "Querying {} tracked keys from {}",
        keys.len(),
        source.source_name()
    );
    let report = generate_summary(source, keys).await.to_string();
    tracing::info!("Summary:\n{}", report);
    report
}
