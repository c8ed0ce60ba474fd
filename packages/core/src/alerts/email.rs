//! Email delivery of the weekly summary.
//!
//! One plain-text message goes to every recipient in a single send. The
//! transport is built without a connection pool, so each send opens its own
//! SMTP session, upgrades it with STARTTLS, authenticates and closes it
//! again whether or not delivery succeeded.

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::EmailSettings;
use crate::error::AppError;

/// What happened to one notification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// No recipients were configured; nothing was sent.
    Skipped,
    Sent { recipients: usize },
    Failed(String),
}

#[derive(Debug)]
pub struct EmailNotifier<T> {
    transport: T,
    sender: String,
    subject: String,
}

impl EmailNotifier<AsyncSmtpTransport<Tokio1Executor>> {
    /// STARTTLS transport for the configured relay. No connection is made
    /// until [`EmailNotifier::send`].
    pub fn from_settings(settings: &EmailSettings) -> Result<Self, AppError> {
        let transport =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.smtp_server)
                .map_err(|err| AppError::mail(format!("invalid SMTP relay: {}", err)))?
                .port(settings.smtp_port)
                .credentials(Credentials::new(
                    settings.sender_email.clone(),
                    settings.sender_password.clone(),
                ))
                .build();

        Ok(Self::new(
            transport,
            settings.sender_email.clone(),
            settings.subject.clone(),
        ))
    }
}

impl<T> EmailNotifier<T>
where
    T: AsyncTransport + Send + Sync,
    T::Error: std::fmt::Display,
{
    pub fn new(transport: T, sender: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            transport,
            sender: sender.into(),
            subject: subject.into(),
        }
    }

    /// Send `report` to all `recipients`. Failures are logged and returned,
    /// never propagated.
    pub async fn send(&self, report: &str, recipients: &[String]) -> Delivery {
        if recipients.is_empty() {
            tracing::error!("No recipients specified, skipping email");
            return Delivery::Skipped;
        }

        let result = match self.build_message(report, recipients) {
            Ok(message) => self
                .transport
                .send(message)
                .await
                .map(|_| ())
                .map_err(|err| AppError::mail(err.to_string())),
            Err(err) => Err(err),
        };

        match result {
            Ok(()) => {
                tracing::info!("Email sent successfully to {} recipients", recipients.len());
                Delivery::Sent {
                    recipients: recipients.len(),
                }
            }
            Err(err) => {
                tracing::error!("Error sending email: {}", err);
                Delivery::Failed(err.to_string())
            }
        }
    }

    fn build_message(&self, report: &str, recipients: &[String]) -> Result<Message, AppError> {
        let from = parse_mailbox(&self.sender)?;
        let mut builder = Message::builder().from(from).subject(self.subject.as_str());
        for recipient in recipients {
            builder = builder.to(parse_mailbox(recipient)?);
        }

        builder
            .header(ContentType::TEXT_PLAIN)
            .body(report.to_string())
            .map_err(|err| AppError::mail(format!("failed to build message: {}", err)))
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, AppError> {
    address
        .parse::<Mailbox>()
        .map_err(|err| AppError::mail(format!("invalid address {:?}: {}", address, err)))
}
