use std::error::Error as StdError;
use std::io;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{de, Deserialize};
use serde_json::Value;

use crate::config::ApiSettings;
use crate::summary::provider::ShortageSource;
use crate::summary::types::{
    QueryOutcome, ShortageRecord, TrackedKey, UNKNOWN_DATE, UNKNOWN_NAME, UNKNOWN_STATUS,
};

/// Client for the drug-shortage API's `latest.json` endpoint.
#[derive(Clone)]
pub struct ShortageClient {
    base_url: String,
    api_key: String,
    http: Client,
}

/// Body of `drugShortages/{key}/latest.json`. Every field is optional and
/// may hold any JSON scalar.
#[derive(Debug, Deserialize)]
struct LatestShortage {
    #[serde(rename = "searchString")]
    search_string: Option<Value>,

    #[serde(rename = "shortageCreateDate")]
    create_date: Option<Value>,

    #[serde(rename = "shortageStatus")]
    status: Option<Value>,
}

/// Strings are used as-is, other values in their JSON form; absent or
/// `null` fields get the sentinel.
fn field_text(value: Option<Value>, sentinel: &str) -> String {
    match value {
        None | Some(Value::Null) => sentinel.to_string(),
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
    }
}

impl From<LatestShortage> for ShortageRecord {
    fn from(body: LatestShortage) -> Self {
        ShortageRecord {
            name: field_text(body.search_string, UNKNOWN_NAME),
            created: field_text(body.create_date, UNKNOWN_DATE),
            status: field_text(body.status, UNKNOWN_STATUS),
        }
    }
}

impl ShortageClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            http: Client::new(),
        }
    }

    pub fn from_settings(api: &ApiSettings) -> Self {
        Self::new(api.base_url.clone(), api.api_key.clone())
    }

    /// `base_url` is used as a prefix verbatim and should end with `/`.
    /// The `auth` parameter is added separately, so this URL is safe to log.
    fn latest_url(&self, key: TrackedKey) -> String {
        format!("{}drugShortages/{}/latest.json", self.base_url, key)
    }

    pub async fn fetch_latest(&self, key: TrackedKey) -> QueryOutcome {
        let url = self.latest_url(key);

        let response = match self
            .http
            .get(&url)
            .query(&[("auth", self.api_key.as_str())])
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => return transport_failure(key, &url, err),
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => return transport_failure(key, &url, err),
        };

        if status != StatusCode::OK {
            tracing::error!("Error querying key {}: {} - {}", key, status.as_u16(), body);
            return QueryOutcome::HttpError {
                status: status.as_u16(),
                body,
            };
        }

        match parse_latest(&body) {
            Ok(Some(record)) => {
                tracing::info!("Successfully queried drug shortage for key {}", key);
                QueryOutcome::Success(record)
            }
            Ok(None) => {
                tracing::warn!("No data found for key {}", key);
                QueryOutcome::NotFound
            }
            Err(err) => {
                tracing::error!("Exception querying key {} ({}): {}", key, url, err);
                QueryOutcome::TransportException(err.to_string())
            }
        }
    }
}

fn transport_failure(key: TrackedKey, url: &str, err: reqwest::Error) -> QueryOutcome {
    let message = transport_message(err);
    tracing::error!("Exception querying key {} ({}): {}", key, url, message);
    QueryOutcome::TransportException(message)
}

/// Root cause of a request failure, without the request URL (which carries
/// the API key). OS error codes are dropped from I/O errors.
fn transport_message(err: reqwest::Error) -> String {
    let err = err.without_url();
    let mut cause: &(dyn StdError + 'static) = &err;
    while let Some(next) = cause.source() {
        cause = next;
    }

    if let Some(io_err) = cause.downcast_ref::<io::Error>() {
        let text = io_err.to_string();
        if let Some(code) = io_err.raw_os_error() {
            let suffix = format!(" (os error {})", code);
            if let Some(stripped) = text.strip_suffix(&suffix) {
                return stripped.to_string();
            }
        }
        return text;
    }
    cause.to_string()
}

/// Parse a 200 response body. Blank, `null` and `{}` bodies mean there is
/// no record for the key; anything else must be a JSON object.
fn parse_latest(body: &str) -> Result<Option<ShortageRecord>, serde_json::Error> {
    if body.trim().is_empty() {
        return Ok(None);
    }

    match serde_json::from_str::<Option<Value>>(body)? {
        None => Ok(None),
        Some(Value::Object(map)) if map.is_empty() => Ok(None),
        Some(value @ Value::Object(_)) => {
            let latest: LatestShortage = serde_json::from_value(value)?;
            Ok(Some(latest.into()))
        }
        Some(_) => Err(de::Error::custom("expected a JSON object")),
    }
}

#[async_trait]
impl ShortageSource for ShortageClient {
    async fn query(&self, key: TrackedKey) -> QueryOutcome {
        self.fetch_latest(key).await
    }

    fn source_name(&self) -> &str {
        "drug-shortage-api"
    }
}
