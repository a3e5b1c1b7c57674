//! NASA NeoWs feed client.
//!
//! One blocking GET against the feed endpoint per run, parameterized by the
//! configured date range and API key. The API reports client errors in-band
//! (a JSON body with `code` / `http_error` / `error_message` fields) rather
//! than solely through the transport status, so the body is inspected before
//! the feed payload is deserialized. Any reported error aborts the run with
//! a typed fetch error; the pipeline never continues without a dataset.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::info;

use crate::config::Config;
use crate::data::dataset::{Dataset, NeoRow};
use crate::error::AppError;

const FEED_URL: &str = "https://api.nasa.gov/neo/rest/v1/feed";

/// Deadline for the single feed request. Expiry surfaces as a distinct
/// timeout error instead of hanging the run indefinitely.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Object record as it appears inside a date bucket. Only the fields the
/// pipeline consumes are kept; the feed carries many more.
#[derive(Debug, Clone, Deserialize)]
struct FeedRecord {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    absolute_magnitude_h: Option<f64>,
    #[serde(default)]
    is_potentially_hazardous_asteroid: Option<bool>,
}

/// In-band error body returned with client errors (e.g. a bad date range).
#[derive(Debug, Clone, Deserialize)]
struct FeedErrorBody {
    code: i64,
    #[serde(default)]
    http_error: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
}

pub struct NeowsClient {
    client: Client,
    feed_url: String,
}

impl NeowsClient {
    pub fn new() -> Result<Self, AppError> {
        Self::with_feed_url(FEED_URL)
    }

    /// Point the client at a non-default endpoint (tests, mirrors).
    pub fn with_feed_url(feed_url: impl Into<String>) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::fetch(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            feed_url: feed_url.into(),
        })
    }

    /// Fetch the configured date range and flatten it into a [`Dataset`].
    ///
    /// Exactly one outbound request. Requires `start_date`, `end_date`, and
    /// `api_key` in the merged config; the dates are validated before the
    /// network call is spent.
    pub fn fetch_feed(&self, config: &Config) -> Result<Dataset, AppError> {
        let start_date = parse_config_date(config, "start_date")?;
        let end_date = parse_config_date(config, "end_date")?;
        if start_date > end_date {
            return Err(AppError::config(format!(
                "start_date {start_date} is after end_date {end_date}"
            )));
        }
        let api_key = config.get_str("api_key")?;

        info!(%start_date, %end_date, "fetching NeoWs feed");
        let response = self
            .client
            .get(&self.feed_url)
            .query(&[
                ("start_date", start_date.format(DATE_FORMAT).to_string()),
                ("end_date", end_date.format(DATE_FORMAT).to_string()),
                ("api_key", api_key.to_string()),
            ])
            .send()
            .map_err(request_error)?;

        let status = response.status();
        let body: serde_json::Value = response.json().map_err(request_error)?;

        if let Some(err) = api_reported_error(&body) {
            return Err(err);
        }
        if !status.is_success() {
            return Err(AppError::fetch(format!(
                "Feed request failed with status {status}."
            )));
        }

        let dataset = flatten_feed(&body)?;
        info!(
            rows = dataset.len(),
            "feed data from {start_date} to {end_date} loaded"
        );
        Ok(dataset)
    }
}

fn parse_config_date(config: &Config, key: &str) -> Result<NaiveDate, AppError> {
    let raw = config.get_str(key)?;
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| AppError::config(format!("Config key '{key}' ('{raw}') is not a date: {e}")))
}

fn request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::timeout(format!("Feed request timed out: {err}"))
    } else {
        AppError::fetch(format!("Feed request failed: {err}"))
    }
}

/// Detect the API's in-band client-error body.
///
/// Returns the embedded message as a fetch error so the run aborts instead
/// of proceeding with no dataset.
fn api_reported_error(body: &serde_json::Value) -> Option<AppError> {
    if body.get("near_earth_objects").is_some() {
        return None;
    }
    let err: FeedErrorBody = serde_json::from_value(body.clone()).ok()?;
    let http_error = err.http_error.as_deref().unwrap_or("client error");
    let message = err.error_message.as_deref().unwrap_or("no detail provided");
    Some(AppError::fetch(format!(
        "Feed API reported error {}: {http_error}: {message}",
        err.code
    )))
}

/// Flatten the `near_earth_objects` date buckets into one [`Dataset`],
/// preserving the response's date-then-object order.
fn flatten_feed(body: &serde_json::Value) -> Result<Dataset, AppError> {
    let by_date = body
        .get("near_earth_objects")
        .and_then(|v| v.as_object())
        .ok_or_else(|| {
            AppError::fetch("Feed response has no 'near_earth_objects' mapping".to_string())
        })?;

    let mut buckets = Vec::with_capacity(by_date.len());
    for (date_key, records) in by_date {
        let observed = NaiveDate::parse_from_str(date_key, DATE_FORMAT).map_err(|e| {
            AppError::fetch(format!("Feed bucket key '{date_key}' is not a date: {e}"))
        })?;
        let records = records.as_array().ok_or_else(|| {
            AppError::fetch(format!("Feed bucket '{date_key}' is not an array"))
        })?;

        let mut rows = Vec::with_capacity(records.len());
        for record in records {
            let record: FeedRecord = serde_json::from_value(record.clone()).map_err(|e| {
                AppError::fetch(format!("Malformed object record under '{date_key}': {e}"))
            })?;
            rows.push(NeoRow {
                observed,
                id: record.id,
                name: record.name,
                absolute_magnitude_h: record.absolute_magnitude_h,
                hazardous: record.is_potentially_hazardous_asteroid,
            });
        }
        buckets.push((observed, rows));
    }

    Ok(Dataset::from_buckets(buckets))
}
