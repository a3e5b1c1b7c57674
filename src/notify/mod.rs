//! Completion notifications through the ntfy.sh push service.
//!
//! One POST of the raw UTF-8 message to a topic-addressed URL. No
//! authentication, no retry, and the response body is not validated; the
//! only failure that matters is the message not going out at all.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::info;

use crate::config::Config;
use crate::error::AppError;

const NTFY_BASE_URL: &str = "https://ntfy.sh";

/// Deadline for the webhook POST, same policy as the feed fetch.
pub const NOTIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the topic-addressed webhook URL.
pub fn topic_url(base_url: &str, topic: &str) -> String {
    format!("{}/{topic}", base_url.trim_end_matches('/'))
}

/// Send `message` to the topic configured under `nfty-topic`.
pub fn notify_done(config: &Config, message: &str) -> Result<(), AppError> {
    notify_with_base(NTFY_BASE_URL, config, message)
}

/// Same as [`notify_done`] against a non-default service (tests, self-hosted
/// ntfy instances).
pub fn notify_with_base(base_url: &str, config: &Config, message: &str) -> Result<(), AppError> {
    let topic = config.get_str("nfty-topic")?;
    let url = topic_url(base_url, topic);

    let client = Client::builder()
        .timeout(NOTIFY_TIMEOUT)
        .build()
        .map_err(|e| AppError::notify(format!("Failed to build HTTP client: {e}")))?;

    client
        .post(&url)
        .body(message.as_bytes().to_vec())
        .send()
        .map_err(|e| {
            if e.is_timeout() {
                AppError::timeout(format!("Notification POST timed out: {e}"))
            } else {
                AppError::notify(format!("Notification POST failed: {e}"))
            }
        })?;

    info!(topic, "notification sent");
    Ok(())
}
