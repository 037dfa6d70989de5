//! The link-relay pipeline: cooldown gate, outbound URL construction,
//! fetch against the resolution API, and response normalization.

/// Reply rendering with HTML escaping
pub mod format;
/// Defensive JSON response normalization
pub mod parser;
/// Per-user cooldown gate
pub mod ratelimit;
/// Outbound request URL construction
pub mod resolver;

use crate::config::{COOLDOWN_SECONDS, HTTP_TIMEOUT_SECS};
use parser::DownloadItem;
use ratelimit::{Decision, RateLimiter};
use serde_json::Value;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

/// Failures a link submission can surface to the user.
///
/// None of these are fatal; the bot handler converts each variant into a
/// fixed reply string. Rate limiting is not represented here because the
/// gate reports it as a [`Decision`] before the pipeline runs.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Submitted text was empty or whitespace
    #[error("empty submission")]
    InvalidInput,
    /// Network failure, non-2xx status, or a body that is not JSON
    #[error(transparent)]
    Fetch(#[from] reqwest::Error),
    /// The fetch succeeded but no item passed validation
    #[error("no downloadable items")]
    NoItems,
}

/// Shared relay pipeline: one HTTP client plus the per-user gate.
pub struct Relay {
    http: reqwest::Client,
    limiter: RateLimiter,
}

impl Relay {
    /// Creates the relay with the fixed outbound timeout and cooldown.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new() -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            limiter: RateLimiter::new(Duration::from_secs(COOLDOWN_SECONDS)),
        })
    }

    /// Runs the cooldown gate for `user_id` against the current time.
    pub async fn gate(&self, user_id: i64) -> Decision {
        self.limiter.check(user_id, Instant::now()).await
    }

    /// Resolves a submitted share link into validated download items.
    ///
    /// The fetch uses a fixed deadline and is never retried. An empty vec is
    /// never returned: a response with no surviving items is
    /// [`RelayError::NoItems`].
    pub async fn resolve(&self, raw_link: &str) -> Result<Vec<DownloadItem>, RelayError> {
        let text = raw_link.trim();
        if text.is_empty() {
            return Err(RelayError::InvalidInput);
        }

        let api_url = resolver::build_request_url(text);
        let doc = self.fetch_document(&api_url).await?;
        let items = parser::parse(&doc);
        debug!(count = items.len(), "resolver response parsed");
        if items.is_empty() {
            return Err(RelayError::NoItems);
        }
        Ok(items)
    }

    /// Fetches `api_url` and decodes the JSON body.
    pub async fn fetch_document(&self, api_url: &str) -> Result<Value, RelayError> {
        let response = self.http.get(api_url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_blank_submission_is_invalid_input() {
        let relay = Relay::new().expect("client");
        assert!(matches!(
            relay.resolve("   ").await,
            Err(RelayError::InvalidInput)
        ));
        assert!(matches!(
            relay.resolve("").await,
            Err(RelayError::InvalidInput)
        ));
    }
}
