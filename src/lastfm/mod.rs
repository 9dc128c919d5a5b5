//! # Last.fm Integration Module
//!
//! This module is the primary integration layer between collagefm and the
//! Last.fm web service. It handles all HTTP communication with the
//! audioscrobbler API, translates the wire format into domain types, and
//! shields the rest of the application from the API's quirks.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI, Pipeline)
//!          ↓
//! Last.fm Integration Layer
//!     ├── Chart Retrieval (top albums, artists, tracks)
//!     ├── Profile Data (user info, recent tracks, taste comparison)
//!     └── Secondary Art Lookups (album/artist/track cover art)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Last.fm API (ws.audioscrobbler.com)
//! ```
//!
//! ## Request Handling
//!
//! Every request goes through a single helper that appends the API key and
//! the JSON format flag, retries transient failures, and inspects the
//! response body for the Last.fm error envelope before deserializing.
//!
//! ### Retry Policy
//!
//! - Up to three attempts per request
//! - Linear backoff between attempts (1s, then 2s)
//! - Only transport failures and HTTP status errors are retried
//! - A well-formed error envelope (`{"error": .., "message": ..}`) is a
//!   definitive answer from the service and is never retried
//!
//! ## Wire Format Quirks
//!
//! The audioscrobbler JSON rendering carries several XML-era artifacts that
//! the translation layer absorbs:
//! - Numeric fields (playcounts, ranks, timestamps) arrive as strings
//! - Image URLs live under the `#text` key
//! - Ranks live under a nested `@attr` object
//! - Recent-track artist names are `#text` values, not objects

pub mod images;
pub mod user;

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::sleep;

use crate::{config, error::ApiError};

const MAX_ATTEMPTS: u32 = 3;

/// Detects the Last.fm error envelope (`{"error": .., "message": ..}`) in
/// a decoded response body. The envelope is a definitive answer from the
/// service, whatever the HTTP status said.
pub fn error_envelope(value: &Value) -> Option<ApiError> {
    let code = value.get("error").and_then(Value::as_i64)?;
    let message = value
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("unknown error")
        .to_string();
    Some(ApiError::Remote { code, message })
}

/// Performs one Last.fm API call with retry and envelope handling.
///
/// Transport failures and HTTP status errors are retried with linear
/// backoff. An error envelope in the body is returned as
/// [`ApiError::Remote`] without retrying, whatever the HTTP status was.
pub(crate) async fn request<T: DeserializeOwned>(
    client: &Client,
    method: &str,
    params: &[(&str, &str)],
) -> Result<T, ApiError> {
    let api_url = config::lastfm_api_url();
    let api_key = config::lastfm_api_key();

    let mut attempt = 1;
    loop {
        let mut query: Vec<(&str, &str)> = vec![
            ("method", method),
            ("api_key", api_key.as_str()),
            ("format", "json"),
        ];
        query.extend_from_slice(params);

        let result = client.get(&api_url).query(&query).send().await;

        let response = match result {
            Ok(resp) => resp,
            Err(err) => {
                if attempt >= MAX_ATTEMPTS {
                    return Err(ApiError::Transport {
                        attempts: attempt,
                        source: err,
                    });
                }
                sleep(Duration::from_secs(attempt as u64)).await;
                attempt += 1;
                continue;
            }
        };

        let status_err = response.error_for_status_ref().err();
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                if attempt >= MAX_ATTEMPTS {
                    return Err(ApiError::Transport {
                        attempts: attempt,
                        source: err,
                    });
                }
                sleep(Duration::from_secs(attempt as u64)).await;
                attempt += 1;
                continue;
            }
        };

        // The service reports its own failures through a JSON envelope,
        // sometimes with a 200 status. That envelope wins over the status
        // code and is never retried.
        if let Ok(value) = serde_json::from_str::<Value>(&body) {
            if let Some(err) = error_envelope(&value) {
                return Err(err);
            }

            if status_err.is_none() {
                return serde_json::from_value::<T>(value)
                    .map_err(|e| ApiError::Decode(e.to_string()));
            }
        }

        match status_err {
            Some(err) if attempt >= MAX_ATTEMPTS => {
                return Err(ApiError::Transport {
                    attempts: attempt,
                    source: err,
                });
            }
            Some(_) => {
                sleep(Duration::from_secs(attempt as u64)).await;
                attempt += 1;
            }
            None => {
                return Err(ApiError::Decode(format!(
                    "response was not valid JSON: {}",
                    body.chars().take(120).collect::<String>()
                )));
            }
        }
    }
}
