//! Page retrieval.
//!
//! [`PageFetcher`] sends one GET per URL with a fixed browser identity and
//! folds every possible outcome into a [`FetchResult`]. It never returns an
//! error: unreachable or restricted sites are an expected part of a run.

use crate::error::Result;
use crate::models::FetchResult;
use reqwest::{Client, header};
use tracing::{debug, instrument};

/// HTTP client with a fixed `User-Agent`.
///
/// No retries and no timeout beyond the transport default. Redirects follow
/// reqwest's default policy.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    http: Client,
}

impl PageFetcher {
    /// Build a fetcher sending `user_agent` with every request.
    ///
    /// Fails only if the client cannot be constructed, e.g. when the user
    /// agent is not a valid header value.
    pub fn new(user_agent: &str) -> Result<Self> {
        let http = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { http })
    }

    /// Fetch one page.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch(&self, url: &str) -> FetchResult {
        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                return FetchResult::TransportError {
                    message: e.to_string(),
                };
            }
        };

        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("Unknown Status");
            let side = if status.is_client_error() {
                "Client Error"
            } else if status.is_server_error() {
                "Server Error"
            } else {
                "Unexpected Status"
            };
            return FetchResult::HttpError {
                status: status.as_u16(),
                message: format!("{} {}: {} for url: {}", status.as_u16(), side, reason, url),
            };
        }

        // Non-ASCII bytes in the header must not erase it.
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .unwrap_or_default();

        match response.text().await {
            Ok(body) => {
                debug!(bytes = body.len(), %content_type, "Fetched page body");
                FetchResult::Success {
                    body,
                    content_type,
                    status: status.as_u16(),
                }
            }
            Err(e) => FetchResult::TransportError {
                message: e.to_string(),
            },
        }
    }
}
