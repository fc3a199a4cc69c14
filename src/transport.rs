// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for the panel's local API.
//!
//! The LAN link to a panel is unreliable enough in practice that every
//! request gets a small fixed retry budget for transport-level failures
//! (connection reset, socket timeout). A well-formed HTTP error status is
//! never retried; the panel answered, it just said no.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;

use crate::error::{Error, RemoteRejected, TransportError};

/// Maximum number of attempts per request.
pub(crate) const MAX_ATTEMPTS: u32 = 3;

/// Default per-attempt timeout.
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP transport bound to one panel's base address.
///
/// Stateless across calls apart from connection reuse inside the underlying
/// [`reqwest::Client`], which is an optimization rather than a correctness
/// requirement.
///
/// # Examples
///
/// ```no_run
/// use spanr_lib::transport::Transport;
///
/// # async fn example() -> spanr_lib::Result<()> {
/// let transport = Transport::new("span.lan")?;
/// let response = transport.get("/api/v1/status").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Transport {
    base_url: String,
    client: Client,
}

impl Transport {
    /// Creates a transport for the specified host with the default timeout.
    ///
    /// # Arguments
    ///
    /// * `host` - Hostname or IP address of the panel, with or without an
    ///   `http://` prefix. Normalized to lowercase.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the HTTP client cannot be created.
    pub fn new(host: impl Into<String>) -> Result<Self, TransportError> {
        Self::with_timeout(host, DEFAULT_TIMEOUT)
    }

    /// Creates a transport with a custom per-attempt timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the HTTP client cannot be created.
    pub fn with_timeout(
        host: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let host = host.into().to_lowercase();
        if host.is_empty() {
            return Err(TransportError::InvalidAddress("host is empty".to_string()));
        }
        let base_url = if host.starts_with("http://") || host.starts_with("https://") {
            host
        } else {
            format!("http://{host}")
        };

        // The panel never redirects; refusing to follow keeps a misbehaving
        // device from routing requests elsewhere.
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(TransportError::ClientBuild)?;

        Ok(Self { base_url, client })
    }

    /// Returns the base URL of the panel.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues a GET request against a path under the panel's base URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] after the retry budget is exhausted, or
    /// [`Error::Rejected`] for a 4xx/5xx response.
    pub async fn get(&self, path: &str) -> Result<reqwest::Response, Error> {
        let url = format!("{}{path}", self.base_url);
        let request = self.client.get(&url);
        self.send_with_retry(request, &url).await
    }

    /// Issues a POST request with a JSON body against a path under the
    /// panel's base URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] after the retry budget is exhausted, or
    /// [`Error::Rejected`] for a 4xx/5xx response.
    pub async fn post_json<T: Serialize + Sync>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response, Error> {
        let url = format!("{}{path}", self.base_url);
        let request = self.client.post(&url).json(body);
        self.send_with_retry(request, &url).await
    }

    /// Sends a request, retrying transport-level failures up to
    /// [`MAX_ATTEMPTS`] times in total.
    async fn send_with_retry(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<reqwest::Response, Error> {
        let mut attempt = 1;
        loop {
            // try_clone only fails for streaming bodies, which this
            // transport never constructs.
            let prepared = request.try_clone().ok_or_else(|| {
                TransportError::InvalidAddress("request body is not retryable".to_string())
            })?;

            tracing::debug!(url = %url, attempt, "sending HTTP request");

            match prepared.send().await {
                Ok(response) => {
                    let status = response.status();
                    tracing::debug!(url = %url, status = %status, "received HTTP response");

                    if status.is_client_error() || status.is_server_error() {
                        return Err(RemoteRejected {
                            status: status.as_u16(),
                            url: url.to_string(),
                        }
                        .into());
                    }
                    return Ok(response);
                }
                Err(err) if attempt < MAX_ATTEMPTS => {
                    tracing::debug!(url = %url, attempt, error = %err, "transport failure, retrying");
                    attempt += 1;
                }
                Err(err) => {
                    return Err(TransportError::RetriesExhausted {
                        attempts: attempt,
                        source: err,
                    }
                    .into());
                }
            }
        }
    }
}
