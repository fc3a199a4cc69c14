// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `SpanR` library.
//!
//! This module provides the error hierarchy for failures across the library:
//! transport-level failures, HTTP rejections from the panel, payload parsing,
//! and reads against a cache that has not been populated yet.

use thiserror::Error;

/// The main error type for this library.
///
/// This enum encompasses all possible errors that can occur when interacting
/// with a SPAN panel.
#[derive(Debug, Error)]
pub enum Error {
    /// Network-level failure after the retry budget was exhausted.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The panel answered with a well-formed HTTP error status.
    #[error("{0}")]
    Rejected(#[from] RemoteRejected),

    /// Error occurred while parsing a panel payload.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A read accessor was called before the first successful refresh.
    #[error("panel data not yet loaded: {0}")]
    NotYetLoaded(&'static str),

    /// The requested circuit id is not present in the cached registry.
    #[error("unknown circuit id: {0}")]
    CircuitNotFound(String),
}

/// Errors at the HTTP transport layer.
///
/// These cover failures below the HTTP status line: connection resets,
/// socket timeouts, unresolvable hosts. A response with an error status is
/// *not* a transport error; see [`RemoteRejected`].
#[derive(Debug, Error)]
pub enum TransportError {
    /// All retry attempts failed with a transport-level error.
    #[error("request failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        /// Number of attempts made.
        attempts: u32,
        /// The error from the final attempt.
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Invalid host or URL.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// A well-formed HTTP error response (4xx/5xx) from the panel.
///
/// This is distinct from [`TransportError`]: the device was reachable and
/// answered, but refused the request. Typical causes are an authorization
/// problem or attempting to control a circuit that is not user controllable.
#[derive(Debug, Error)]
#[error("panel rejected request: HTTP {status} for {url}")]
pub struct RemoteRejected {
    /// The HTTP status code returned by the panel.
    pub status: u16,
    /// The URL that was rejected.
    pub url: String,
}

impl RemoteRejected {
    /// Returns `true` if the rejection looks like an authorization problem
    /// (401 or 403) rather than an operational one.
    #[must_use]
    pub fn is_authorization(&self) -> bool {
        matches!(self.status, 401 | 403)
    }
}

/// Errors related to parsing panel responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    /// An invalid wire value was encountered.
    #[error("invalid value for {field}: {value}")]
    InvalidValue {
        /// The field that failed to parse.
        field: &'static str,
        /// The offending value.
        value: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
