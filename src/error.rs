// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the CEMM client.
//!
//! Failures fall into three groups:
//!
//! - [`Error::Connection`]: the device could not be reached, the request
//!   timed out, or the device answered with an HTTP error status.
//! - [`Error::UnexpectedResponse`]: the device answered successfully but
//!   not with JSON (typically an HTML error page).
//! - [`Error::Parse`]: the JSON body does not have the expected shape.

use std::time::Duration;

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Communication with the device failed.
    #[error("error occurred while communicating with the CEMM device: {0}")]
    Connection(#[from] ConnectionError),

    /// The device answered with something other than JSON.
    #[error("unexpected response from the CEMM device (Content-Type: {content_type:?})")]
    UnexpectedResponse {
        /// The `Content-Type` header as sent by the device, empty if absent.
        content_type: String,
        /// The raw response body.
        body: String,
    },

    /// The JSON body could not be mapped to the requested model.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

impl Error {
    /// Returns `true` if this is a transport-level failure.
    #[must_use]
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns `true` if the device answered with a non-JSON body.
    #[must_use]
    pub fn is_unexpected_response(&self) -> bool {
        matches!(self, Self::UnexpectedResponse { .. })
    }
}

/// Transport-level failures.
///
/// HTTP error statuses (4xx/5xx) are reported here as well, since the
/// device gave no usable answer.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// The request did not complete within the configured timeout.
    #[error("timeout occurred while connecting to CEMM device (after {} ms)", .0.as_millis())]
    Timeout(Duration),

    /// DNS failure, refused or reset connection, or a broken body stream.
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// The device answered with a non-success status code.
    #[error("HTTP {code} - {reason}")]
    Status {
        /// Numeric status code.
        code: u16,
        /// Canonical reason phrase.
        reason: String,
    },
}

/// Errors related to mapping CEMM responses onto models.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON decoding or shape mismatch.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// Unexpected response format.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
