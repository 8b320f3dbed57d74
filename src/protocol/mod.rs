// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport layer for the CEMM open API.
//!
//! [`HttpClient`] performs one GET per call and hands back untyped JSON.
//! It validates the content type and status code but knows nothing about
//! the shape of the data.

mod http;

pub use http::{HttpClient, HttpConfig, Session};

/// API paths known to the client.
pub mod path {
    /// Device information.
    pub const DEVICE: &str = "v1";
    /// List of metering channels.
    pub const CONNECTIONS: &str = "v1/io";

    /// Realtime and cumulative readings of one channel.
    ///
    /// The alias is percent-encoded so it always stays a single path segment.
    #[must_use]
    pub fn realtime(alias: &str) -> String {
        format!("v1/{}/realtime", urlencoding::encode(alias))
    }
}
