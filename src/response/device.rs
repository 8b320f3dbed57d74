// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device information response parsing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ParseError;

/// Device information from the `v1` endpoint.
///
/// Older firmware returns the fields at the top level, newer firmware wraps
/// them in a `data` object. A top-level `data` key holding an object is
/// always treated as the wrapper; anything else is read as the flat form.
///
/// A field the firmware leaves out, or sends as `null`, is `None`.
///
/// # Examples
///
/// ```
/// use cemm::response::Device;
///
/// let json = serde_json::json!({
///     "data": {
///         "name": "CEMM Plus",
///         "mac": "00:1e:c0:12:34:56",
///         "version": "2.26.0.0",
///         "core": "1.25"
///     }
/// });
/// let device = Device::from_value(&json).unwrap();
/// assert_eq!(device.model.as_deref(), Some("CEMM Plus"));
/// assert_eq!(device.core.as_deref(), Some("1.25"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Product name, e.g. `"CEMM Plus"`.
    #[serde(rename = "name")]
    pub model: Option<String>,
    /// Hardware address.
    pub mac: Option<String>,
    /// Firmware version.
    pub version: Option<String>,
    /// Core firmware version.
    pub core: Option<String>,
}

impl Device {
    /// Maps a `v1` response onto a [`Device`].
    ///
    /// # Errors
    ///
    /// Returns error if the response is not an object or a present field is
    /// not a string.
    pub fn from_value(value: &Value) -> Result<Self, ParseError> {
        let inner = match value.get("data") {
            Some(data @ Value::Object(_)) => data,
            _ => value,
        };
        Ok(Self::deserialize(inner)?)
    }
}
