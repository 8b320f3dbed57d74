// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Channel list response parsing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ParseError;
use crate::types::ConnectionKind;

/// One metering channel from the `v1/io` endpoint.
///
/// The `alias` is what the realtime accessors expect. A field the device
/// leaves out, or sends as `null`, is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Numeric channel identifier.
    pub io_id: Option<i64>,
    /// Channel type tag, e.g. `"p1"`.
    #[serde(rename = "type")]
    pub io_type: Option<String>,
    /// Channel name used in realtime requests, e.g. `"pulse-1"`.
    pub alias: Option<String>,
}

impl Connection {
    /// Maps a `v1/io` response onto a list of channels, in server order.
    ///
    /// The list is expected under a top-level `data` key. A bare top-level
    /// array is accepted as well; any other shape is rejected.
    ///
    /// # Errors
    ///
    /// Returns error if no list is found or an entry is malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use cemm::response::Connection;
    ///
    /// let json = serde_json::json!({
    ///     "data": [
    ///         { "io_id": 1, "type": "p1", "alias": "p1" },
    ///         { "io_id": 2, "type": "water", "alias": "pulse-1" }
    ///     ]
    /// });
    /// let connections = Connection::list_from_value(&json).unwrap();
    /// assert_eq!(connections.len(), 2);
    /// assert_eq!(connections[1].alias.as_deref(), Some("pulse-1"));
    /// ```
    pub fn list_from_value(value: &Value) -> Result<Vec<Self>, ParseError> {
        let list = match value {
            Value::Array(_) => value,
            Value::Object(map) => match map.get("data") {
                Some(data @ Value::Array(_)) => data,
                Some(_) => {
                    return Err(ParseError::UnexpectedFormat(
                        "`data` is not a list of connections".to_string(),
                    ));
                }
                None => return Err(ParseError::MissingField("data".to_string())),
            },
            _ => {
                return Err(ParseError::UnexpectedFormat(
                    "expected a list of connections".to_string(),
                ));
            }
        };
        Ok(Vec::<Self>::deserialize(list)?)
    }

    /// Returns the meter kind behind this channel.
    ///
    /// A channel without a type tag is [`ConnectionKind::Other`].
    #[must_use]
    pub fn kind(&self) -> ConnectionKind {
        self.io_type
            .as_deref()
            .map_or(ConnectionKind::Other, ConnectionKind::from_io_type)
    }
}
