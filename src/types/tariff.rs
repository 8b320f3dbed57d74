// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tariff period reported by a smart meter.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::whole_number::whole_number;

/// The billing period the meter is currently counting under.
///
/// DSMR meters report `1` (low) or `2` (high), sometimes in float form
/// (`2.0`); some firmware revisions send the tag as text instead, which is
/// kept verbatim.
///
/// # Examples
///
/// ```
/// use cemm::types::TariffPeriod;
///
/// let period: TariffPeriod = serde_json::from_str("2").unwrap();
/// assert_eq!(period, TariffPeriod::Number(2));
/// assert_eq!(period.as_number(), Some(2));
///
/// let period: TariffPeriod = serde_json::from_str(r#""high""#).unwrap();
/// assert_eq!(period.to_string(), "high");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TariffPeriod {
    /// Numeric tariff tag.
    Number(#[serde(deserialize_with = "whole_number")] i64),
    /// Textual tariff tag.
    Text(String),
}

impl TariffPeriod {
    /// Returns the numeric tag, if the device sent one.
    #[must_use]
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for TariffPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}
