// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Water meter realtime response parsing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Reading, Realtime, leaf};
use crate::error::ParseError;

/// Water meter reading from a pulse channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WaterMeter {
    /// Current flow, from `data.flow`.
    pub flow: Option<f64>,
    /// Cumulative volume in m³, from `totals.volume`.
    pub volume: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct WaterMeterData {
    flow: Option<Reading<f64>>,
}

#[derive(Debug, Default, Deserialize)]
struct WaterMeterTotals {
    volume: Option<Reading<f64>>,
}

impl WaterMeter {
    /// Maps a `v1/{alias}/realtime` response onto a [`WaterMeter`].
    ///
    /// # Errors
    ///
    /// Returns error if the response is not an object or a present leaf is
    /// not a numeric `[tag, value]` pair.
    pub fn from_value(value: &Value) -> Result<Self, ParseError> {
        let (data, totals) =
            Realtime::<WaterMeterData, WaterMeterTotals>::deserialize(value)?.into_groups();

        Ok(Self {
            flow: leaf(data.flow),
            volume: leaf(totals.volume),
        })
    }
}
