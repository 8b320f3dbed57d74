// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Smart meter (P1) realtime response parsing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Reading, Realtime, leaf};
use crate::error::ParseError;
use crate::types::{TariffPeriod, WholeNumber};

/// Smart electricity meter reading.
///
/// Meter register mapping:
/// - `data.t1` / `data.t2`: energy consumed, low / high tariff
/// - `data.t3` / `data.t4`: energy returned, low / high tariff
/// - `totals.electric_energy` / `totals.electric_energy_high`: billed energy
///
/// Every field is `None` when the device leaves it out, for example when no
/// gas meter is attached.
///
/// # Examples
///
/// ```
/// use cemm::response::SmartMeter;
///
/// let json = serde_json::json!({
///     "data": {
///         "electric_power": [1700000000, 193],
///         "t2": [1700000000, 5459.44]
///     },
///     "totals": {}
/// });
/// let meter = SmartMeter::from_value(&json).unwrap();
/// assert_eq!(meter.power_flow, Some(193));
/// assert_eq!(meter.energy_consumption_high, Some(5459.44));
/// assert_eq!(meter.gas_consumption, None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmartMeter {
    /// Current power flow in W; negative while returning to the grid.
    pub power_flow: Option<i64>,
    /// Gas meter reading in m³.
    pub gas_consumption: Option<f64>,
    /// Active tariff period.
    pub energy_tariff_period: Option<TariffPeriod>,

    /// Energy consumed under the low tariff, kWh.
    pub energy_consumption_low: Option<f64>,
    /// Energy consumed under the high tariff, kWh.
    pub energy_consumption_high: Option<f64>,
    /// Energy returned under the low tariff, kWh.
    pub energy_returned_low: Option<f64>,
    /// Energy returned under the high tariff, kWh.
    pub energy_returned_high: Option<f64>,

    /// Billed energy, low tariff, kWh.
    pub billed_energy_low: Option<f64>,
    /// Billed energy, high tariff, kWh.
    pub billed_energy_high: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct SmartMeterData {
    electric_power: Option<Reading<WholeNumber>>,
    gas: Option<Reading<f64>>,
    rate: Option<Reading<TariffPeriod>>,
    t1: Option<Reading<f64>>,
    t2: Option<Reading<f64>>,
    t3: Option<Reading<f64>>,
    t4: Option<Reading<f64>>,
}

#[derive(Debug, Default, Deserialize)]
struct SmartMeterTotals {
    electric_energy: Option<Reading<f64>>,
    electric_energy_high: Option<Reading<f64>>,
}

impl SmartMeter {
    /// Maps a `v1/{alias}/realtime` response onto a [`SmartMeter`].
    ///
    /// # Errors
    ///
    /// Returns error if the response is not an object or a present leaf is
    /// not a `[tag, value]` pair of the expected type.
    pub fn from_value(value: &Value) -> Result<Self, ParseError> {
        let (data, totals) =
            Realtime::<SmartMeterData, SmartMeterTotals>::deserialize(value)?.into_groups();

        Ok(Self {
            power_flow: leaf(data.electric_power).map(|power| power.0),
            gas_consumption: leaf(data.gas),
            energy_tariff_period: leaf(data.rate),
            energy_consumption_low: leaf(data.t1),
            energy_consumption_high: leaf(data.t2),
            energy_returned_low: leaf(data.t3),
            energy_returned_high: leaf(data.t4),
            billed_energy_low: leaf(totals.electric_energy),
            billed_energy_high: leaf(totals.electric_energy_high),
        })
    }
}
