// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Solar inverter realtime response parsing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Reading, Realtime, leaf, tariff_total};
use crate::error::ParseError;

/// Solar inverter reading.
///
/// Inverter register mapping (all under `totals`):
/// - `t1` / `t2`: gross production, low / high tariff
/// - `t3` / `t4`: device consumption, low / high tariff
/// - `electric_energy` / `electric_energy_high`: net production
///
/// Each `*_total` is the sum of its low and high values rounded to two
/// decimals, and is `None` if either side is missing.
///
/// # Examples
///
/// ```
/// use cemm::response::SolarPanel;
///
/// let json = serde_json::json!({
///     "data": { "electric_power": [1700000000, -4.5] },
///     "totals": {
///         "t3": [1700000000, 12.45],
///         "t4": [1700000000, 25.46]
///     }
/// });
/// let panel = SolarPanel::from_value(&json).unwrap();
/// assert_eq!(panel.power_flow, Some(-4.5));
/// assert_eq!(panel.device_consumption_total, Some(37.91));
/// assert_eq!(panel.gross_production_total, None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolarPanel {
    /// Current power flow in W. Inverters report fractional watts.
    pub power_flow: Option<f64>,

    /// Energy used by the inverter itself, low tariff, kWh.
    pub device_consumption_low: Option<f64>,
    /// Energy used by the inverter itself, high tariff, kWh.
    pub device_consumption_high: Option<f64>,
    /// `device_consumption_low + device_consumption_high`, rounded.
    pub device_consumption_total: Option<f64>,

    /// Gross production, low tariff, kWh.
    pub gross_production_low: Option<f64>,
    /// Gross production, high tariff, kWh.
    pub gross_production_high: Option<f64>,
    /// `gross_production_low + gross_production_high`, rounded.
    pub gross_production_total: Option<f64>,

    /// Net production, low tariff, kWh.
    pub net_production_low: Option<f64>,
    /// Net production, high tariff, kWh.
    pub net_production_high: Option<f64>,
    /// `net_production_low + net_production_high`, rounded.
    pub net_production_total: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct SolarPanelData {
    electric_power: Option<Reading<f64>>,
}

#[derive(Debug, Default, Deserialize)]
struct SolarPanelTotals {
    t1: Option<Reading<f64>>,
    t2: Option<Reading<f64>>,
    t3: Option<Reading<f64>>,
    t4: Option<Reading<f64>>,
    electric_energy: Option<Reading<f64>>,
    electric_energy_high: Option<Reading<f64>>,
}

impl SolarPanel {
    /// Maps a `v1/{alias}/realtime` response onto a [`SolarPanel`].
    ///
    /// # Errors
    ///
    /// Returns error if the response is not an object or a present leaf is
    /// not a numeric `[tag, value]` pair.
    pub fn from_value(value: &Value) -> Result<Self, ParseError> {
        let (data, totals) =
            Realtime::<SolarPanelData, SolarPanelTotals>::deserialize(value)?.into_groups();

        let device_consumption_low = leaf(totals.t3);
        let device_consumption_high = leaf(totals.t4);
        let gross_production_low = leaf(totals.t1);
        let gross_production_high = leaf(totals.t2);
        let net_production_low = leaf(totals.electric_energy);
        let net_production_high = leaf(totals.electric_energy_high);

        Ok(Self {
            power_flow: leaf(data.electric_power),
            device_consumption_low,
            device_consumption_high,
            device_consumption_total: tariff_total(device_consumption_low, device_consumption_high),
            gross_production_low,
            gross_production_high,
            gross_production_total: tariff_total(gross_production_low, gross_production_high),
            net_production_low,
            net_production_high,
            net_production_total: tariff_total(net_production_low, net_production_high),
        })
    }
}
