// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Classification of metering channels.

use std::fmt;

/// The kind of meter behind a channel, derived from its `type` tag.
///
/// The device reports tags such as `"p1"`, `"water_meter"` or
/// `"solar_energy_mb"`; classification matches on the substring.
///
/// # Examples
///
/// ```
/// use cemm::types::ConnectionKind;
///
/// assert_eq!(ConnectionKind::from_io_type("p1"), ConnectionKind::SmartMeter);
/// assert_eq!(ConnectionKind::from_io_type("pulse_water"), ConnectionKind::WaterMeter);
/// assert_eq!(ConnectionKind::from_io_type("modbus_solar_energy"), ConnectionKind::SolarPanel);
/// assert_eq!(ConnectionKind::from_io_type("pulse_gas"), ConnectionKind::Other);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionKind {
    /// DSMR "P1" smart electricity meter.
    SmartMeter,
    /// Pulse-counting water meter.
    WaterMeter,
    /// Solar inverter.
    SolarPanel,
    /// Any channel this library has no dedicated model for.
    Other,
}

impl ConnectionKind {
    /// Classifies a channel by its `type` tag.
    #[must_use]
    pub fn from_io_type(io_type: &str) -> Self {
        let io_type = io_type.to_ascii_lowercase();
        if io_type.contains("solar_energy") {
            Self::SolarPanel
        } else if io_type.contains("water") {
            Self::WaterMeter
        } else if io_type.contains("p1") {
            Self::SmartMeter
        } else {
            Self::Other
        }
    }

    /// Returns a short human-readable name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SmartMeter => "smart meter",
            Self::WaterMeter => "water meter",
            Self::SolarPanel => "solar panel",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
