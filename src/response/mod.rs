// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Models for CEMM JSON responses.
//!
//! Each model has a `from_value` constructor that maps the untyped JSON
//! returned by [`crate::protocol::HttpClient`] onto a typed record. Mapping
//! is pure: no I/O, no shared state.
//!
//! Realtime endpoints wrap every leaf in a `[tag, value]` pair, grouped
//! under `data` (instantaneous) and `totals` (cumulative):
//!
//! ```json
//! {
//!     "data":   { "electric_power": [1700000000, 193] },
//!     "totals": { "electric_energy": [1700000000, 412.5] }
//! }
//! ```
//!
//! Leaves missing from a realtime response map to `None`, never to zero.

mod connection;
mod device;
mod smart_meter;
mod solar_panel;
mod water_meter;

pub use connection::Connection;
pub use device::Device;
pub use smart_meter::SmartMeter;
pub use solar_panel::SolarPanel;
pub use water_meter::WaterMeter;

use serde::Deserialize;
use serde::de::IgnoredAny;

/// A `[tag, value]` leaf. Only the value is kept.
#[derive(Debug, Deserialize)]
pub(crate) struct Reading<T>(#[allow(dead_code)] IgnoredAny, Option<T>);

impl<T> Reading<T> {
    pub(crate) fn into_value(self) -> Option<T> {
        self.1
    }
}

/// Extracts the value of an optional leaf.
pub(crate) fn leaf<T>(reading: Option<Reading<T>>) -> Option<T> {
    reading.and_then(Reading::into_value)
}

/// The `{data, totals}` envelope of a realtime response.
#[derive(Debug, Deserialize)]
pub(crate) struct Realtime<D, T> {
    data: Option<D>,
    totals: Option<T>,
}

impl<D: Default, T: Default> Realtime<D, T> {
    pub(crate) fn into_groups(self) -> (D, T) {
        (
            self.data.unwrap_or_default(),
            self.totals.unwrap_or_default(),
        )
    }
}

/// Rounds to two decimals, half away from zero.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sums a low and a high tariff reading, rounded to two decimals.
///
/// Returns `None` unless both readings are present.
#[must_use]
pub fn tariff_total(low: Option<f64>, high: Option<f64>) -> Option<f64> {
    Some(round2(low? + high?))
}
