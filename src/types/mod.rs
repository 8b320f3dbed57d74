// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared by the CEMM models.
//!
//! - [`TariffPeriod`] - Billing period tag reported by a smart meter
//! - [`ConnectionKind`] - Meter kind behind a channel

mod connection_kind;
mod tariff;
mod whole_number;

pub use connection_kind::ConnectionKind;
pub use tariff::TariffPeriod;
pub(crate) use whole_number::WholeNumber;
