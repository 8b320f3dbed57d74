// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Async client for CEMM home energy monitors.
//!
//! A CEMM exposes its metering channels over a small local HTTP/JSON API
//! under `http://{host}/open-api/`. This crate issues GET requests against
//! that API and maps the answers onto typed records.
//!
//! # Supported Channels
//!
//! - **Smart meter** (P1): power flow, tariff, consumed/returned energy, gas
//! - **Water meter** (pulse): flow and cumulative volume
//! - **Solar inverter** (Modbus): power flow, consumption and production
//!   totals
//!
//! # Quick Start
//!
//! ```no_run
//! use cemm::Cemm;
//! use cemm::types::ConnectionKind;
//!
//! #[tokio::main]
//! async fn main() -> cemm::Result<()> {
//!     let cemm = Cemm::new("192.168.1.50")?;
//!
//!     let device = cemm.device().await?;
//!     println!("{:?} firmware {:?}", device.model, device.version);
//!
//!     for channel in cemm.connections().await? {
//!         let Some(alias) = channel.alias.as_deref() else {
//!             continue;
//!         };
//!         match channel.kind() {
//!             ConnectionKind::SmartMeter => println!("{:?}", cemm.smart_meter(alias).await?),
//!             ConnectionKind::WaterMeter => println!("{:?}", cemm.water_meter(alias).await?),
//!             ConnectionKind::SolarPanel => println!("{:?}", cemm.solar_panel(alias).await?),
//!             ConnectionKind::Other => {}
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Sharing an HTTP Client
//!
//! ```no_run
//! use std::time::Duration;
//! use cemm::{Cemm, HttpConfig};
//!
//! # async fn example() -> cemm::Result<()> {
//! let shared = reqwest::Client::new();
//! let config = HttpConfig::new("192.168.1.50").with_timeout(Duration::from_secs(3));
//! let cemm = Cemm::with_session(config, shared.clone());
//!
//! let water = cemm.water_meter("pulse-1").await?;
//! println!("{:?} m³", water.volume);
//! # Ok(())
//! # }
//! ```

mod client;
pub mod error;
pub mod protocol;
pub mod response;
pub mod types;

pub use client::Cemm;
pub use error::{ConnectionError, Error, ParseError, Result};
pub use protocol::{HttpClient, HttpConfig, Session};
pub use response::{Connection, Device, SmartMeter, SolarPanel, WaterMeter};
pub use types::{ConnectionKind, TariffPeriod};
