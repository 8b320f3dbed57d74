// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed accessors for a single CEMM device.

use serde_json::Value;

use crate::error::Error;
use crate::protocol::{HttpClient, HttpConfig, path};
use crate::response::{Connection, Device, SmartMeter, SolarPanel, WaterMeter};
use crate::types::ConnectionKind;

/// Client for one CEMM device.
///
/// Each accessor performs exactly one GET request and maps the answer onto
/// a model. There is no caching or retrying; errors are returned as-is.
///
/// # Examples
///
/// ```no_run
/// use cemm::Cemm;
/// use cemm::types::ConnectionKind;
///
/// # async fn example() -> cemm::Result<()> {
/// let cemm = Cemm::new("192.168.1.50")?;
///
/// let device = cemm.device().await?;
/// println!("{:?} running {:?}", device.model, device.version);
///
/// for meter in cemm.connections_of_kind(ConnectionKind::SmartMeter).await? {
///     if let Some(alias) = meter.alias.as_deref() {
///         let reading = cemm.smart_meter(alias).await?;
///         println!("{alias}: {:?} W", reading.power_flow);
///     }
/// }
///
/// cemm.close();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Cemm {
    client: HttpClient,
}

impl Cemm {
    /// Creates a client with default settings and its own HTTP session.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP session cannot be created.
    pub fn new(host: impl Into<String>) -> Result<Self, Error> {
        Self::with_config(HttpConfig::new(host))
    }

    /// Creates a client from a configuration, with its own HTTP session.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP session cannot be created.
    pub fn with_config(config: HttpConfig) -> Result<Self, Error> {
        Ok(Self {
            client: config.into_client()?,
        })
    }

    /// Creates a client that sends its requests through `session`.
    ///
    /// The session is never closed by this client.
    #[must_use]
    pub fn with_session(config: HttpConfig, session: reqwest::Client) -> Self {
        Self {
            client: config.into_client_with(session),
        }
    }

    /// Returns the underlying transport.
    #[must_use]
    pub fn http_client(&self) -> &HttpClient {
        &self.client
    }

    /// Performs a raw GET request below `/open-api/`.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn request(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, Error> {
        self.client.request(path, query).await
    }

    /// Returns the device information.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response is malformed.
    pub async fn device(&self) -> Result<Device, Error> {
        let json = self.request(path::DEVICE, &[]).await?;
        Ok(Device::from_value(&json)?)
    }

    /// Returns all metering channels, in the order the device lists them.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response is malformed.
    pub async fn connections(&self) -> Result<Vec<Connection>, Error> {
        let json = self.request(path::CONNECTIONS, &[]).await?;
        let connections = Connection::list_from_value(&json)?;
        tracing::debug!(count = connections.len(), "Listed CEMM connections");
        Ok(connections)
    }

    /// Returns the channels of one meter kind.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response is malformed.
    pub async fn connections_of_kind(
        &self,
        kind: ConnectionKind,
    ) -> Result<Vec<Connection>, Error> {
        let mut connections = self.connections().await?;
        connections.retain(|connection| connection.kind() == kind);
        Ok(connections)
    }

    /// Returns the current smart meter reading of channel `alias`.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response is malformed.
    pub async fn smart_meter(&self, alias: &str) -> Result<SmartMeter, Error> {
        let json = self.request(&path::realtime(alias), &[]).await?;
        Ok(SmartMeter::from_value(&json)?)
    }

    /// Returns the current water meter reading of channel `alias`.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response is malformed.
    pub async fn water_meter(&self, alias: &str) -> Result<WaterMeter, Error> {
        let json = self.request(&path::realtime(alias), &[]).await?;
        Ok(WaterMeter::from_value(&json)?)
    }

    /// Returns the current solar inverter reading of channel `alias`.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response is malformed.
    pub async fn solar_panel(&self, alias: &str) -> Result<SolarPanel, Error> {
        let json = self.request(&path::realtime(alias), &[]).await?;
        Ok(SolarPanel::from_value(&json)?)
    }

    /// Releases the HTTP session if this client created it.
    pub fn close(self) {
        self.client.close();
    }
}
