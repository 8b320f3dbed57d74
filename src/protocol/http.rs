// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for the CEMM open API.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use serde_json::Value;

use crate::error::{ConnectionError, Error, ParseError};

/// `Accept` header sent with every request.
const ACCEPT_VALUE: &str = "application/json, text/plain, */*";

/// Default `User-Agent`, fixed at compile time.
const DEFAULT_USER_AGENT: &str = concat!("cemm-rs/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// HttpConfig
// ============================================================================

/// Connection parameters for a CEMM device.
///
/// # Examples
///
/// ```
/// use cemm::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("192.168.1.50")
///     .with_port(8080)
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.base_url(), "http://192.168.1.50:8080/open-api/");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: u16,
    timeout: Duration,
    user_agent: String,
}

impl HttpConfig {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a new configuration for the specified host.
    ///
    /// Any leading scheme and trailing slashes are stripped, so
    /// `"192.168.1.50"`, `"http://192.168.1.50/"` and `"https://192.168.1.50"`
    /// all address the same device. The open API is plain HTTP only. A port
    /// embedded in the host (`"10.0.0.2:8080"`) is kept as given.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        let host = host.into();
        let host = host
            .split_once("://")
            .map_or(host.as_str(), |(_, rest)| rest)
            .trim_end_matches('/')
            .to_string();

        Self {
            host,
            port: Self::DEFAULT_PORT,
            timeout: Self::DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the overall budget for one request/response cycle.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the `User-Agent` header value.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Builds the API root URL, always ending in `/open-api/`.
    #[must_use]
    pub fn base_url(&self) -> String {
        let port_suffix = if self.port == Self::DEFAULT_PORT {
            String::new()
        } else {
            format!(":{}", self.port)
        };
        format!("http://{}{port_suffix}/open-api/", self.host)
    }

    /// Creates an [`HttpClient`] that owns its own session.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying HTTP client cannot be created.
    pub fn into_client(self) -> Result<HttpClient, ConnectionError> {
        let session = Session::owned(self.timeout)?;
        Ok(HttpClient::from_parts(self, session))
    }

    /// Creates an [`HttpClient`] on top of a caller-supplied [`Client`].
    ///
    /// The configured timeout still applies to each request.
    #[must_use]
    pub fn into_client_with(self, client: Client) -> HttpClient {
        HttpClient::from_parts(self, Session::shared(client))
    }
}

// ============================================================================
// Session
// ============================================================================

/// The connection pool a [`HttpClient`] sends its requests through.
///
/// Whether the pool belongs to the client is decided once, at construction.
/// Only an owned session is released by [`Session::close`]; a shared one is
/// left to the caller who supplied it.
#[derive(Debug, Clone)]
pub enum Session {
    /// Created by this library.
    Owned(Client),
    /// Supplied by the caller.
    Shared(Client),
}

impl Session {
    /// Creates a session owned by the library.
    ///
    /// # Errors
    ///
    /// Returns error if the TLS backend or resolver cannot be initialised.
    pub fn owned(timeout: Duration) -> Result<Self, ConnectionError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ConnectionError::Http)?;
        Ok(Self::Owned(client))
    }

    /// Wraps a caller-supplied client.
    #[must_use]
    pub fn shared(client: Client) -> Self {
        Self::Shared(client)
    }

    /// Returns `true` if the library created this session.
    #[must_use]
    pub fn is_owned(&self) -> bool {
        matches!(self, Self::Owned(_))
    }

    /// Returns the underlying client.
    #[must_use]
    pub fn client(&self) -> &Client {
        match self {
            Self::Owned(client) | Self::Shared(client) => client,
        }
    }

    /// Releases the session if it is owned.
    pub fn close(self) {
        match self {
            Self::Owned(client) => {
                tracing::debug!("Closing owned HTTP session");
                drop(client);
            }
            Self::Shared(_) => {
                tracing::trace!("Leaving caller-supplied HTTP session open");
            }
        }
    }
}

// ============================================================================
// HttpClient
// ============================================================================

/// HTTP client for the CEMM open API.
///
/// Every call is a single GET to `http://{host}/open-api/{path}`. The body is
/// returned as untyped JSON; mapping onto models is left to
/// [`crate::response`].
///
/// # Examples
///
/// ```no_run
/// use cemm::protocol::HttpConfig;
///
/// # async fn example() -> cemm::Result<()> {
/// let client = HttpConfig::new("192.168.1.50").into_client()?;
/// let json = client.request("v1/io", &[]).await?;
/// println!("{json}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    timeout: Duration,
    user_agent: String,
    session: Session,
}

impl HttpClient {
    fn from_parts(config: HttpConfig, session: Session) -> Self {
        Self {
            base_url: config.base_url(),
            timeout: config.timeout,
            user_agent: config.user_agent,
            session,
        }
    }

    /// Returns the API root URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the session requests are sent through.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Consumes the client and releases its session if it owns it.
    pub fn close(self) {
        self.session.close();
    }

    /// Builds the URL for an API path and optional query parameters.
    fn build_url(&self, path: &str, query: &[(&str, &str)]) -> String {
        let mut url = format!("{}{}", self.base_url, path.trim_start_matches('/'));

        for (i, (key, value)) in query.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(&urlencoding::encode(key));
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }

        url
    }

    /// Performs a GET request and returns the decoded JSON body.
    ///
    /// # Arguments
    ///
    /// * `path` - Path below `/open-api/`, for example `"v1/io"`
    /// * `query` - Extra query parameters, appended in order
    ///
    /// # Errors
    ///
    /// - [`Error::UnexpectedResponse`] if the `Content-Type` is not JSON,
    ///   whatever the status code
    /// - [`Error::Connection`] on network failure, timeout or an HTTP error
    ///   status
    /// - [`Error::Parse`] if the body is not valid JSON
    pub async fn request(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, Error> {
        let url = self.build_url(path, query);

        tracing::debug!(url = %url, "Sending CEMM request");

        let exchange = async {
            let response = self
                .session
                .client()
                .get(&url)
                .header(ACCEPT, ACCEPT_VALUE)
                .header(USER_AGENT, &self.user_agent)
                .send()
                .await
                .map_err(|e| self.connection_error(e))?;

            let status = response.status();
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
                .to_string();
            let body = response
                .text()
                .await
                .map_err(|e| self.connection_error(e))?;

            Ok::<_, ConnectionError>((status, content_type, body))
        };

        let (status, content_type, body) = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| ConnectionError::Timeout(self.timeout))??;

        if !content_type.contains("application/json") {
            tracing::warn!(
                status = status.as_u16(),
                content_type = %content_type,
                "Unexpected response from CEMM device"
            );
            return Err(Error::UnexpectedResponse { content_type, body });
        }

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), url = %url, "CEMM device rejected request");
            return Err(ConnectionError::Status {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            }
            .into());
        }

        tracing::debug!(body = %body, "Received CEMM response");

        let value = serde_json::from_str(&body).map_err(ParseError::Json)?;
        Ok(value)
    }

    fn connection_error(&self, error: reqwest::Error) -> ConnectionError {
        if error.is_timeout() {
            ConnectionError::Timeout(self.timeout)
        } else {
            ConnectionError::Http(error)
        }
    }
}
