//! HTTP transport for the Xtream client
//!
//! The client only needs "GET a URL, look at the status, then read the body".
//! [`Transport`] captures that so tests and embedders can swap the
//! reqwest-backed default for their own implementation.

use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::Client;
use url::Url;

use super::error::{Result, XtreamError};
use crate::config::ClientConfig;

/// Headers sent with every Player API request
pub type Headers = Vec<(&'static str, String)>;

/// Structured transport failure
///
/// Messages must not carry the request URL, which holds the credentials.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Name resolution or TCP/TLS connection failed
    #[error("connection failed: {0}")]
    Connect(String),
    /// Cross-origin request rejected
    #[error("cross-origin request rejected: {0}")]
    Cors(String),
    /// Anything else (body read failure, redirect loop, ...)
    #[error("{0}")]
    Other(String),
}

/// Response whose status is known before the body is consumed
pub trait TransportResponse: Send {
    fn status(&self) -> u16;

    /// Reason phrase for the status
    fn reason(&self) -> String;

    fn body(self: Box<Self>) -> BoxFuture<'static, std::result::Result<Vec<u8>, TransportError>>;
}

/// Capability to perform a GET request
///
/// Dropping the returned future must abort the request.
pub trait Transport: Send + Sync {
    fn get<'a>(
        &'a self,
        url: &'a Url,
        headers: &'a Headers,
    ) -> BoxFuture<'a, std::result::Result<Box<dyn TransportResponse>, TransportError>>;
}

/// Default transport built on `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Build the underlying HTTP client
    ///
    /// No cookie store is configured, so nothing but the query string
    /// identifies the caller.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| XtreamError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http })
    }

    /// Wrap an existing `reqwest::Client`
    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

impl Transport for ReqwestTransport {
    fn get<'a>(
        &'a self,
        url: &'a Url,
        headers: &'a Headers,
    ) -> BoxFuture<'a, std::result::Result<Box<dyn TransportResponse>, TransportError>> {
        async move {
            let mut request = self.http.get(url.clone());
            for (name, value) in headers {
                request = request.header(*name, value);
            }

            let response = request.send().await.map_err(classify_reqwest_error)?;
            Ok(Box::new(ReqwestResponse(response)) as Box<dyn TransportResponse>)
        }
        .boxed()
    }
}

struct ReqwestResponse(reqwest::Response);

impl TransportResponse for ReqwestResponse {
    fn status(&self) -> u16 {
        self.0.status().as_u16()
    }

    fn reason(&self) -> String {
        self.0
            .status()
            .canonical_reason()
            .unwrap_or_default()
            .to_string()
    }

    fn body(self: Box<Self>) -> BoxFuture<'static, std::result::Result<Vec<u8>, TransportError>> {
        async move {
            self.0
                .bytes()
                .await
                .map(|b| b.to_vec())
                .map_err(classify_reqwest_error)
        }
        .boxed()
    }
}

/// Map a reqwest failure onto [`TransportError`]
///
/// The URL is stripped before formatting. A native client never sees a
/// cross-origin rejection, so only `Connect` and `Other` come out of here.
fn classify_reqwest_error(err: reqwest::Error) -> TransportError {
    let is_connect = err.is_connect();
    let message = err.without_url().to_string();
    if is_connect {
        TransportError::Connect(message)
    } else {
        TransportError::Other(message)
    }
}
