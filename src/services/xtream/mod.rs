//! Xtream Codes Integration
//!
//! Client for the Xtream Codes Player API v2.
//!
//! # Overview
//!
//! - **API Client**: one async method per Player API action, with the
//!   configured serializer applied to the response
//! - **Playback URLs**: live/movie/series URLs, including catch-up windows
//!
//! Every API call hits:
//! ```text
//! http://server:port/player_api.php?username=X&password=Y&action=...
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use xtream_client::{ClientConfig, XtreamClient, CAMEL_CASE};
//!
//! # async fn run() -> xtream_client::Result<()> {
//! let config = ClientConfig::new("http://example.com:8080", "username", "password")
//!     .with_serializer(CAMEL_CASE.clone());
//! let client = XtreamClient::new(config)?;
//!
//! let categories = client.get_channel_categories().await?;
//! let url = client.channel_url(123, None);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod endpoint;
pub mod error;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use client::{XtreamClient, DEFAULT_VOD_EXTENSION};
pub use endpoint::{base_api_url, build_action_url, build_stream_url};
pub use error::{Result, XtreamError};
pub use transport::{Headers, ReqwestTransport, Transport, TransportError, TransportResponse};
pub use types::{ActionRequest, Operation, QueryValue, StreamKind, StreamLocator, Timeshift};
