//! Xtream Codes API Client
//!
//! HTTP client for making requests to Xtream Codes Player API v2.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error};
use url::Url;

use super::endpoint::{base_api_url, build_action_url, build_stream_url};
use super::error::{Result, XtreamError};
use super::transport::{Headers, ReqwestTransport, Transport, TransportError};
use super::types::{ActionRequest, Operation, StreamKind, StreamLocator, Timeshift};
use crate::config::ClientConfig;
use crate::services::serializer;

/// Container used for movies and episodes when the caller does not pick one
pub const DEFAULT_VOD_EXTENSION: &str = "mp4";

/// Outcome of the HTTP exchange, before JSON parsing
enum Exchange {
    Body(Vec<u8>),
    Status(u16, String),
}

/// Xtream API Client
///
/// Provides methods for all Xtream Player API v2 endpoints. Cloning is cheap;
/// clones share the configuration and the transport.
#[derive(Clone)]
pub struct XtreamClient {
    config: Arc<ClientConfig>,
    base_api_url: Url,
    headers: Arc<Headers>,
    transport: Arc<dyn Transport>,
}

impl XtreamClient {
    /// Create a new Xtream client backed by reqwest
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client on top of a custom transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        let base_api_url = base_api_url(&config)?;
        let headers = vec![
            ("Accept", "application/json".to_string()),
            ("Cache-Control", "no-cache".to_string()),
            ("User-Agent", config.user_agent.clone()),
        ];

        Ok(Self {
            config: Arc::new(config),
            base_api_url,
            headers: Arc::new(headers),
            transport,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `player_api.php` URL with credentials
    pub fn base_api_url(&self) -> &Url {
        &self.base_api_url
    }

    /// Perform one Player API call and return the raw JSON
    ///
    /// No serializer is applied here.
    pub async fn request(&self, request: ActionRequest) -> Result<Value> {
        let url = build_action_url(&self.base_api_url, &request);
        let action = request.action;

        debug!("Xtream API request: {}", action);

        let outcome = tokio::time::timeout(self.config.timeout, self.exchange(&url)).await;

        let body = match outcome {
            Err(_) => {
                error!("Xtream API request timed out for action '{}'", action);
                return Err(XtreamError::Timeout {
                    action,
                    timeout_ms: self.config.timeout_ms(),
                });
            }
            Ok(Ok(Exchange::Body(body))) => body,
            Ok(Ok(Exchange::Status(status, reason))) => {
                error!("Xtream API returned HTTP {} for action '{}'", status, action);
                return Err(XtreamError::HttpStatus {
                    action,
                    status,
                    reason,
                });
            }
            Ok(Err(e)) => return Err(self.classify_transport_error(&action, e)),
        };

        let data: Value = serde_json::from_slice(&body).map_err(|e| {
            error!(
                "Failed to parse Xtream response for action '{}': {}",
                action, e
            );
            debug!(
                "Response text: {}",
                String::from_utf8_lossy(&body[..body.len().min(500)])
            );
            XtreamError::Protocol {
                action: action.clone(),
                source: e,
            }
        })?;

        debug!("Xtream API request successful for action: {}", action);
        Ok(data)
    }

    /// GET the URL; the body is only read for 2xx responses
    async fn exchange(&self, url: &Url) -> std::result::Result<Exchange, TransportError> {
        let response = self.transport.get(url, &self.headers).await?;

        let status = response.status();
        if !(200..300).contains(&status) {
            return Ok(Exchange::Status(status, response.reason()));
        }

        Ok(Exchange::Body(response.body().await?))
    }

    fn classify_transport_error(&self, action: &str, err: TransportError) -> XtreamError {
        error!("Xtream API transport failure for action '{}': {}", action, err);
        let action = action.to_string();
        let server = self.config.base_url.clone();
        match err {
            TransportError::Connect(reason) => XtreamError::Network {
                action,
                server,
                reason,
            },
            TransportError::Cors(reason) => XtreamError::Cors {
                action,
                server,
                reason,
            },
            TransportError::Other(reason) => XtreamError::RequestFailed { action, reason },
        }
    }

    /// Dispatch and run the payload through the configured serializer
    async fn call(&self, operation: Operation, request: ActionRequest) -> Result<Value> {
        let data = self.request(request).await?;
        Ok(serializer::apply(
            self.config.serializer.as_deref(),
            data,
            operation,
        ))
    }

    async fn call_plain(&self, operation: Operation) -> Result<Value> {
        self.call(operation, ActionRequest::for_operation(operation))
            .await
    }

    // ========================================================================
    // Profile
    // ========================================================================

    /// Get user and server info (`user_info` + `server_info`)
    pub async fn get_profile(&self) -> Result<Value> {
        self.call_plain(Operation::Profile).await
    }

    pub async fn get_server_info(&self) -> Result<Value> {
        self.call_plain(Operation::ServerInfo).await
    }

    // ========================================================================
    // Live Streams
    // ========================================================================

    /// Get live stream categories
    pub async fn get_channel_categories(&self) -> Result<Value> {
        self.call_plain(Operation::ChannelCategories).await
    }

    /// Get live streams, optionally restricted to one category
    pub async fn get_channels(&self, category_id: Option<i64>) -> Result<Value> {
        let request = ActionRequest::for_operation(Operation::Channels)
            .param("category_id", category_id);
        self.call(Operation::Channels, request).await
    }

    // ========================================================================
    // VOD (Movies)
    // ========================================================================

    /// Get VOD categories
    pub async fn get_movie_categories(&self) -> Result<Value> {
        self.call_plain(Operation::MovieCategories).await
    }

    /// Get VOD streams, optionally restricted to one category
    pub async fn get_movies(&self, category_id: Option<i64>) -> Result<Value> {
        let request =
            ActionRequest::for_operation(Operation::Movies).param("category_id", category_id);
        self.call(Operation::Movies, request).await
    }

    /// Get detailed VOD info (`info` + `movie_data`)
    pub async fn get_movie(&self, movie_id: i64) -> Result<Value> {
        let request =
            ActionRequest::for_operation(Operation::Movie).param("vod_id", Some(movie_id));
        self.call(Operation::Movie, request).await
    }

    // ========================================================================
    // Series
    // ========================================================================

    /// Get series categories
    pub async fn get_show_categories(&self) -> Result<Value> {
        self.call_plain(Operation::ShowCategories).await
    }

    /// Get series, optionally restricted to one category
    pub async fn get_shows(&self, category_id: Option<i64>) -> Result<Value> {
        let request =
            ActionRequest::for_operation(Operation::Shows).param("category_id", category_id);
        self.call(Operation::Shows, request).await
    }

    /// Get detailed series info with seasons and episodes
    pub async fn get_show(&self, show_id: i64) -> Result<Value> {
        let request =
            ActionRequest::for_operation(Operation::Show).param("series_id", Some(show_id));
        self.call(Operation::Show, request).await
    }

    // ========================================================================
    // EPG
    // ========================================================================

    /// Get short EPG for a stream (next few programmes)
    pub async fn get_short_epg(&self, channel_id: i64, limit: Option<u32>) -> Result<Value> {
        let request = ActionRequest::for_operation(Operation::ShortEpg)
            .param("stream_id", Some(channel_id))
            .param("limit", limit);
        self.call(Operation::ShortEpg, request).await
    }

    /// Get the full EPG table for a stream
    pub async fn get_full_epg(&self, channel_id: i64) -> Result<Value> {
        let request =
            ActionRequest::for_operation(Operation::FullEpg).param("stream_id", Some(channel_id));
        self.call(Operation::FullEpg, request).await
    }

    // ========================================================================
    // Playback URLs
    // ========================================================================

    /// Build a playback URL (no network access)
    pub fn stream_url(&self, locator: &StreamLocator) -> String {
        build_stream_url(&self.config, locator)
    }

    /// Live channel URL; defaults to the preferred format
    pub fn channel_url(&self, stream_id: i64, extension: Option<&str>) -> String {
        let extension = extension.unwrap_or(&self.config.preferred_format);
        self.stream_url(&StreamLocator::new(StreamKind::Channel, stream_id, extension))
    }

    /// Catch-up URL for a live channel
    pub fn channel_timeshift_url(
        &self,
        stream_id: i64,
        start: DateTime<Utc>,
        duration: i64,
        extension: Option<&str>,
    ) -> String {
        let extension = extension.unwrap_or(&self.config.preferred_format);
        let locator = StreamLocator::new(StreamKind::Channel, stream_id, extension)
            .with_timeshift(Timeshift::new(start, duration));
        self.stream_url(&locator)
    }

    pub fn movie_url(&self, stream_id: i64, extension: Option<&str>) -> String {
        let extension = extension.unwrap_or(DEFAULT_VOD_EXTENSION);
        self.stream_url(&StreamLocator::new(StreamKind::Movie, stream_id, extension))
    }

    pub fn episode_url(&self, stream_id: i64, extension: Option<&str>) -> String {
        let extension = extension.unwrap_or(DEFAULT_VOD_EXTENSION);
        self.stream_url(&StreamLocator::new(StreamKind::Episode, stream_id, extension))
    }
}

impl std::fmt::Debug for XtreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XtreamClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
