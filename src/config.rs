use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::services::serializer::Serializer;
use crate::services::xtream::{Result, XtreamError};

/// Default request timeout
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default container for live channels
pub const DEFAULT_PREFERRED_FORMAT: &str = "m3u8";

/// Use VLC user agent to avoid IPTV server blocks
pub const DEFAULT_USER_AGENT: &str = "VLC/3.0.20 LibVLC/3.0.20";

/// Client configuration
///
/// Handed to [`XtreamClient::new`](crate::XtreamClient::new) once; the client
/// never mutates it afterwards.
#[derive(Clone)]
pub struct ClientConfig {
    // Panel
    pub base_url: String,
    pub username: String,
    pub password: String,

    // Playback
    pub preferred_format: String,

    // Responses
    pub serializer: Option<Arc<dyn Serializer>>,

    // HTTP
    pub timeout: Duration,
    pub user_agent: String,
    pub accept_invalid_certs: bool,
}

impl ClientConfig {
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            password: password.into(),
            preferred_format: DEFAULT_PREFERRED_FORMAT.to_string(),
            serializer: None,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_invalid_certs: false,
        }
    }

    pub fn with_preferred_format(mut self, format: impl Into<String>) -> Self {
        self.preferred_format = format.into();
        self
    }

    pub fn with_serializer(mut self, serializer: Arc<dyn Serializer>) -> Self {
        self.serializer = Some(serializer);
        self
    }

    /// A zero timeout falls back to [`DEFAULT_TIMEOUT_MS`]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        let timeout_ms = if timeout_ms == 0 {
            DEFAULT_TIMEOUT_MS
        } else {
            timeout_ms
        };
        self.timeout = Duration::from_millis(timeout_ms);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Many panels serve self-signed certificates
    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }

    /// Load configuration from environment variables (and `.env`, if present)
    ///
    /// `XTREAM_URL`, `XTREAM_USERNAME` and `XTREAM_PASSWORD` are required.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let required = |key: &str| {
            env::var(key).map_err(|_| XtreamError::Config(format!("{} is not set", key)))
        };

        let mut config = Self::new(
            required("XTREAM_URL")?,
            required("XTREAM_USERNAME")?,
            required("XTREAM_PASSWORD")?,
        );

        if let Ok(format) = env::var("XTREAM_PREFERRED_FORMAT") {
            config = config.with_preferred_format(format);
        }

        if let Ok(raw) = env::var("XTREAM_TIMEOUT_MS") {
            let timeout_ms = raw.parse().map_err(|_| {
                XtreamError::Config(format!("XTREAM_TIMEOUT_MS is not a number: {}", raw))
            })?;
            config = config.with_timeout_ms(timeout_ms);
        }

        if let Ok(user_agent) = env::var("XTREAM_USER_AGENT") {
            config = config.with_user_agent(user_agent);
        }

        config.accept_invalid_certs = env::var("XTREAM_ACCEPT_INVALID_CERTS")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(config)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("preferred_format", &self.preferred_format)
            .field("serializer", &self.serializer.as_ref().map(|s| s.name()))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}
