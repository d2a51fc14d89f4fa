//! Xtream API Error types

/// Result type alias for Xtream client operations
pub type Result<T> = std::result::Result<T, XtreamError>;

/// Errors surfaced by the Xtream client
///
/// Every failure reaches the caller exactly once. Nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum XtreamError {
    /// No response within the configured deadline
    #[error("Request timeout after {timeout_ms}ms (action: {action})")]
    Timeout { action: String, timeout_ms: u64 },

    /// HTTP error (non-2xx status), body not parsed
    #[error("HTTP {status}: {reason}")]
    HttpStatus {
        action: String,
        status: u16,
        reason: String,
    },

    /// The server rejected the cross-origin request
    #[error(
        "CORS error: the server at {server} does not allow cross-origin requests \
         (action: {action}): {reason}"
    )]
    Cors {
        action: String,
        server: String,
        reason: String,
    },

    /// Network/connection error (DNS, refused connection, ...)
    #[error("Network error: unable to connect to {server} (action: {action}): {reason}")]
    Network {
        action: String,
        server: String,
        reason: String,
    },

    /// Response body is not valid JSON
    #[error("Malformed response for action '{action}': {source}")]
    Protocol {
        action: String,
        #[source]
        source: serde_json::Error,
    },

    /// Any other request failure
    #[error("Xtream API request failed (action: {action}): {reason}")]
    RequestFailed { action: String, reason: String },

    /// Caller passed an unsupported value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Base URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl XtreamError {
    /// Whether the request was cut short by the deadline
    pub fn is_timeout(&self) -> bool {
        matches!(self, XtreamError::Timeout { .. })
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            XtreamError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Action the failing request was issued for, if known
    pub fn action(&self) -> Option<&str> {
        match self {
            XtreamError::Timeout { action, .. }
            | XtreamError::HttpStatus { action, .. }
            | XtreamError::Cors { action, .. }
            | XtreamError::Network { action, .. }
            | XtreamError::Protocol { action, .. }
            | XtreamError::RequestFailed { action, .. } => Some(action),
            _ => None,
        }
    }
}
