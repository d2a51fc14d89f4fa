//! Xtream Codes API Types
//!
//! Request-side types for the Xtream Codes Player API v2: operation tags,
//! query parameters and stream locators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::XtreamError;

// ============================================================================
// Operations
// ============================================================================

/// Every Player API call the client knows about
///
/// The tag is used both to pick the wire `action` and to select the matching
/// serializer transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    Profile,
    ServerInfo,
    ChannelCategories,
    Channels,
    MovieCategories,
    Movies,
    Movie,
    ShowCategories,
    Shows,
    Show,
    ShortEpg,
    FullEpg,
}

impl Operation {
    /// All operations, in facade order
    pub const ALL: [Operation; 12] = [
        Operation::Profile,
        Operation::ServerInfo,
        Operation::ChannelCategories,
        Operation::Channels,
        Operation::MovieCategories,
        Operation::Movies,
        Operation::Movie,
        Operation::ShowCategories,
        Operation::Shows,
        Operation::Show,
        Operation::ShortEpg,
        Operation::FullEpg,
    ];

    /// Value of the `action` query parameter
    pub fn action(&self) -> &'static str {
        match self {
            Operation::Profile => "get_profile",
            Operation::ServerInfo => "get_server_info",
            Operation::ChannelCategories => "get_live_categories",
            Operation::Channels => "get_live_streams",
            Operation::MovieCategories => "get_vod_categories",
            Operation::Movies => "get_vod_streams",
            Operation::Movie => "get_vod_info",
            Operation::ShowCategories => "get_series_categories",
            Operation::Shows => "get_series",
            Operation::Show => "get_series_info",
            Operation::ShortEpg => "get_short_epg",
            Operation::FullEpg => "get_simple_data_table",
        }
    }

    /// Serializer-facing name (camelCase)
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Profile => "profile",
            Operation::ServerInfo => "serverInfo",
            Operation::ChannelCategories => "channelCategories",
            Operation::Channels => "channels",
            Operation::MovieCategories => "movieCategories",
            Operation::Movies => "movies",
            Operation::Movie => "movie",
            Operation::ShowCategories => "showCategories",
            Operation::Shows => "shows",
            Operation::Show => "show",
            Operation::ShortEpg => "shortEPG",
            Operation::FullEpg => "fullEPG",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Scalar query parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Int(i64),
    Text(String),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Int(n) => write!(f, "{}", n),
            QueryValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Int(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::Int(i64::from(value))
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Text(value)
    }
}

/// One Player API call: an action plus optional parameters
///
/// Parameters holding `None` are skipped when the URL is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    pub action: String,
    pub parameters: Vec<(String, Option<QueryValue>)>,
}

impl ActionRequest {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            parameters: Vec::new(),
        }
    }

    pub fn for_operation(operation: Operation) -> Self {
        Self::new(operation.action())
    }

    /// Add a parameter; `None` values are carried but never emitted
    pub fn param<V: Into<QueryValue>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.parameters.push((key.into(), value.map(Into::into)));
        self
    }

    /// Parameters that will actually be sent
    pub fn present_parameters(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.parameters
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (k.as_str(), v)))
    }
}

// ============================================================================
// Stream Locators
// ============================================================================

/// Content kind of a playback URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    Channel,
    Movie,
    Episode,
}

impl StreamKind {
    /// Path segment used by the panel for this kind
    pub fn path_segment(&self) -> &'static str {
        match self {
            StreamKind::Channel => "live",
            StreamKind::Movie => "movie",
            StreamKind::Episode => "series",
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKind::Channel => write!(f, "channel"),
            StreamKind::Movie => write!(f, "movie"),
            StreamKind::Episode => write!(f, "episode"),
        }
    }
}

impl FromStr for StreamKind {
    type Err = XtreamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "channel" => Ok(StreamKind::Channel),
            "movie" => Ok(StreamKind::Movie),
            "episode" => Ok(StreamKind::Episode),
            other => Err(XtreamError::InvalidArgument(format!(
                "Unsupported stream type: {}",
                other
            ))),
        }
    }
}

/// Catch-up window for live channels
///
/// Both fields must be set for the window to be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timeshift {
    pub start: Option<DateTime<Utc>>,
    /// Duration as understood by the panel (minutes by convention)
    pub duration: Option<i64>,
}

impl Timeshift {
    pub fn new(start: DateTime<Utc>, duration: i64) -> Self {
        Self {
            start: Some(start),
            duration: Some(duration),
        }
    }

    /// `(utc seconds, duration)` when the window is complete
    pub fn window(&self) -> Option<(i64, i64)> {
        Some((self.start?.timestamp(), self.duration?))
    }
}

/// Everything needed to build a playback URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamLocator {
    pub kind: StreamKind,
    pub stream_id: i64,
    pub extension: String,
    pub timeshift: Option<Timeshift>,
}

impl StreamLocator {
    pub fn new(kind: StreamKind, stream_id: i64, extension: impl Into<String>) -> Self {
        Self {
            kind,
            stream_id,
            extension: extension.into(),
            timeshift: None,
        }
    }

    pub fn with_timeshift(mut self, timeshift: Timeshift) -> Self {
        self.timeshift = Some(timeshift);
        self
    }
}
