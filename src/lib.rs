//! Client for Xtream Codes IPTV panels.
//!
//! [`XtreamClient`] issues Player API calls (`player_api.php`) and hands the
//! JSON back, optionally reshaped by a [`Serializer`]. Playback URLs for
//! live channels, movies and episodes are built locally without any request.

pub mod config;
pub mod services;

pub use config::ClientConfig;
pub use services::serializer::{
    apply, define_serializers, CamelCaseSerializer, JsonApiSerializer, Serializer,
    SerializerBundle, StandardizedSerializer, Transform, CAMEL_CASE, JSON_API, STANDARDIZED,
};
pub use services::xtream::{
    build_stream_url, ActionRequest, Operation, QueryValue, Result, StreamKind, StreamLocator,
    Timeshift, Transport, TransportError, TransportResponse, XtreamClient, XtreamError,
};
