//! Response serializers
//!
//! Xtream panels answer with loosely typed snake_case JSON. A [`Serializer`]
//! reshapes those payloads before they reach application code. Each
//! operation has its own method; anything a serializer does not override is
//! returned untouched.
//!
//! Three shapes ship with the crate ([`CAMEL_CASE`], [`STANDARDIZED`],
//! [`JSON_API`]); [`define_serializers`] builds a custom bundle from a map of
//! closures.

mod camel_case;
mod json_api;
mod standardized;
mod value;

use lazy_static::lazy_static;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::services::xtream::Operation;

pub use camel_case::CamelCaseSerializer;
pub use json_api::JsonApiSerializer;
pub use standardized::StandardizedSerializer;

/// Payload transform for a single operation
pub type Transform = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Per-operation payload reshaping
///
/// Every method defaults to identity.
pub trait Serializer: Send + Sync {
    /// Display name of the bundle
    fn name(&self) -> &str;

    fn profile(&self, payload: Value) -> Value {
        payload
    }

    fn server_info(&self, payload: Value) -> Value {
        payload
    }

    fn channel_categories(&self, payload: Value) -> Value {
        payload
    }

    fn channels(&self, payload: Value) -> Value {
        payload
    }

    fn movie_categories(&self, payload: Value) -> Value {
        payload
    }

    fn movies(&self, payload: Value) -> Value {
        payload
    }

    fn movie(&self, payload: Value) -> Value {
        payload
    }

    fn show_categories(&self, payload: Value) -> Value {
        payload
    }

    fn shows(&self, payload: Value) -> Value {
        payload
    }

    fn show(&self, payload: Value) -> Value {
        payload
    }

    fn short_epg(&self, payload: Value) -> Value {
        payload
    }

    fn full_epg(&self, payload: Value) -> Value {
        payload
    }

    /// Dispatch on the operation tag
    fn serialize(&self, operation: Operation, payload: Value) -> Value {
        match operation {
            Operation::Profile => self.profile(payload),
            Operation::ServerInfo => self.server_info(payload),
            Operation::ChannelCategories => self.channel_categories(payload),
            Operation::Channels => self.channels(payload),
            Operation::MovieCategories => self.movie_categories(payload),
            Operation::Movies => self.movies(payload),
            Operation::Movie => self.movie(payload),
            Operation::ShowCategories => self.show_categories(payload),
            Operation::Shows => self.shows(payload),
            Operation::Show => self.show(payload),
            Operation::ShortEpg => self.short_epg(payload),
            Operation::FullEpg => self.full_epg(payload),
        }
    }
}

/// Run `payload` through `serializer`, or hand it back unchanged
///
/// The output is not validated.
pub fn apply(serializer: Option<&dyn Serializer>, payload: Value, operation: Operation) -> Value {
    match serializer {
        Some(serializer) => serializer.serialize(operation, payload),
        None => payload,
    }
}

/// Serializer assembled from caller-supplied closures
#[derive(Clone)]
pub struct SerializerBundle {
    name: String,
    transforms: HashMap<Operation, Transform>,
}

impl SerializerBundle {
    /// Whether a transform is registered for `operation`
    pub fn covers(&self, operation: Operation) -> bool {
        self.transforms.contains_key(&operation)
    }
}

impl fmt::Debug for SerializerBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut covered: Vec<_> = self.transforms.keys().map(|op| op.name()).collect();
        covered.sort_unstable();
        f.debug_struct("SerializerBundle")
            .field("name", &self.name)
            .field("transforms", &covered)
            .finish()
    }
}

impl Serializer for SerializerBundle {
    fn name(&self) -> &str {
        &self.name
    }

    fn serialize(&self, operation: Operation, payload: Value) -> Value {
        match self.transforms.get(&operation) {
            Some(transform) => transform(payload),
            None => payload,
        }
    }
}

/// Build a custom serializer bundle
///
/// ```
/// use std::collections::HashMap;
/// use std::sync::Arc;
/// use serde_json::{json, Value};
/// use xtream_client::{define_serializers, Operation, Serializer, Transform};
///
/// let mut transforms: HashMap<Operation, Transform> = HashMap::new();
/// transforms.insert(
///     Operation::Channels,
///     Arc::new(|payload: Value| json!({ "count": payload.as_array().map_or(0, |a| a.len()) })),
/// );
///
/// let bundle = define_serializers("Counting", transforms);
/// assert_eq!(bundle.serialize(Operation::Channels, json!([1, 2])), json!({ "count": 2 }));
/// ```
pub fn define_serializers(
    name: impl Into<String>,
    transforms: HashMap<Operation, Transform>,
) -> SerializerBundle {
    SerializerBundle {
        name: name.into(),
        transforms,
    }
}

lazy_static! {
    /// snake_case keys renamed to camelCase
    pub static ref CAMEL_CASE: Arc<dyn Serializer> = Arc::new(CamelCaseSerializer);
    /// String ids, real booleans, numeric ratings
    pub static ref STANDARDIZED: Arc<dyn Serializer> = Arc::new(StandardizedSerializer);
    /// JSON:API resource documents
    pub static ref JSON_API: Arc<dyn Serializer> = Arc::new(JsonApiSerializer);
}
