//! JSON:API serializer
//!
//! Wraps every record as a resource object inside a `{"data": [...]}`
//! document. Relationships are only emitted for non-zero foreign keys.

use serde_json::{json, Map, Value};

use super::value::{collect_records, field, flag, has_reference, id_string, rating};
use super::Serializer;

/// JSON:API resource documents
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonApiSerializer;

fn document(payload: Value, f: impl Fn(&Map<String, Value>) -> Value) -> Value {
    match collect_records(&payload, f) {
        Some(data) => json!({ "data": data }),
        None => payload,
    }
}

fn resource(kind: &str, id: Value, attributes: Value) -> Map<String, Value> {
    let mut out = Map::new();
    out.insert("type".to_string(), json!(kind));
    out.insert("id".to_string(), id);
    out.insert("attributes".to_string(), attributes);
    out
}

/// Attach `relationships.<name>` when `key` references something
fn relate(
    out: &mut Map<String, Value>,
    src: &Map<String, Value>,
    key: &str,
    name: &str,
    kind: &str,
) {
    let target = src.get(key);
    if !has_reference(target) {
        return;
    }

    let relationships = out
        .entry("relationships")
        .or_insert_with(|| Value::Object(Map::new()));
    if let Value::Object(relationships) = relationships {
        relationships.insert(
            name.to_string(),
            json!({ "data": { "type": kind, "id": id_string(target) } }),
        );
    }
}

fn category(kind: &'static str) -> impl Fn(&Map<String, Value>) -> Value {
    move |src| {
        let mut out = resource(
            kind,
            id_string(src.get("category_id")),
            json!({ "name": field(src, "category_name") }),
        );
        relate(&mut out, src, "parent_id", "parent", kind);
        Value::Object(out)
    }
}

fn channel(src: &Map<String, Value>) -> Value {
    let mut out = resource(
        "channel",
        id_string(src.get("stream_id")),
        json!({
            "number": field(src, "num"),
            "name": field(src, "name"),
            "icon": field(src, "stream_icon"),
            "epgId": field(src, "epg_channel_id"),
            "isAdult": flag(src.get("is_adult")),
            "hasArchive": flag(src.get("tv_archive")),
        }),
    );
    relate(&mut out, src, "category_id", "category", "channel-category");
    Value::Object(out)
}

fn movie(src: &Map<String, Value>) -> Value {
    let mut out = resource(
        "movie",
        id_string(src.get("stream_id")),
        json!({
            "name": field(src, "name"),
            "icon": field(src, "stream_icon"),
            "rating": rating(src.get("rating")),
            "extension": field(src, "container_extension"),
        }),
    );
    relate(&mut out, src, "category_id", "category", "movie-category");
    Value::Object(out)
}

impl Serializer for JsonApiSerializer {
    fn name(&self) -> &str {
        "JSON:API"
    }

    fn channel_categories(&self, payload: Value) -> Value {
        document(payload, category("channel-category"))
    }

    fn movie_categories(&self, payload: Value) -> Value {
        document(payload, category("movie-category"))
    }

    fn show_categories(&self, payload: Value) -> Value {
        document(payload, category("show-category"))
    }

    fn channels(&self, payload: Value) -> Value {
        document(payload, channel)
    }

    fn movies(&self, payload: Value) -> Value {
        document(payload, movie)
    }
}
