//! Standardized serializer
//!
//! Short field names, string ids, real booleans and numeric ratings.

use serde_json::{json, Map, Value};

use super::value::{field, flag, id_string, map_records, rating, reference_string};
use super::Serializer;

/// Stable consumer-friendly shape
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardizedSerializer;

fn category(src: &Map<String, Value>) -> Value {
    json!({
        "id": id_string(src.get("category_id")),
        "name": field(src, "category_name"),
        "parentId": reference_string(src.get("parent_id")),
    })
}

fn channel(src: &Map<String, Value>) -> Value {
    json!({
        "id": id_string(src.get("stream_id")),
        "number": field(src, "num"),
        "name": field(src, "name"),
        "icon": field(src, "stream_icon"),
        "epgId": field(src, "epg_channel_id"),
        "categoryId": id_string(src.get("category_id")),
        "isAdult": flag(src.get("is_adult")),
        "hasArchive": flag(src.get("tv_archive")),
    })
}

fn movie(src: &Map<String, Value>) -> Value {
    json!({
        "id": id_string(src.get("stream_id")),
        "name": field(src, "name"),
        "icon": field(src, "stream_icon"),
        "rating": rating(src.get("rating")),
        "categoryId": id_string(src.get("category_id")),
        "extension": field(src, "container_extension"),
    })
}

impl Serializer for StandardizedSerializer {
    fn name(&self) -> &str {
        "Standardized"
    }

    fn channel_categories(&self, payload: Value) -> Value {
        map_records(payload, category)
    }

    fn movie_categories(&self, payload: Value) -> Value {
        map_records(payload, category)
    }

    fn show_categories(&self, payload: Value) -> Value {
        map_records(payload, category)
    }

    fn channels(&self, payload: Value) -> Value {
        map_records(payload, channel)
    }

    fn movies(&self, payload: Value) -> Value {
        map_records(payload, movie)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::xtream::Operation;

    #[test]
    fn test_category_ids_are_strings() {
        let raw = json!([
            {"category_id": 7, "category_name": "Movies", "parent_id": 0},
            {"category_id": "8", "category_name": "Kids", "parent_id": 7}
        ]);
        let out = StandardizedSerializer.serialize(Operation::MovieCategories, raw);

        assert_eq!(out[0]["id"], json!("7"));
        assert_ne!(out[0]["id"], json!(7));
        assert_eq!(out[0]["parentId"], Value::Null);
        assert_eq!(out[1]["id"], json!("8"));
        assert_eq!(out[1]["parentId"], json!("7"));
    }

    #[test]
    fn test_channel_flags_and_ids() {
        let raw = json!([{
            "num": 1,
            "name": "NASA TV",
            "stream_id": 123,
            "stream_icon": "http://logo",
            "epg_channel_id": "nasa.us",
            "category_id": 7,
            "is_adult": "0",
            "tv_archive": 1
        }]);
        let out = StandardizedSerializer.channels(raw);

        assert_eq!(
            out,
            json!([{
                "id": "123",
                "number": 1,
                "name": "NASA TV",
                "icon": "http://logo",
                "epgId": "nasa.us",
                "categoryId": "7",
                "isAdult": false,
                "hasArchive": true
            }])
        );
    }

    #[test]
    fn test_movie_rating_fallback() {
        let raw = json!([
            {
                "stream_id": 1,
                "name": "A",
                "rating": "8.3",
                "category_id": 2,
                "container_extension": "mkv"
            },
            {"stream_id": 2, "name": "B", "rating": "", "category_id": 2},
            {"stream_id": 3, "name": "C", "rating": 6.5}
        ]);
        let out = StandardizedSerializer.movies(raw);

        assert_eq!(out[0]["rating"], json!(8.3));
        assert_eq!(out[0]["extension"], json!("mkv"));
        assert_eq!(out[1]["rating"], json!(0.0));
        assert_eq!(out[2]["rating"], json!(6.5));
        assert_eq!(out[2]["categoryId"], Value::Null);
    }
}
