//! camelCase serializer
//!
//! Renames the snake_case keys of category, channel and movie listings one to
//! one. Values are left as the panel sent them.

use serde_json::{json, Map, Value};

use super::value::{map_records, rename};
use super::Serializer;

const CHANNEL_FIELDS: &[(&str, &str)] = &[
    ("stream_id", "streamId"),
    ("num", "num"),
    ("name", "name"),
    ("stream_type", "streamType"),
    ("stream_icon", "streamIcon"),
    ("epg_channel_id", "epgChannelId"),
    ("added", "added"),
    ("is_adult", "isAdult"),
    ("category_id", "categoryId"),
    ("custom_sid", "customSid"),
    ("tv_archive", "tvArchive"),
    ("direct_source", "directSource"),
    ("tv_archive_duration", "tvArchiveDuration"),
];

const MOVIE_FIELDS: &[(&str, &str)] = &[
    ("stream_id", "streamId"),
    ("name", "name"),
    ("stream_icon", "streamIcon"),
    ("rating", "rating"),
    ("rating_5based", "rating5based"),
    ("added", "added"),
    ("category_id", "categoryId"),
    ("container_extension", "containerExtension"),
    ("custom_sid", "customSid"),
    ("direct_source", "directSource"),
];

/// snake_case → camelCase key renaming
#[derive(Debug, Clone, Copy, Default)]
pub struct CamelCaseSerializer;

fn category(src: &Map<String, Value>) -> Value {
    let mut out = Map::new();
    rename(&mut out, src, "category_id", "categoryId");
    rename(&mut out, src, "category_name", "categoryName");
    let parent = match src.get("parent_id") {
        None | Some(Value::Null) => json!(0),
        Some(parent) => parent.clone(),
    };
    out.insert("parentId".to_string(), parent);
    Value::Object(out)
}

fn renamed(src: &Map<String, Value>, fields: &[(&str, &str)]) -> Map<String, Value> {
    let mut out = Map::new();
    for (from, to) in fields {
        rename(&mut out, src, from, to);
    }
    out
}

fn channel(src: &Map<String, Value>) -> Value {
    let mut out = renamed(src, CHANNEL_FIELDS);
    let category_ids = match src.get("category_ids") {
        None | Some(Value::Null) => json!([]),
        Some(ids) => ids.clone(),
    };
    out.insert("categoryIds".to_string(), category_ids);
    Value::Object(out)
}

fn movie(src: &Map<String, Value>) -> Value {
    Value::Object(renamed(src, MOVIE_FIELDS))
}

impl Serializer for CamelCaseSerializer {
    fn name(&self) -> &str {
        "CamelCase"
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
    use std::collections::BTreeSet;

    fn camel_to_snake(key: &str) -> String {
        match key {
            "rating5based" => "rating_5based".to_string(),
            _ => key.chars().fold(String::new(), |mut acc, c| {
                if c.is_ascii_uppercase() {
                    acc.push('_');
                    acc.push(c.to_ascii_lowercase());
                } else {
                    acc.push(c);
                }
                acc
            }),
        }
    }

    fn keys(value: &Value) -> BTreeSet<String> {
        value.as_object().unwrap().keys().cloned().collect()
    }

    #[test]
    fn test_categories() {
        let raw = json!([
            {"category_id": 1, "category_name": "News & Information", "parent_id": 0},
            {"category_id": "2", "category_name": "Sports"}
        ]);

        for op in [
            Operation::ChannelCategories,
            Operation::MovieCategories,
            Operation::ShowCategories,
        ] {
            let out = CamelCaseSerializer.serialize(op, raw.clone());
            assert_eq!(
                out,
                json!([
                    {"categoryId": 1, "categoryName": "News & Information", "parentId": 0},
                    {"categoryId": "2", "categoryName": "Sports", "parentId": 0}
                ])
            );
        }
    }

    #[test]
    fn test_channels_default_category_ids() {
        let raw = json!([
            {"stream_id": 123, "name": "NASA TV", "category_id": 1, "tv_archive": 1},
            {"stream_id": 124, "name": "Multi", "category_ids": [1, 4]}
        ]);
        let out = CamelCaseSerializer.channels(raw);

        assert_eq!(out[0]["streamId"], json!(123));
        assert_eq!(out[0]["tvArchive"], json!(1));
        assert_eq!(out[0]["categoryIds"], json!([]));
        assert_eq!(out[1]["categoryIds"], json!([1, 4]));
        assert!(out[0].get("stream_id").is_none());
    }

    #[test]
    fn test_key_bijection() {
        let channel = json!({
            "stream_id": 1, "num": 1, "name": "A", "stream_type": "live",
            "stream_icon": "i", "epg_channel_id": "e", "added": "0", "is_adult": "0",
            "category_id": "3", "category_ids": [3], "custom_sid": "", "tv_archive": 0,
            "direct_source": "", "tv_archive_duration": 0
        });
        let movie = json!({
            "stream_id": 2, "name": "B", "stream_icon": "i", "rating": "8.3",
            "rating_5based": 4.1, "added": "0", "category_id": "4",
            "container_extension": "mp4", "custom_sid": "", "direct_source": ""
        });

        for (op, raw) in [(Operation::Channels, channel), (Operation::Movies, movie)] {
            let out = CamelCaseSerializer.serialize(op, json!([raw.clone()]));
            let recovered: BTreeSet<String> =
                keys(&out[0]).iter().map(|k| camel_to_snake(k)).collect();
            assert_eq!(recovered, keys(&raw), "{}", op);
        }
    }

    #[test]
    fn test_uncovered_operations_untouched() {
        let raw = json!({"info": {"movie_image": "x"}, "movie_data": {"stream_id": 1}});
        assert_eq!(CamelCaseSerializer.serialize(Operation::Movie, raw.clone()), raw);
    }
}
