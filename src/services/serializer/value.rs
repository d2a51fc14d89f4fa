//! Coercions shared by the built-in serializers
//!
//! Panels disagree on whether ids are numbers or strings and whether flags are
//! `0`/`1`, `"0"`/`"1"` or booleans. These helpers absorb that.

use serde_json::{Map, Value};

/// Apply `f` to every record of a list payload
///
/// Anything that is not an array is returned unchanged.
pub(super) fn map_records<F>(payload: Value, f: F) -> Value
where
    F: Fn(&Map<String, Value>) -> Value,
{
    match payload {
        Value::Array(items) => Value::Array(items.iter().map(|item| record(item, &f)).collect()),
        other => other,
    }
}

/// Like [`map_records`], but returns the mapped records as a `Vec`
pub(super) fn collect_records<F>(payload: &Value, f: F) -> Option<Vec<Value>>
where
    F: Fn(&Map<String, Value>) -> Value,
{
    payload
        .as_array()
        .map(|items| items.iter().map(|item| record(item, &f)).collect())
}

fn record<F>(item: &Value, f: &F) -> Value
where
    F: Fn(&Map<String, Value>) -> Value,
{
    match item {
        Value::Object(map) => f(map),
        // Non-object entries are treated as empty records
        _ => f(&Map::new()),
    }
}

/// Copy `from` to `to` when the source key exists
pub(super) fn rename(out: &mut Map<String, Value>, src: &Map<String, Value>, from: &str, to: &str) {
    if let Some(value) = src.get(from) {
        out.insert(to.to_string(), value.clone());
    }
}

/// Field value, or `null` when missing
pub(super) fn field(src: &Map<String, Value>, key: &str) -> Value {
    src.get(key).cloned().unwrap_or(Value::Null)
}

/// Identifier as a string; missing/null stays `null`
pub(super) fn id_string(value: Option<&Value>) -> Value {
    match value {
        None | Some(Value::Null) => Value::Null,
        Some(Value::String(s)) => Value::String(s.clone()),
        Some(other) => Value::String(scalar_text(other)),
    }
}

/// Whether a foreign key points somewhere (present, not null, not zero)
pub(super) fn has_reference(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::String(s)) => {
            let s = s.trim();
            !s.is_empty() && s.parse::<f64>().map(|f| f != 0.0).unwrap_or(true)
        }
        Some(_) => true,
    }
}

/// Reference id as a string, or `null` when there is none
pub(super) fn reference_string(value: Option<&Value>) -> Value {
    if has_reference(value) {
        id_string(value)
    } else {
        Value::Null
    }
}

/// Boolean-like flag (`0`/`1`, `"0"`/`"1"`, `"true"`, ...) as a real boolean
pub(super) fn flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::String(s)) if s.trim().eq_ignore_ascii_case("false") => false,
        other => has_reference(other),
    }
}

/// Rating as a float; `0` when it cannot be parsed
pub(super) fn rating(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => leading_float(s),
        _ => None,
    };
    parsed.filter(|f| f.is_finite()).unwrap_or(0.0)
}

/// Parse the longest numeric prefix of `s` (`"7.5/10"` → `7.5`)
fn leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    for (i, c) in s.char_indices() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            '+' | '-' if i == 0 => {}
            _ => break,
        }
        end = i + c.len_utf8();
    }

    if !seen_digit {
        return None;
    }
    s[..end].trim_end_matches('.').parse().ok()
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
