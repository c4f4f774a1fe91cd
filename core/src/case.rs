//! Key translation between the camelCase client representation and the
//! snake_case wire representation.
//!
//! Translation renames the keys of a top-level object, or of each object in
//! a top-level array. Nested values keep their keys.

use serde_json::{Map, Value};

pub fn camel_to_snake(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    let mut chars = key.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_lowercase());
    }
    for c in chars {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

pub fn snake_to_camel(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for (i, token) in key.split('_').enumerate() {
        if i == 0 {
            out.push_str(token);
            continue;
        }
        let mut chars = token.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

pub fn keys_to_snake(value: Value) -> Value {
    rename_keys(value, camel_to_snake)
}

pub fn keys_to_camel(value: Value) -> Value {
    rename_keys(value, snake_to_camel)
}

fn rename_keys(value: Value, rename: fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => Value::Object(rename_object(map, rename)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| match item {
                    Value::Object(map) => Value::Object(rename_object(map, rename)),
                    other => other,
                })
                .collect(),
        ),
        other => other,
    }
}

fn rename_object(map: Map<String, Value>, rename: fn(&str) -> String) -> Map<String, Value> {
    map.into_iter().map(|(k, v)| (rename(&k), v)).collect()
}
