//! Mapping stored documents to their public JSON shape
//!
//! The internal `_id` becomes a string `id`; ObjectIds anywhere become hex
//! strings and dates become RFC 3339 strings.

use bson::{Bson, Document};
use serde_json::{Map, Value};

use super::mongo::id_to_string;

/// Public JSON form of a stored document
pub fn to_public(mut document: Document) -> Value {
    let id = document.remove("_id");

    let mut object: Map<String, Value> = document
        .into_iter()
        .map(|(key, value)| (key, public_value(value)))
        .collect();

    if let Some(id) = id {
        object.insert("id".to_string(), Value::String(id_to_string(id)));
    }

    Value::Object(object)
}

fn public_value(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => dt
            .try_to_rfc3339_string()
            .map(Value::String)
            .unwrap_or(Value::Null),
        Bson::Document(inner) => Value::Object(
            inner
                .into_iter()
                .map(|(key, value)| (key, public_value(value)))
                .collect(),
        ),
        Bson::Array(items) => Value::Array(items.into_iter().map(public_value).collect()),
        other => other.into_relaxed_extjson(),
    }
}
