// JSON decoding of syntax trees
//
// Stored definitions keep their AST as JSON. Older producers used a few alternative
// kind names and occasionally kinds this crate does not know about, so decoding first
// rewrites every unknown kind into an `unrecognized` node that keeps the original
// kind name and payload.

use super::Node;
use serde_json::{Map, Value};

/// Every `type` tag the derived deserializer understands, aliases included.
pub const KNOWN_KINDS: &[&str] = &[
    "list",
    "vector",
    "map",
    "set",
    "symbol",
    "keyword",
    "number",
    "integer",
    "float",
    "IntLiteral",
    "FloatLiteral",
    "string",
    "StringLiteral",
    "character",
    "boolean",
    "BooleanLiteral",
    "nil",
    "regex",
    "ratio",
    "quote",
    "syntax-quote",
    "unquote",
    "unquote-splicing",
    "deref",
    "var",
    "var-quote",
    "meta",
    "with-meta",
    "anonymous-function",
    "fn",
    "discard",
    "tagged-literal",
    "unrecognized",
];

/// Decode either a single node or an array of nodes.
pub fn from_str(input: &str) -> serde_json::Result<Vec<Node>> {
    let value: Value = serde_json::from_str(input)?;
    from_value(value)
}

pub fn from_value(value: Value) -> serde_json::Result<Vec<Node>> {
    match normalize(value) {
        Value::Array(elements) => elements
            .into_iter()
            .map(serde_json::from_value)
            .collect(),
        single => Ok(vec![serde_json::from_value(single)?]),
    }
}

pub fn to_string(forms: &[Node]) -> serde_json::Result<String> {
    serde_json::to_string(forms)
}

pub fn to_string_pretty(forms: &[Node]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(forms)
}

fn normalize(value: Value) -> Value {
    match value {
        Value::Array(elements) => Value::Array(elements.into_iter().map(normalize).collect()),
        Value::Object(fields) => Value::Object(normalize_object(fields)),
        other => other,
    }
}

fn normalize_object(fields: Map<String, Value>) -> Map<String, Value> {
    let mut fields: Map<String, Value> = fields
        .into_iter()
        .map(|(k, v)| (k, normalize(v)))
        .collect();

    let kind = match fields.get("type") {
        Some(Value::String(kind)) => kind.clone(),
        // map entries and plain data
        _ => return fields,
    };

    if !KNOWN_KINDS.contains(&kind.as_str()) {
        return unrecognized(kind, fields);
    }

    if !payload_fits(&kind, &fields) {
        log::warn!("Malformed {} node, keeping its payload as is", kind);
        return unrecognized(kind, fields);
    }

    fields
}

fn unrecognized(kind: String, mut fields: Map<String, Value>) -> Map<String, Value> {
    let payload = fields.remove("value").unwrap_or(Value::Null);
    let mut rewritten = Map::new();
    rewritten.insert("type".to_string(), Value::String("unrecognized".to_string()));
    rewritten.insert("kind".to_string(), Value::String(kind));
    rewritten.insert("value".to_string(), payload);
    rewritten
}

#[inline]
fn is_node(value: &Value) -> bool {
    matches!(value.get("type"), Some(Value::String(_)))
}

fn all_nodes(value: &Value) -> bool {
    value
        .as_array()
        .map_or(false, |elements| elements.iter().all(is_node))
}

fn is_map_entry(entry: &Value) -> bool {
    match (entry.get("key"), entry.get("value")) {
        (Some(key), Some(value)) => is_node(key) && is_node(value),
        _ => false,
    }
}

/// Whether the fields of an already normalized node of a known `kind` decode as that kind.
/// Children that did not fit were rewritten before, so only this node's own shape is checked.
fn payload_fits(kind: &str, fields: &Map<String, Value>) -> bool {
    let value = fields.get("value");

    match kind {
        "list" | "vector" | "set" | "anonymous-function" | "fn" => value.map_or(true, all_nodes),
        "map" => value.map_or(true, |entries| {
            entries
                .as_array()
                .map_or(false, |entries| entries.iter().all(is_map_entry))
        }),
        "symbol" => {
            let annotation_fits = match fields.get("symbolType") {
                None | Some(Value::Null) => true,
                Some(Value::String(t)) => matches!(t.as_str(), "local" | "builtin" | "unknown"),
                Some(_) => false,
            };
            annotation_fits && value.map_or(false, Value::is_string)
        }
        "keyword" | "string" | "StringLiteral" | "character" | "regex" | "ratio" => {
            value.map_or(false, Value::is_string)
        }
        "number" | "integer" | "float" | "IntLiteral" | "FloatLiteral" => {
            value.map_or(false, Value::is_number)
        }
        "boolean" | "BooleanLiteral" => value.map_or(false, Value::is_boolean),
        "nil" => true,
        "meta" | "with-meta" => value.map_or(false, |pair| {
            pair.as_array()
                .map_or(false, |pair| pair.len() == 2 && pair.iter().all(is_node))
        }),
        "tagged-literal" => {
            matches!(fields.get("tag"), Some(Value::String(_))) && value.map_or(false, is_node)
        }
        "unrecognized" => matches!(fields.get("kind"), Some(Value::String(_))),
        // quote, syntax-quote, unquote, unquote-splicing, deref, var, var-quote, discard
        _ => value.map_or(false, is_node),
    }
}
