use bytes::Bytes;
use chrono::SecondsFormat;
use o2b_codec::{decode, encode, Mapping, Timestamp, Value, ViewEncoding};
use serde_json::{Map, Number, Value as Json};
use tracing::debug;

use crate::config::{
    BytesRendering, JsonConfig, NonFiniteRendering, TimestampRendering, UndefinedRendering,
};
use crate::error::{JsonError, Result};

/// Largest integer a double holds exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Convert a JSON document into a codec value.
///
/// Objects become mappings in document key order, arrays become sequences,
/// every number becomes a double.
pub fn from_json(json: Json) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Boolean(b),
        Json::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        Json::String(s) => Value::Text(s),
        Json::Array(items) => Value::Sequence(items.into_iter().map(from_json).collect()),
        Json::Object(map) => Value::Mapping(
            map.into_iter()
                .map(|(k, v)| (k, from_json(v)))
                .collect::<Mapping>(),
        ),
    }
}

/// Render a value as JSON.
pub fn to_json(value: &Value, config: &JsonConfig) -> Result<Json> {
    let json = match value {
        Value::Number(n) => number(*n, config)?,
        Value::Text(s) => Json::String(s.clone()),
        Value::Boolean(b) => Json::Bool(*b),
        Value::Null | Value::Undefined | Value::Opaque(_) => Json::Null,
        Value::Timestamp(ts) => timestamp(*ts, config)?,
        Value::Pattern(p) => {
            let mut map = Map::new();
            map.insert("source".to_string(), Json::String(p.source.clone()));
            map.insert("flags".to_string(), Json::String(p.flags.clone()));
            Json::Object(map)
        }
        Value::Sequence(items) => Json::Array(
            items
                .iter()
                .map(|item| to_json(item, config))
                .collect::<Result<_>>()?,
        ),
        Value::Mapping(entries) => {
            let mut map = Map::new();
            for (key, item) in entries.iter() {
                if config.undefined == UndefinedRendering::Omit && is_absent(item) {
                    continue;
                }
                map.insert(key.to_string(), to_json(item, config)?);
            }
            Json::Object(map)
        }
        Value::Bytes(b) => bytes(b, config),
        Value::Blob(blob) => bytes(&blob.bytes, config),
        Value::View(view) => match config.view_encoding {
            ViewEncoding::BackingBuffer => bytes(view.backing(), config),
            ViewEncoding::Window => bytes(&view.window(), config),
        },
        Value::Numeric(arr) => bytes(&arr.to_le_bytes(), config),
    };
    Ok(json)
}

/// Parse a JSON array and encode its elements as the value sequence.
pub fn encode_json_str(json: &str) -> Result<Bytes> {
    match serde_json::from_str::<Json>(json)? {
        Json::Array(items) => {
            let values: Vec<Value> = items.into_iter().map(from_json).collect();
            Ok(encode(&values))
        }
        _ => Err(JsonError::NotAnArray),
    }
}

/// Decode a buffer and render the value sequence as a JSON array.
pub fn decode_to_json(buf: &[u8], config: &JsonConfig) -> Result<Json> {
    let values = decode(buf)?;
    debug!(values = values.len(), "rendering decoded values as JSON");
    let items = values
        .iter()
        .map(|value| to_json(value, config))
        .collect::<Result<Vec<_>>>()?;
    Ok(Json::Array(items))
}

fn is_absent(value: &Value) -> bool {
    matches!(value, Value::Undefined | Value::Opaque(_))
}

fn number(n: f64, config: &JsonConfig) -> Result<Json> {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        // Integral doubles render without a fraction, as `1` rather than `1.0`.
        return Ok(Json::Number(Number::from(n as i64)));
    }
    match Number::from_f64(n) {
        Some(num) => Ok(Json::Number(num)),
        None => match config.non_finite {
            NonFiniteRendering::Null => Ok(Json::Null),
            NonFiniteRendering::Error => Err(JsonError::Unsupported {
                kind: "non-finite number",
            }),
        },
    }
}

fn timestamp(ts: Timestamp, config: &JsonConfig) -> Result<Json> {
    match config.timestamps {
        TimestampRendering::Millis => number(ts.as_millis(), config),
        TimestampRendering::Rfc3339 => Ok(ts
            .to_datetime()
            .map(|dt| Json::String(dt.to_rfc3339_opts(SecondsFormat::Millis, true)))
            .unwrap_or(Json::Null)),
    }
}

fn bytes(b: &[u8], config: &JsonConfig) -> Json {
    let data = Json::Array(b.iter().map(|byte| Json::from(*byte)).collect());
    match config.bytes {
        BytesRendering::Array => data,
        BytesRendering::NodeBuffer => {
            let mut map = Map::new();
            map.insert("type".to_string(), Json::String("Buffer".to_string()));
            map.insert("data".to_string(), data);
            Json::Object(map)
        }
    }
}
