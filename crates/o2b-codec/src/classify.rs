//! Value classification.
//!
//! Arms are listed in priority order. Mapping comes after every more
//! specific shape; the bytes-like shapes share one tag.

use crate::tag::Tag;
use crate::value::Value;

/// Returns the wire tag for a value. Total: anything without an encoding
/// classifies as [`Tag::Unrepresentable`].
pub fn classify(value: &Value) -> Tag {
    match value {
        Value::Number(_) => Tag::Number,
        Value::Text(_) => Tag::Text,
        Value::Boolean(_) => Tag::Boolean,
        Value::Null => Tag::Null,
        Value::Undefined => Tag::Undefined,
        Value::Timestamp(_) => Tag::Timestamp,
        Value::Pattern(_) => Tag::Pattern,
        Value::Sequence(_) => Tag::Sequence,
        Value::Mapping(_) => Tag::Mapping,
        Value::Bytes(_) | Value::Blob(_) | Value::View(_) | Value::Numeric(_) => Tag::Bytes,
        Value::Opaque(_) => Tag::Unrepresentable,
    }
}
