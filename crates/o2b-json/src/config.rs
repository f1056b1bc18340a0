use o2b_codec::ViewEncoding;
use serde::{Deserialize, Serialize};

/// How byte payloads are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BytesRendering {
    /// `[104, 105]`
    #[default]
    Array,
    /// `{"type": "Buffer", "data": [104, 105]}`
    NodeBuffer,
}

/// How timestamps are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampRendering {
    /// RFC 3339 with millisecond precision, `null` when out of range.
    #[default]
    Rfc3339,
    /// Milliseconds since the epoch as a number.
    Millis,
}

/// How undefined and unrepresentable values are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndefinedRendering {
    /// Always `null`.
    #[default]
    Null,
    /// Dropped from mappings; `null` inside sequences.
    Omit,
}

/// How NaN and infinities are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonFiniteRendering {
    #[default]
    Null,
    Error,
}

/// Controls JSON rendering of values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonConfig {
    pub bytes: BytesRendering,
    pub timestamps: TimestampRendering,
    pub undefined: UndefinedRendering,
    pub non_finite: NonFiniteRendering,
    /// Which bytes of a windowed view are rendered.
    pub view_encoding: ViewEncoding,
}
