use o2b_codec::FormatError;

/// Errors that can occur when bridging between JSON and o2b values.
#[derive(Debug, thiserror::Error)]
pub enum JsonError {
    /// The input is not valid JSON.
    #[error("invalid JSON: {0}")]
    Serde(#[from] serde_json::Error),

    /// The buffer is not a valid encoding.
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// A value JSON cannot represent under the current config.
    #[error("cannot represent {kind} as JSON")]
    Unsupported { kind: &'static str },

    /// A JSON document used as a value sequence must be an array.
    #[error("expected a top-level JSON array")]
    NotAnArray,
}

pub type Result<T> = std::result::Result<T, JsonError>;
