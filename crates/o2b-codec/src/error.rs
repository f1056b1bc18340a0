/// Errors that can occur while decoding a buffer.
///
/// Encoding never fails; every variant here aborts the whole decode call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The buffer does not start with the o2b marker.
    #[error("invalid marker (expected \"+o2b`\"): not an o2b-encoded buffer")]
    InvalidMarker,

    /// A tag byte outside the known enumeration.
    #[error("unknown tag {tag} at offset {offset}")]
    UnknownTag { tag: u8, offset: usize },

    /// A fixed-size payload or length prefix runs past the end of the frame.
    #[error("truncated record at offset {offset} (needs {needed} bytes, {available} available)")]
    Truncated {
        offset: usize,
        needed: u64,
        available: usize,
    },

    /// A mapping frame whose key and value sequences differ in length.
    #[error("mapping at offset {offset} has {keys} keys but {values} values")]
    MappingLengthMismatch {
        offset: usize,
        keys: usize,
        values: usize,
    },

    /// A mapping frame that is not a pair of sequences with text keys.
    #[error("invalid mapping at offset {offset}: {reason}")]
    InvalidMapping { offset: usize, reason: &'static str },

    /// Text or pattern payload that is not valid UTF-8.
    #[error("invalid UTF-8 in payload at offset {offset}")]
    InvalidUtf8 { offset: usize },

    /// Nested frames exceed the configured depth.
    #[error("nesting exceeds configured max depth ({max})")]
    DepthLimitExceeded { max: usize },

    /// The buffer exceeds the configured maximum input size.
    #[error("input too large ({size} bytes, max {max})")]
    InputTooLarge { size: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, FormatError>;
