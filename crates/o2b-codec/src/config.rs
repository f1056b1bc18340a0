use serde::{Deserialize, Serialize};

/// Default maximum nesting depth accepted by the decoder.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Default maximum decoder input size: 256 MiB.
pub const DEFAULT_MAX_INPUT_SIZE: usize = 256 * 1024 * 1024;

/// How a windowed [`ByteView`](crate::ByteView) is serialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewEncoding {
    /// Serialize the entire backing buffer, ignoring the window.
    #[default]
    BackingBuffer,
    /// Serialize only the viewed range.
    Window,
}

/// Controls codec behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Maximum nested Sequence/Mapping depth when decoding.
    pub max_depth: usize,
    /// Maximum buffer size accepted by the decoder.
    pub max_input_size: usize,
    /// Serialization of windowed views.
    pub view_encoding: ViewEncoding,
    /// When true, invalid UTF-8 in text payloads is replaced with U+FFFD
    /// instead of failing the decode.
    pub lossy_text: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
            view_encoding: ViewEncoding::default(),
            lossy_text: false,
        }
    }
}
