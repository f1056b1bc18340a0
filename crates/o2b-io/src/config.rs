use o2b_codec::CodecConfig;
use serde::{Deserialize, Serialize};

/// Default maximum buffer size read from a stream or byte source: 64 MiB.
pub const DEFAULT_MAX_BUFFER_SIZE: usize = 64 * 1024 * 1024;

/// Configuration for stream readers, writers and byte sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Maximum number of bytes read before giving up. Default: 64 MiB.
    pub max_buffer_size: usize,
    /// Codec settings used for encoding and decoding.
    pub codec: CodecConfig,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            max_buffer_size: DEFAULT_MAX_BUFFER_SIZE,
            codec: CodecConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use o2b_codec::ViewEncoding;

    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let config: StreamConfig =
            serde_json::from_str(r#"{"codec":{"max_depth":4,"view_encoding":"window"}}"#).unwrap();

        assert_eq!(config.max_buffer_size, DEFAULT_MAX_BUFFER_SIZE);
        assert_eq!(config.codec.max_depth, 4);
        assert_eq!(config.codec.view_encoding, ViewEncoding::Window);
        assert_eq!(config.codec.max_input_size, CodecConfig::default().max_input_size);
    }

    #[test]
    fn empty_document_is_default() {
        let config: StreamConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, StreamConfig::default());
    }
}
