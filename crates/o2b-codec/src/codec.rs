use bytes::{BufMut, Bytes, BytesMut};
use tracing::debug;

use crate::config::CodecConfig;
use crate::decoder::decode_frame;
use crate::encoder::{encode_frame, frame_len};
use crate::error::{FormatError, Result};
use crate::value::Value;

/// Marker prefixed to every outermost buffer: "+o2b`".
pub const MARKER: [u8; 5] = *b"+o2b`";

/// Length of [`MARKER`].
pub const MARKER_LEN: usize = MARKER.len();

/// Length prefixes are 8-byte big-endian unsigned integers.
pub const LENGTH_PREFIX_SIZE: usize = 8;

/// Encoder/decoder pair bound to one [`CodecConfig`].
///
/// Wire format:
/// ```text
/// ┌──────────────┬──────────┬──────────┬─────┬──────────┐
/// │ Marker (5B)  │ Record 1 │ Record 2 │ ... │ Record n │
/// │ "+o2b`"      │          │          │     │          │
/// └──────────────┴──────────┴──────────┴─────┴──────────┘
///
/// Record: tag (1B) ++ payload
///   fixed payloads:    Number/Timestamp 8B BE double, Boolean 1B,
///                      Null/Undefined/Unrepresentable none
///   prefixed payloads: length (8B BE u64) ++ bytes
/// ```
///
/// Sequence and Mapping payloads are nested frames without a marker.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    /// Create a codec with default configuration.
    pub fn new() -> Self {
        Self::with_config(CodecConfig::default())
    }

    /// Create a codec with explicit configuration.
    pub fn with_config(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Current codec configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode a value sequence into a fresh marker-prefixed buffer.
    ///
    /// Never fails. Values without an encoding are written as
    /// unrepresentable and decode as [`Value::Undefined`].
    pub fn encode(&self, values: &[Value]) -> Bytes {
        let mut dst = BytesMut::with_capacity(self.encoded_len(values));
        dst.put_slice(&MARKER);
        encode_frame(values, &self.config, &mut dst);
        debug!(values = values.len(), bytes = dst.len(), "encoded values");
        dst.freeze()
    }

    /// Append the marker-prefixed encoding of `values` to `dst`.
    pub fn encode_into(&self, values: &[Value], dst: &mut BytesMut) {
        dst.reserve(self.encoded_len(values));
        dst.put_slice(&MARKER);
        encode_frame(values, &self.config, dst);
    }

    /// Exact size of the buffer [`Codec::encode`] produces for `values`.
    pub fn encoded_len(&self, values: &[Value]) -> usize {
        MARKER_LEN + frame_len(values, &self.config)
    }

    /// Decode a marker-prefixed buffer.
    ///
    /// All or nothing: any malformed record fails the whole call.
    pub fn decode(&self, buf: &[u8]) -> Result<Vec<Value>> {
        match self.decode_checked(buf) {
            Ok(values) => {
                debug!(values = values.len(), bytes = buf.len(), "decoded values");
                Ok(values)
            }
            Err(err) => {
                debug!(error = %err, bytes = buf.len(), "rejected buffer");
                Err(err)
            }
        }
    }

    fn decode_checked(&self, buf: &[u8]) -> Result<Vec<Value>> {
        if buf.len() > self.config.max_input_size {
            return Err(FormatError::InputTooLarge {
                size: buf.len(),
                max: self.config.max_input_size,
            });
        }
        if !is_encoded(buf) {
            return Err(FormatError::InvalidMarker);
        }
        decode_frame(&buf[MARKER_LEN..], MARKER_LEN, 0, &self.config)
    }
}

/// Encode with the default configuration.
pub fn encode(values: &[Value]) -> Bytes {
    Codec::new().encode(values)
}

/// Decode with the default configuration.
pub fn decode(buf: &[u8]) -> Result<Vec<Value>> {
    Codec::new().decode(buf)
}

/// Exact encoded size with the default configuration.
pub fn encoded_len(values: &[Value]) -> usize {
    Codec::new().encoded_len(values)
}

/// Returns true if `buf` starts with the marker. Does not validate records.
pub fn is_encoded(buf: &[u8]) -> bool {
    buf.starts_with(&MARKER)
}
