//! Self-describing binary codec for nested heterogeneous values.
//!
//! Encodes an ordered sequence of [`Value`]s into one flat buffer and back,
//! keeping the distinctions text formats lose: exact doubles, raw bytes,
//! timestamps, patterns, and null versus undefined.
//!
//! Every buffer starts with a 5-byte marker ("+o2b`") followed by
//! tag-length-value records:
//! - a 1-byte [`Tag`]
//! - a fixed-size payload, or an 8-byte big-endian length prefix and payload
//!
//! Sequences and mappings nest as markerless frames. Encoding is total;
//! decoding fails with [`FormatError`] and never returns a partial result.

pub mod classify;
pub mod codec;
pub mod config;
mod decoder;
mod encoder;
pub mod error;
pub mod tag;
pub mod value;

pub use classify::classify;
pub use codec::{
    decode, encode, encoded_len, is_encoded, Codec, LENGTH_PREFIX_SIZE, MARKER, MARKER_LEN,
};
pub use config::{CodecConfig, ViewEncoding, DEFAULT_MAX_DEPTH, DEFAULT_MAX_INPUT_SIZE};
pub use error::{FormatError, Result};
pub use tag::Tag;
pub use value::{Blob, ByteView, Mapping, NumericArray, Opaque, Pattern, Timestamp, Value};
