//! Binary serialization that keeps what JSON loses.
//!
//! o2b encodes an ordered sequence of heterogeneous values (numbers, text,
//! booleans, null and undefined, timestamps, patterns, byte blobs, sequences
//! and key-ordered mappings) into one self-describing buffer.
//!
//! ```
//! use o2b::{decode, encode, Value};
//!
//! let buf = encode(&[Value::from("hi"), Value::from(42.0)]);
//! assert_eq!(decode(&buf).unwrap(), vec![Value::from("hi"), Value::from(42.0)]);
//! ```
//!
//! # Crate Structure
//!
//! - [`codec`] — Value model, classifier, encoder and decoder
//! - [`io`] — Whole-buffer stream helpers and byte sources (behind `io` feature)
//! - [`json`] — JSON bridge (behind `json` feature)

pub use o2b_codec::{
    classify, decode, encode, encoded_len, is_encoded, Codec, CodecConfig, FormatError, Mapping,
    Pattern, Tag, Timestamp, Value, MARKER,
};

/// Re-export codec types.
pub mod codec {
    pub use o2b_codec::*;
}

/// Re-export stream and byte-source types (requires `io` feature).
#[cfg(feature = "io")]
pub mod io {
    pub use o2b_io::*;
}

/// Re-export JSON bridge types (requires `json` feature).
#[cfg(feature = "json")]
pub mod json {
    pub use o2b_json::*;
}
