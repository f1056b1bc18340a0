//! Optional JSON bridge for o2b values.
//!
//! Build codec inputs from JSON documents and render decoded values as JSON.
//! JSON cannot hold everything the codec can (bytes, timestamps, patterns,
//! undefined), so rendering follows a [`JsonConfig`].

pub mod config;
pub mod convert;
pub mod error;

pub use config::{
    BytesRendering, JsonConfig, NonFiniteRendering, TimestampRendering, UndefinedRendering,
};
pub use convert::{decode_to_json, encode_json_str, from_json, to_json};
pub use error::{JsonError, Result};
