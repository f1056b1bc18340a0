//! Boundary helpers around the o2b codec.
//!
//! The codec itself never performs I/O. This crate sits next to it:
//! - [`ValueWriter`] encodes a value sequence and writes it as one buffer
//! - [`ValueReader`] reads a source to EOF and decodes the whole buffer
//! - [`ByteSource`] resolves external byte sources into [`Blob`]s before
//!   they are handed to the encoder
//!
//! There is no incremental parsing: every decode sees the complete buffer.

pub mod config;
pub mod error;
pub mod reader;
pub mod source;
pub mod writer;

pub use config::{StreamConfig, DEFAULT_MAX_BUFFER_SIZE};
pub use error::{Result, StreamError};
pub use o2b_codec::Blob;
pub use reader::ValueReader;
#[cfg(feature = "async")]
pub use source::resolve_async;
pub use source::{ByteSource, ReaderSource};
pub use writer::ValueWriter;
