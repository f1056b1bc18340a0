use std::io::{ErrorKind, Write};

use bytes::BytesMut;
use o2b_codec::{Codec, Value};
use tracing::debug;

use crate::config::StreamConfig;
use crate::error::{Result, StreamError};

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;

/// Encodes value sequences and writes each as one complete buffer.
pub struct ValueWriter<T> {
    inner: T,
    buf: BytesMut,
    codec: Codec,
}

impl<T: Write> ValueWriter<T> {
    /// Create a new value writer with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, StreamConfig::default())
    }

    /// Create a new value writer with explicit configuration.
    pub fn with_config(inner: T, config: StreamConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            codec: Codec::with_config(config.codec),
        }
    }

    /// Encode `values` and write the buffer (blocking).
    pub fn write_values(&mut self, values: &[Value]) -> Result<()> {
        self.buf.clear();
        self.codec.encode_into(values, &mut self.buf);

        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(StreamError::Closed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(StreamError::Io(err)),
            }
        }

        debug!(values = values.len(), bytes = offset, "wrote encoded buffer");
        self.flush()
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(StreamError::Io(err)),
            }
        }
    }

    /// Borrow the underlying sink.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying sink.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the writer and return the inner sink.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Codec used for encoding.
    pub fn codec(&self) -> &Codec {
        &self.codec
    }
}
