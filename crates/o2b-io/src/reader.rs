use std::io::{ErrorKind, Read};

use bytes::BytesMut;
use o2b_codec::{Codec, Value};
use tracing::debug;

use crate::config::StreamConfig;
use crate::error::{Result, StreamError};

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;
const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Reads one complete encoded buffer from any `Read` source and decodes it.
///
/// The encoding has no outer length, so the buffer ends at EOF.
pub struct ValueReader<T> {
    inner: T,
    buf: BytesMut,
    codec: Codec,
    config: StreamConfig,
}

impl<T: Read> ValueReader<T> {
    /// Create a new value reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, StreamConfig::default())
    }

    /// Create a new value reader with explicit configuration.
    pub fn with_config(inner: T, config: StreamConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            codec: Codec::with_config(config.codec.clone()),
            config,
        }
    }

    /// Read the source to EOF and decode everything read (blocking).
    pub fn read_values(&mut self) -> Result<Vec<Value>> {
        self.buf.clear();

        loop {
            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(StreamError::Io(err)),
            };

            if read == 0 {
                break;
            }

            if self.buf.len() + read > self.config.max_buffer_size {
                return Err(StreamError::BufferTooLarge {
                    max: self.config.max_buffer_size,
                });
            }
            self.buf.extend_from_slice(&chunk[..read]);
        }

        debug!(bytes = self.buf.len(), "read encoded buffer");
        let values = self.codec.decode(&self.buf)?;
        self.buf.clear();
        Ok(values)
    }

    /// Borrow the underlying source.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying source.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner source.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Update maximum buffer size for subsequent reads.
    pub fn set_max_buffer_size(&mut self, max_buffer_size: usize) {
        self.config.max_buffer_size = max_buffer_size;
    }

    /// Current value reader configuration.
    pub fn config(&self) -> &StreamConfig {
        &self.config
    }
}
