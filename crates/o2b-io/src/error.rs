use o2b_codec::FormatError;

/// Errors that can occur while moving encoded buffers through streams.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// The buffer read from the stream is not a valid encoding.
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// An I/O error occurred while reading or writing.
    #[error("stream I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The source holds more bytes than the configured maximum.
    #[error("buffer too large (more than {max} bytes)")]
    BufferTooLarge { max: usize },

    /// The sink stopped accepting bytes before the buffer was written.
    #[error("stream closed (incomplete buffer)")]
    Closed,
}

pub type Result<T> = std::result::Result<T, StreamError>;
