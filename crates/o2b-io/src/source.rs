//! Byte-source resolution.
//!
//! The encoder only accepts bytes that are already in memory. Sources that
//! must be read first (files, pipes, handles) are resolved into a [`Blob`]
//! here, before encoding.

use std::io::Read;

use bytes::Bytes;
use o2b_codec::Blob;
use tracing::debug;

use crate::config::DEFAULT_MAX_BUFFER_SIZE;
use crate::error::{Result, StreamError};

/// Something that can be turned into an in-memory [`Blob`].
pub trait ByteSource {
    /// Read the source completely.
    fn resolve(self) -> Result<Blob>;
}

impl ByteSource for Blob {
    fn resolve(self) -> Result<Blob> {
        Ok(self)
    }
}

impl ByteSource for Bytes {
    fn resolve(self) -> Result<Blob> {
        Ok(Blob::new(self))
    }
}

impl ByteSource for Vec<u8> {
    fn resolve(self) -> Result<Blob> {
        Ok(Blob::new(self))
    }
}

/// Adapts any `Read` into a [`ByteSource`] with a size limit.
pub struct ReaderSource<R> {
    inner: R,
    content_type: Option<String>,
    max_size: usize,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            content_type: None,
            max_size: DEFAULT_MAX_BUFFER_SIZE,
        }
    }

    /// Attach a media type to the resolved blob.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Fail resolution if the source holds more than `max_size` bytes.
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn resolve(self) -> Result<Blob> {
        let read_limit = u64::try_from(self.max_size.saturating_add(1)).unwrap_or(u64::MAX);
        let mut content = Vec::new();
        self.inner.take(read_limit).read_to_end(&mut content)?;
        finish(content, self.content_type, self.max_size)
    }
}

/// Resolve an async reader into a [`Blob`], reading at most `max_size` bytes.
///
/// This is the only asynchronous step: await it before encoding.
#[cfg(feature = "async")]
pub async fn resolve_async<R>(
    reader: R,
    content_type: Option<String>,
    max_size: usize,
) -> Result<Blob>
where
    R: tokio::io::AsyncRead + Unpin,
{
    use tokio::io::AsyncReadExt;

    let read_limit = u64::try_from(max_size.saturating_add(1)).unwrap_or(u64::MAX);
    let mut content = Vec::new();
    reader.take(read_limit).read_to_end(&mut content).await?;
    finish(content, content_type, max_size)
}

fn finish(content: Vec<u8>, content_type: Option<String>, max_size: usize) -> Result<Blob> {
    if content.len() > max_size {
        return Err(StreamError::BufferTooLarge { max: max_size });
    }
    debug!(bytes = content.len(), content_type = ?content_type, "resolved byte source");
    Ok(Blob {
        bytes: Bytes::from(content),
        content_type,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use o2b_codec::{decode, encode, Value};

    use super::*;

    #[test]
    fn in_memory_sources_resolve_directly() {
        let blob = Bytes::from_static(b"abc").resolve().unwrap();
        assert_eq!(blob.bytes.as_ref(), b"abc");
        assert!(blob.content_type.is_none());

        let blob = vec![1u8, 2].resolve().unwrap();
        assert_eq!(blob.bytes.as_ref(), &[1, 2]);
    }

    #[test]
    fn reader_source_reads_everything() {
        let blob = ReaderSource::new(Cursor::new(b"file contents".to_vec()))
            .with_content_type("text/plain")
            .resolve()
            .unwrap();

        assert_eq!(blob.bytes.as_ref(), b"file contents");
        assert_eq!(blob.content_type.as_deref(), Some("text/plain"));
    }

    #[test]
    fn reader_source_enforces_limit() {
        let exact = ReaderSource::new(Cursor::new(vec![0u8; 8]))
            .with_max_size(8)
            .resolve();
        assert!(exact.is_ok());

        let err = ReaderSource::new(Cursor::new(vec![0u8; 9]))
            .with_max_size(8)
            .resolve()
            .unwrap_err();
        assert!(matches!(err, StreamError::BufferTooLarge { max: 8 }));
    }

    #[test]
    fn resolved_blob_encodes_as_bytes() {
        let blob = ReaderSource::new(Cursor::new(b"payload".to_vec()))
            .resolve()
            .unwrap();
        let decoded = decode(&encode(&[Value::Blob(blob)])).unwrap();
        assert_eq!(decoded, vec![Value::from(b"payload".as_slice())]);
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn async_reader_resolves() {
        let blob = resolve_async(&b"async bytes"[..], Some("application/octet-stream".into()), 64)
            .await
            .unwrap();
        assert_eq!(blob.bytes.as_ref(), b"async bytes");

        let err = resolve_async(&b"too long"[..], None, 3).await.unwrap_err();
        assert!(matches!(err, StreamError::BufferTooLarge { max: 3 }));
    }
}
