use bytes::Bytes;

use crate::codec::LENGTH_PREFIX_SIZE;
use crate::config::CodecConfig;
use crate::error::{FormatError, Result};
use crate::tag::Tag;
use crate::value::{Mapping, Pattern, Timestamp, Value};

/// Decode a markerless frame.
///
/// `base` is the absolute offset of `frame` within the outermost buffer and
/// is only used for error reporting. `depth` counts enclosing frames.
pub(crate) fn decode_frame(
    frame: &[u8],
    base: usize,
    depth: usize,
    config: &CodecConfig,
) -> Result<Vec<Value>> {
    let mut cursor = Cursor {
        buf: frame,
        pos: 0,
        base,
    };
    let mut values = Vec::new();

    while !cursor.is_empty() {
        let tag_offset = cursor.offset();
        let byte = cursor.read_u8()?;
        let tag = Tag::from_u8(byte).ok_or(FormatError::UnknownTag {
            tag: byte,
            offset: tag_offset,
        })?;

        let value = match tag {
            Tag::Number => Value::Number(cursor.read_f64()?),
            Tag::Text => Value::Text(cursor.read_text(config)?),
            Tag::Boolean => Value::Boolean(cursor.read_u8()? == 1),
            Tag::Null => Value::Null,
            Tag::Undefined | Tag::Unrepresentable => Value::Undefined,
            Tag::Timestamp => Value::Timestamp(Timestamp::from_millis(cursor.read_f64()?)),
            Tag::Pattern => {
                let source = cursor.read_text(config)?;
                let flags = cursor.read_text(config)?;
                Value::Pattern(Pattern { source, flags })
            }
            Tag::Sequence => {
                let (payload, payload_at) = cursor.read_prefixed()?;
                let nested_depth = enter(depth, config)?;
                Value::Sequence(decode_frame(payload, payload_at, nested_depth, config)?)
            }
            Tag::Mapping => {
                let (payload, payload_at) = cursor.read_prefixed()?;
                let nested_depth = enter(depth, config)?;
                let pair = decode_frame(payload, payload_at, nested_depth, config)?;
                Value::Mapping(rebuild_mapping(pair, tag_offset)?)
            }
            Tag::Bytes => {
                let (payload, _) = cursor.read_prefixed()?;
                Value::Bytes(Bytes::copy_from_slice(payload))
            }
        };
        values.push(value);
    }

    Ok(values)
}

fn enter(depth: usize, config: &CodecConfig) -> Result<usize> {
    let nested = depth + 1;
    if nested > config.max_depth {
        return Err(FormatError::DepthLimitExceeded {
            max: config.max_depth,
        });
    }
    Ok(nested)
}

/// Zip a decoded `[keys, values]` pair back into a mapping.
fn rebuild_mapping(pair: Vec<Value>, offset: usize) -> Result<Mapping> {
    let invalid = |reason: &'static str| FormatError::InvalidMapping { offset, reason };

    let [keys, values]: [Value; 2] = pair
        .try_into()
        .map_err(|_| invalid("expected exactly two sequences"))?;
    let (Value::Sequence(keys), Value::Sequence(values)) = (keys, values) else {
        return Err(invalid("expected exactly two sequences"));
    };
    if keys.len() != values.len() {
        return Err(FormatError::MappingLengthMismatch {
            offset,
            keys: keys.len(),
            values: values.len(),
        });
    }

    let mut map = Mapping::with_capacity(keys.len());
    for (key, value) in keys.into_iter().zip(values) {
        let Value::Text(key) = key else {
            return Err(invalid("mapping key is not text"));
        };
        map.insert(key, value);
    }
    Ok(map)
}

struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
    base: usize,
}

impl<'a> Cursor<'a> {
    fn is_empty(&self) -> bool {
        self.pos >= self.buf.len()
    }

    fn offset(&self) -> usize {
        self.base + self.pos
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, len: u64) -> Result<&'a [u8]> {
        let available = self.remaining();
        let len = match usize::try_from(len) {
            Ok(len) if len <= available => len,
            _ => {
                return Err(FormatError::Truncated {
                    offset: self.offset(),
                    needed: len,
                    available,
                })
            }
        };
        let buf: &'a [u8] = self.buf;
        let slice = &buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let slice = self.take(N as u64)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    fn read_u8(&mut self) -> Result<u8> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_be_bytes(self.read_array::<8>()?))
    }

    /// Read a length prefix and the payload it covers. Also returns the
    /// absolute offset of the payload.
    fn read_prefixed(&mut self) -> Result<(&'a [u8], usize)> {
        let len = u64::from_be_bytes(self.read_array::<LENGTH_PREFIX_SIZE>()?);
        let payload_at = self.offset();
        Ok((self.take(len)?, payload_at))
    }

    fn read_text(&mut self, config: &CodecConfig) -> Result<String> {
        let (payload, payload_at) = self.read_prefixed()?;
        if config.lossy_text {
            return Ok(String::from_utf8_lossy(payload).into_owned());
        }
        std::str::from_utf8(payload)
            .map(str::to_owned)
            .map_err(|_| FormatError::InvalidUtf8 { offset: payload_at })
    }
}
