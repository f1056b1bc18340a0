use bytes::{BufMut, Bytes, BytesMut};
use tracing::trace;

use crate::classify::classify;
use crate::codec::LENGTH_PREFIX_SIZE;
use crate::config::{CodecConfig, ViewEncoding};
use crate::tag::Tag;
use crate::value::{Mapping, Value};

/// Append the markerless record encoding of `values` to `dst`.
pub(crate) fn encode_frame(values: &[Value], config: &CodecConfig, dst: &mut BytesMut) {
    for value in values {
        encode_record(value, config, dst);
    }
}

/// Exact size of the markerless record encoding of `values`.
pub(crate) fn frame_len(values: &[Value], config: &CodecConfig) -> usize {
    values.iter().map(|value| record_len(value, config)).sum()
}

fn encode_record(value: &Value, config: &CodecConfig, dst: &mut BytesMut) {
    let tag = classify(value);
    dst.put_u8(tag.as_u8());

    match value {
        Value::Number(n) => dst.put_f64(*n),
        Value::Text(s) => put_prefixed(dst, s.as_bytes()),
        Value::Boolean(b) => dst.put_u8(u8::from(*b)),
        Value::Null | Value::Undefined => {}
        Value::Timestamp(ts) => dst.put_f64(ts.as_millis()),
        Value::Pattern(p) => {
            put_prefixed(dst, p.source.as_bytes());
            put_prefixed(dst, p.flags.as_bytes());
        }
        Value::Sequence(items) => {
            put_nested(dst, |dst| encode_frame(items, config, dst));
        }
        Value::Mapping(map) => {
            put_nested(dst, |dst| encode_mapping_frame(map, config, dst));
        }
        Value::Bytes(_) | Value::Blob(_) | Value::View(_) | Value::Numeric(_) => {
            let payload = bytes_payload(value, config);
            put_prefixed(dst, &payload);
        }
        Value::Opaque(opaque) => {
            trace!(kind = opaque.kind(), "encoding value without representation as unrepresentable");
        }
    }
}

/// A mapping frame is the frame of a two-element sequence `[keys, values]`.
fn encode_mapping_frame(map: &Mapping, config: &CodecConfig, dst: &mut BytesMut) {
    dst.put_u8(Tag::Sequence.as_u8());
    put_nested(dst, |dst| {
        for key in map.keys() {
            dst.put_u8(Tag::Text.as_u8());
            put_prefixed(dst, key.as_bytes());
        }
    });

    dst.put_u8(Tag::Sequence.as_u8());
    put_nested(dst, |dst| {
        for value in map.values() {
            encode_record(value, config, dst);
        }
    });
}

fn record_len(value: &Value, config: &CodecConfig) -> usize {
    let payload = match value {
        Value::Number(_) | Value::Timestamp(_) => 8,
        Value::Text(s) => LENGTH_PREFIX_SIZE + s.len(),
        Value::Boolean(_) => 1,
        Value::Null | Value::Undefined | Value::Opaque(_) => 0,
        Value::Pattern(p) => 2 * LENGTH_PREFIX_SIZE + p.source.len() + p.flags.len(),
        Value::Sequence(items) => LENGTH_PREFIX_SIZE + frame_len(items, config),
        Value::Mapping(map) => LENGTH_PREFIX_SIZE + mapping_frame_len(map, config),
        Value::Bytes(b) => LENGTH_PREFIX_SIZE + b.len(),
        Value::Blob(blob) => LENGTH_PREFIX_SIZE + blob.bytes.len(),
        Value::View(view) => {
            let len = match config.view_encoding {
                ViewEncoding::BackingBuffer => view.backing().len(),
                ViewEncoding::Window => view.range().len(),
            };
            LENGTH_PREFIX_SIZE + len
        }
        Value::Numeric(arr) => LENGTH_PREFIX_SIZE + arr.byte_len(),
    };
    1 + payload
}

fn mapping_frame_len(map: &Mapping, config: &CodecConfig) -> usize {
    let keys: usize = map
        .keys()
        .map(|key| 1 + LENGTH_PREFIX_SIZE + key.len())
        .sum();
    let values: usize = map.values().map(|value| record_len(value, config)).sum();
    2 * (1 + LENGTH_PREFIX_SIZE) + keys + values
}

fn bytes_payload(value: &Value, config: &CodecConfig) -> Bytes {
    match value {
        Value::Bytes(b) => b.clone(),
        Value::Blob(blob) => blob.bytes.clone(),
        Value::View(view) => match config.view_encoding {
            ViewEncoding::BackingBuffer => view.backing().clone(),
            ViewEncoding::Window => view.window(),
        },
        Value::Numeric(arr) => arr.to_le_bytes(),
        _ => Bytes::new(),
    }
}

fn put_prefixed(dst: &mut BytesMut, payload: &[u8]) {
    dst.put_u64(payload.len() as u64);
    dst.put_slice(payload);
}

/// Write a length prefix, run `body`, then patch the prefix with the number
/// of bytes `body` appended.
fn put_nested(dst: &mut BytesMut, body: impl FnOnce(&mut BytesMut)) {
    let prefix_at = dst.len();
    dst.put_u64(0);
    body(dst);
    let len = (dst.len() - prefix_at - LENGTH_PREFIX_SIZE) as u64;
    dst[prefix_at..prefix_at + LENGTH_PREFIX_SIZE].copy_from_slice(&len.to_be_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{ByteView, NumericArray, Opaque, Pattern, Timestamp};

    fn frame(values: &[Value]) -> BytesMut {
        let mut dst = BytesMut::new();
        encode_frame(values, &CodecConfig::default(), &mut dst);
        dst
    }

    #[test]
    fn boolean_record() {
        assert_eq!(frame(&[Value::Boolean(true)]).as_ref(), &[2, 1]);
        assert_eq!(frame(&[Value::Boolean(false)]).as_ref(), &[2, 0]);
    }

    #[test]
    fn payloadless_records() {
        let out = frame(&[Value::Null, Value::Undefined, Value::Opaque(Opaque::new("fn"))]);
        assert_eq!(out.as_ref(), &[3, 4, 10]);
    }

    #[test]
    fn timestamp_record_is_big_endian_double() {
        let out = frame(&[Value::Timestamp(Timestamp::from_millis(1234.0))]);
        let mut expected = vec![5];
        expected.extend_from_slice(&1234.0f64.to_be_bytes());
        assert_eq!(out.as_ref(), expected.as_slice());
    }

    #[test]
    fn pattern_record_has_two_prefixed_strings() {
        let out = frame(&[Value::Pattern(Pattern::new("abc", "g"))]);
        let mut expected = vec![6];
        expected.extend_from_slice(&3u64.to_be_bytes());
        expected.extend_from_slice(b"abc");
        expected.extend_from_slice(&1u64.to_be_bytes());
        expected.extend_from_slice(b"g");
        assert_eq!(out.as_ref(), expected.as_slice());
    }

    #[test]
    fn nested_sequence_is_markerless_and_prefixed() {
        let out = frame(&[Value::Sequence(vec![Value::Null, Value::Boolean(true)])]);
        let mut expected = vec![7];
        expected.extend_from_slice(&3u64.to_be_bytes());
        expected.extend_from_slice(&[3, 2, 1]);
        assert_eq!(out.as_ref(), expected.as_slice());
    }

    #[test]
    fn mapping_reuses_sequence_layout() {
        let map: Mapping = [("k", Value::Null)].into_iter().collect();
        let out = frame(&[Value::Mapping(map)]);

        let keys = Value::Sequence(vec![Value::from("k")]);
        let values = Value::Sequence(vec![Value::Null]);
        let inner = frame(&[keys, values]);

        let mut expected = vec![8];
        expected.extend_from_slice(&(inner.len() as u64).to_be_bytes());
        expected.extend_from_slice(&inner);
        assert_eq!(out.as_ref(), expected.as_slice());
    }

    #[test]
    fn view_encoding_follows_config() {
        let view = ByteView::new(vec![1u8, 2, 3, 4], 1..3).unwrap();
        let values = [Value::View(view)];

        let whole = frame(&values);
        assert_eq!(&whole[9..], &[1, 2, 3, 4]);

        let config = CodecConfig {
            view_encoding: ViewEncoding::Window,
            ..CodecConfig::default()
        };
        let mut window = BytesMut::new();
        encode_frame(&values, &config, &mut window);
        assert_eq!(&window[9..], &[2, 3]);
        assert_eq!(frame_len(&values, &config), window.len());
    }

    #[test]
    fn frame_len_matches_encoding() {
        let map: Mapping = [("a", Value::from(1.0)), ("bb", Value::from("x"))]
            .into_iter()
            .collect();
        let values = vec![
            Value::from(1.5),
            Value::from("text"),
            Value::Pattern(Pattern::new("a+", "gi")),
            Value::Sequence(vec![Value::Null, Value::Mapping(map.clone())]),
            Value::Mapping(map),
            Value::Numeric(NumericArray::F32(vec![1.0, 2.0])),
            Value::Opaque(Opaque::new("fn")),
        ];
        let config = CodecConfig::default();
        assert_eq!(frame_len(&values, &config), frame(&values).len());
    }
}
