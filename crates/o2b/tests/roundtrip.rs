use bytes::Bytes;
use o2b::codec::{Blob, ByteView, NumericArray, Opaque};
use o2b::{decode, encode, Mapping, Pattern, Timestamp, Value};

fn data_view_backing() -> Vec<u8> {
    123456.0f64.to_be_bytes().to_vec()
}

/// Every input shape, in the order the classifier checks them.
fn mixed_values() -> Vec<Value> {
    vec![
        Value::from(1.0),
        Value::from(0.123),
        Value::from("test"),
        Value::from(true),
        Value::from(false),
        Value::Null,
        Value::Undefined,
        Value::Timestamp(Timestamp::from_millis(1234.0)),
        Value::Pattern(Pattern::new("abc", "g")),
        Value::from(b"buffer".as_slice()),
        Value::View(ByteView::new(data_view_backing(), 0..4).expect("window should fit")),
        Value::Blob(Blob::new(vec![0u8; 10])),
        Value::Numeric(NumericArray::U32(vec![1; 10])),
        Value::Opaque(Opaque::new("function")),
    ]
}

/// What [`mixed_values`] looks like after a round trip.
fn expected_decoded() -> Vec<Value> {
    let mut u32_image = Vec::new();
    for _ in 0..10 {
        u32_image.extend_from_slice(&1u32.to_le_bytes());
    }

    vec![
        Value::from(1.0),
        Value::from(0.123),
        Value::from("test"),
        Value::from(true),
        Value::from(false),
        Value::Null,
        Value::Undefined,
        Value::Timestamp(Timestamp::from_millis(1234.0)),
        Value::Pattern(Pattern::new("abc", "g")),
        Value::from(b"buffer".as_slice()),
        Value::from(data_view_backing()),
        Value::from(vec![0u8; 10]),
        Value::from(u32_image),
        Value::Undefined,
    ]
}

fn keyed(values: Vec<Value>) -> Mapping {
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| (char::from(b'a' + i as u8).to_string(), v))
        .collect()
}

#[test]
fn mixed_top_level_values() {
    let decoded = decode(&encode(&mixed_values())).expect("buffer should decode");
    assert_eq!(decoded, expected_decoded());
}

#[test]
fn mixed_values_inside_sequence_and_mapping() {
    let mut input = mixed_values();
    input.push(Value::Sequence(mixed_values()));
    input.push(Value::Mapping(keyed(mixed_values())));

    let mut expected = expected_decoded();
    expected.push(Value::Sequence(expected_decoded()));
    expected.push(Value::Mapping(keyed(expected_decoded())));

    let decoded = decode(&encode(&input)).expect("buffer should decode");
    assert_eq!(decoded, expected);

    let Value::Mapping(map) = &decoded[15] else {
        panic!("expected a mapping at index 15");
    };
    assert_eq!(map.get("g"), Some(&Value::Undefined));
    assert_eq!(map.get("n"), Some(&Value::Undefined));
    assert_eq!(
        map.get("h").and_then(Value::as_timestamp).map(Timestamp::as_millis),
        Some(1234.0)
    );
}

#[test]
fn nesting_to_depth_five_and_beyond() {
    for depth in [1usize, 5, 12] {
        let mut value = Value::from("leaf");
        for level in 0..depth {
            value = if level % 2 == 0 {
                Value::Sequence(vec![Value::from(level as f64), value])
            } else {
                let mut map = Mapping::new();
                map.insert("level", level as f64);
                map.insert("child", value);
                Value::Mapping(map)
            };
        }

        let decoded = decode(&encode(&[value.clone()])).expect("nested buffer should decode");
        assert_eq!(decoded, vec![value]);
    }
}

#[test]
fn mapping_key_order_survives() {
    let keys = ["zeta", "alpha", "10", "2", "mid", ""];
    let map: Mapping = keys.iter().map(|k| (*k, Value::from(*k))).collect();

    let decoded = decode(&encode(&[Value::Mapping(map)])).expect("buffer should decode");
    let decoded_keys: Vec<&str> = decoded[0]
        .as_mapping()
        .expect("value should be a mapping")
        .keys()
        .collect();
    assert_eq!(decoded_keys, keys);
}

#[test]
fn large_bytes_payload() {
    let payload = Bytes::from(vec![0x5A; 1 << 20]);
    let decoded = decode(&encode(&[Value::Bytes(payload.clone())])).expect("buffer should decode");
    assert_eq!(decoded[0].as_bytes(), Some(&payload));
}
