//! In-memory value model.
//!
//! [`Value`] covers the ten wire-level shapes plus the input-only shapes the
//! classifier folds into them: resolved blobs, windowed views, fixed-width
//! numeric arrays (all encoded as bytes) and opaque host values (encoded as
//! unrepresentable).

use std::collections::HashMap;
use std::ops::Range;

use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::classify::classify;
use crate::tag::Tag;

/// A single encodable value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Boolean(bool),
    Null,
    Undefined,
    Timestamp(Timestamp),
    Pattern(Pattern),
    Sequence(Vec<Value>),
    Mapping(Mapping),
    Bytes(Bytes),
    /// A blob whose contents have already been resolved into memory.
    Blob(Blob),
    /// A window over a larger buffer.
    View(ByteView),
    /// A fixed-width numeric array, encoded as its little-endian byte image.
    Numeric(NumericArray),
    /// A host value with no defined encoding.
    Opaque(Opaque),
}

impl Value {
    /// The wire tag this value is encoded under.
    pub fn tag(&self) -> Tag {
        classify(self)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            Value::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    pub fn as_pattern(&self) -> Option<&Pattern> {
        match self {
            Value::Pattern(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Raw bytes of a decoded [`Value::Bytes`].
    ///
    /// Input-only byte shapes (blobs, views, numeric arrays) return `None`;
    /// they only become plain bytes after a round trip.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::Bytes(b)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(Bytes::from(b))
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(Bytes::copy_from_slice(b))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Value::Mapping(map)
    }
}

impl From<Timestamp> for Value {
    fn from(ts: Timestamp) -> Self {
        Value::Timestamp(ts)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Value::Timestamp(Timestamp::from(dt))
    }
}

impl From<Pattern> for Value {
    fn from(p: Pattern) -> Self {
        Value::Pattern(p)
    }
}

impl From<Blob> for Value {
    fn from(b: Blob) -> Self {
        Value::Blob(b)
    }
}

impl From<ByteView> for Value {
    fn from(v: ByteView) -> Self {
        Value::View(v)
    }
}

impl From<NumericArray> for Value {
    fn from(a: NumericArray) -> Self {
        Value::Numeric(a)
    }
}

impl From<Opaque> for Value {
    fn from(o: Opaque) -> Self {
        Value::Opaque(o)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

/// Milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Timestamp(f64);

impl Timestamp {
    pub fn from_millis(millis: f64) -> Self {
        Self(millis)
    }

    pub fn as_millis(self) -> f64 {
        self.0
    }

    /// The current wall-clock time.
    pub fn now() -> Self {
        Self::from(Utc::now())
    }

    /// Convert to a calendar time.
    ///
    /// Returns `None` for non-finite values and instants outside chrono's range.
    /// Precision below one nanosecond is dropped.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        if !self.0.is_finite() {
            return None;
        }
        let secs = (self.0 / 1000.0).floor();
        if secs < i64::MIN as f64 || secs > i64::MAX as f64 {
            return None;
        }
        let nanos = ((self.0 - secs * 1000.0) * 1_000_000.0).round();
        // Rounding can carry a full second.
        let (secs, nanos) = if nanos >= 1_000_000_000.0 {
            (secs + 1.0, 0.0)
        } else {
            (secs, nanos)
        };
        DateTime::from_timestamp(secs as i64, nanos as u32)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        let millis = dt.timestamp() as f64 * 1000.0
            + f64::from(dt.timestamp_subsec_nanos()) / 1_000_000.0;
        Self(millis)
    }
}

/// A pattern object reduced to its source text and flag letters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    pub source: String,
    pub flags: String,
}

impl Pattern {
    pub fn new(source: impl Into<String>, flags: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            flags: flags.into(),
        }
    }
}

/// Key-ordered mapping from text keys to values.
///
/// Iteration follows insertion order. Re-inserting an existing key replaces
/// the value in place. Lookups and inserts go through a key index, so
/// building a mapping is linear in its entry count.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    entries: Vec<(String, Value)>,
    index: HashMap<String, usize>,
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Insert a key, returning the previous value if the key was present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&slot) => Some(std::mem::replace(&mut self.entries[slot].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Mapping::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl IntoIterator for Mapping {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Blob contents that have already been read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub bytes: Bytes,
    /// Media type reported by the source. Not encoded.
    pub content_type: Option<String>,
}

impl Blob {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// A byte window over a larger backing buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteView {
    backing: Bytes,
    range: Range<usize>,
}

impl ByteView {
    /// Create a view, or `None` if `range` does not fit inside `backing`.
    pub fn new(backing: impl Into<Bytes>, range: Range<usize>) -> Option<Self> {
        let backing = backing.into();
        if range.start > range.end || range.end > backing.len() {
            return None;
        }
        Some(Self { backing, range })
    }

    /// A view spanning the whole buffer.
    pub fn full(backing: impl Into<Bytes>) -> Self {
        let backing = backing.into();
        let range = 0..backing.len();
        Self { backing, range }
    }

    pub fn backing(&self) -> &Bytes {
        &self.backing
    }

    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Only the viewed bytes.
    pub fn window(&self) -> Bytes {
        self.backing.slice(self.range.clone())
    }
}

/// Fixed-width numeric arrays.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericArray {
    I8(Vec<i8>),
    U8(Vec<u8>),
    U8Clamped(Vec<u8>),
    I16(Vec<i16>),
    U16(Vec<u16>),
    I32(Vec<i32>),
    U32(Vec<u32>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl NumericArray {
    /// Bytes per element.
    pub fn element_width(&self) -> usize {
        match self {
            NumericArray::I8(_) | NumericArray::U8(_) | NumericArray::U8Clamped(_) => 1,
            NumericArray::I16(_) | NumericArray::U16(_) => 2,
            NumericArray::I32(_) | NumericArray::U32(_) | NumericArray::F32(_) => 4,
            NumericArray::F64(_) => 8,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            NumericArray::I8(v) => v.len(),
            NumericArray::U8(v) | NumericArray::U8Clamped(v) => v.len(),
            NumericArray::I16(v) => v.len(),
            NumericArray::U16(v) => v.len(),
            NumericArray::I32(v) => v.len(),
            NumericArray::U32(v) => v.len(),
            NumericArray::F32(v) => v.len(),
            NumericArray::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size of the raw byte image.
    pub fn byte_len(&self) -> usize {
        self.len() * self.element_width()
    }

    /// Raw byte image, little-endian element order.
    pub fn to_le_bytes(&self) -> Bytes {
        fn collect<T, const N: usize>(items: &[T], f: impl Fn(&T) -> [u8; N]) -> Bytes {
            let mut out = Vec::with_capacity(items.len() * N);
            for item in items {
                out.extend_from_slice(&f(item));
            }
            Bytes::from(out)
        }

        match self {
            NumericArray::I8(v) => collect(v.as_slice(), |x| x.to_le_bytes()),
            NumericArray::U8(v) | NumericArray::U8Clamped(v) => Bytes::copy_from_slice(v),
            NumericArray::I16(v) => collect(v.as_slice(), |x| x.to_le_bytes()),
            NumericArray::U16(v) => collect(v.as_slice(), |x| x.to_le_bytes()),
            NumericArray::I32(v) => collect(v.as_slice(), |x| x.to_le_bytes()),
            NumericArray::U32(v) => collect(v.as_slice(), |x| x.to_le_bytes()),
            NumericArray::F32(v) => collect(v.as_slice(), |x| x.to_le_bytes()),
            NumericArray::F64(v) => collect(v.as_slice(), |x| x.to_le_bytes()),
        }
    }
}

/// Stand-in for a host value with no encoding, such as a callable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opaque {
    kind: String,
}

impl Opaque {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }

    /// Short description of what the value was, used in logs.
    pub fn kind(&self) -> &str {
        &self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_preserves_insertion_order() {
        let mut map = Mapping::new();
        map.insert("z", 1.0);
        map.insert("a", 2.0);
        map.insert("m", 3.0);

        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn mapping_reinsert_keeps_position() {
        let mut map: Mapping = [("a", 1.0), ("b", 2.0)].into_iter().collect();
        let previous = map.insert("a", "replaced");

        assert_eq!(previous, Some(Value::Number(1.0)));
        assert_eq!(map.len(), 2);
        assert_eq!(map.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(map.get("a").and_then(Value::as_str), Some("replaced"));
    }

    #[test]
    fn mapping_equality_follows_entries() {
        let mut replaced: Mapping = [("a", 0.0), ("b", 2.0)].into_iter().collect();
        replaced.insert("a", 1.0);
        let direct: Mapping = [("a", 1.0), ("b", 2.0)].into_iter().collect();
        let reordered: Mapping = [("b", 2.0), ("a", 1.0)].into_iter().collect();

        assert_eq!(replaced, direct);
        assert_ne!(direct, reordered);
        assert_eq!(reordered.get("a"), Some(&Value::Number(1.0)));
        assert!(!reordered.contains_key("c"));
    }

    #[test]
    fn byte_view_rejects_out_of_range() {
        assert!(ByteView::new(vec![0u8; 4], 2..5).is_none());
        assert!(ByteView::new(vec![0u8; 4], 3..2).is_none());

        let view = ByteView::new(vec![1u8, 2, 3, 4], 1..3).unwrap();
        assert_eq!(view.window().as_ref(), &[2, 3]);
        assert_eq!(view.backing().len(), 4);
    }

    #[test]
    fn numeric_array_byte_image_is_little_endian() {
        let arr = NumericArray::U32(vec![1, 0x0102_0304]);
        assert_eq!(arr.byte_len(), 8);
        assert_eq!(arr.to_le_bytes().as_ref(), &[1, 0, 0, 0, 4, 3, 2, 1]);

        let arr = NumericArray::I16(vec![-1]);
        assert_eq!(arr.to_le_bytes().as_ref(), &[0xFF, 0xFF]);
    }

    #[test]
    fn timestamp_datetime_conversion() {
        let ts = Timestamp::from_millis(1234.0);
        let dt = ts.to_datetime().unwrap();
        assert_eq!(dt.timestamp_millis(), 1234);
        assert_eq!(Timestamp::from(dt), ts);

        let before_epoch = Timestamp::from_millis(-1.5);
        let dt = before_epoch.to_datetime().unwrap();
        assert_eq!(Timestamp::from(dt).as_millis(), -1.5);

        assert!(Timestamp::from_millis(f64::NAN).to_datetime().is_none());
        assert!(Timestamp::from_millis(f64::INFINITY).to_datetime().is_none());
    }

    #[test]
    fn option_none_is_null() {
        assert_eq!(Value::from(None::<f64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text("x".into()));
    }
}
