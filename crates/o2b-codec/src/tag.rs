//! Wire type tags.
//!
//! Every record starts with one tag byte. Ordinals are part of the wire
//! format: new kinds take the next unused ordinal, deployed ordinals are
//! never reassigned.

use std::fmt;

/// Discriminant written as the first byte of every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Tag {
    /// 8-byte big-endian IEEE-754 double.
    Number = 0,
    /// Length-prefixed UTF-8.
    Text = 1,
    /// One byte, 0 or 1.
    Boolean = 2,
    /// No payload.
    Null = 3,
    /// No payload.
    Undefined = 4,
    /// 8-byte big-endian double, milliseconds since the Unix epoch.
    Timestamp = 5,
    /// Length-prefixed source followed by length-prefixed flags.
    Pattern = 6,
    /// Length-prefixed markerless frame.
    Sequence = 7,
    /// Length-prefixed markerless frame holding `[keys, values]`.
    Mapping = 8,
    /// Length-prefixed raw bytes.
    Bytes = 9,
    /// No payload. Decodes as [`Tag::Undefined`].
    Unrepresentable = 10,
}

impl Tag {
    /// All tags in ordinal order.
    pub const ALL: [Tag; 11] = [
        Tag::Number,
        Tag::Text,
        Tag::Boolean,
        Tag::Null,
        Tag::Undefined,
        Tag::Timestamp,
        Tag::Pattern,
        Tag::Sequence,
        Tag::Mapping,
        Tag::Bytes,
        Tag::Unrepresentable,
    ];

    /// The wire byte for this tag.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Look up a tag by its wire byte.
    pub fn from_u8(byte: u8) -> Option<Tag> {
        Tag::ALL.get(usize::from(byte)).copied()
    }

    /// Returns a human-readable name for the tag.
    pub fn name(self) -> &'static str {
        match self {
            Tag::Number => "number",
            Tag::Text => "text",
            Tag::Boolean => "boolean",
            Tag::Null => "null",
            Tag::Undefined => "undefined",
            Tag::Timestamp => "timestamp",
            Tag::Pattern => "pattern",
            Tag::Sequence => "sequence",
            Tag::Mapping => "mapping",
            Tag::Bytes => "bytes",
            Tag::Unrepresentable => "unrepresentable",
        }
    }

    /// Payload size for tags whose layout carries no length prefix.
    ///
    /// Returns `None` for length-prefixed tags.
    pub fn fixed_payload_size(self) -> Option<usize> {
        match self {
            Tag::Number | Tag::Timestamp => Some(8),
            Tag::Boolean => Some(1),
            Tag::Null | Tag::Undefined | Tag::Unrepresentable => Some(0),
            Tag::Text | Tag::Pattern | Tag::Sequence | Tag::Mapping | Tag::Bytes => None,
        }
    }

    /// Returns true if the payload size is fully determined by the tag.
    pub fn is_fixed_size(self) -> bool {
        self.fixed_payload_size().is_some()
    }
}

impl TryFrom<u8> for Tag {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Tag::from_u8(byte).ok_or(byte)
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> u8 {
        tag.as_u8()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
