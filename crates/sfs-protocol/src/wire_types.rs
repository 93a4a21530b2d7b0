//! Low-level wire types and constants.
//!
//! This module defines:
//! - the one-byte type id written in front of every value,
//! - the size limits the length prefixes impose.
//!
//! The actual encode/decode logic lives in `binary_codec`.

/// Value type ids (first byte of every encoded value).
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WireDataType {
    Null = 0,
    Bool = 1,
    Byte = 2,
    Short = 3,
    Int = 4,
    Long = 5,
    Float = 6,
    Double = 7,
    UtfString = 8,
    BoolArray = 9,
    ByteArray = 10,
    ShortArray = 11,
    IntArray = 12,
    LongArray = 13,
    FloatArray = 14,
    DoubleArray = 15,
    UtfStringArray = 16,
    SfsArray = 17,
    SfsObject = 18,

    /// Serialized class instance. Recognised, never supported.
    Class = 19,

    /// Long string with a 32-bit length prefix.
    Text = 20,
}

impl WireDataType {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(WireDataType::Null),
            1 => Some(WireDataType::Bool),
            2 => Some(WireDataType::Byte),
            3 => Some(WireDataType::Short),
            4 => Some(WireDataType::Int),
            5 => Some(WireDataType::Long),
            6 => Some(WireDataType::Float),
            7 => Some(WireDataType::Double),
            8 => Some(WireDataType::UtfString),
            9 => Some(WireDataType::BoolArray),
            10 => Some(WireDataType::ByteArray),
            11 => Some(WireDataType::ShortArray),
            12 => Some(WireDataType::IntArray),
            13 => Some(WireDataType::LongArray),
            14 => Some(WireDataType::FloatArray),
            15 => Some(WireDataType::DoubleArray),
            16 => Some(WireDataType::UtfStringArray),
            17 => Some(WireDataType::SfsArray),
            18 => Some(WireDataType::SfsObject),
            19 => Some(WireDataType::Class),
            20 => Some(WireDataType::Text),
            _ => None,
        }
    }
}

/// Maximum number of entries in an object, array or typed array.
///
/// Counts are written as a signed 16-bit value; negative counts are
/// rejected on decode.
pub const MAX_COLLECTION_LEN: usize = i16::MAX as usize;

/// Maximum byte length of an object key.
pub const MAX_KEY_LEN: usize = 255;

/// Maximum byte length of a `UtfString` (unsigned 16-bit prefix).
pub const MAX_UTF_STRING_LEN: usize = u16::MAX as usize;

/// Maximum byte length of `Text` and `ByteArray` payloads (signed 32-bit prefix).
pub const MAX_LONG_PAYLOAD_LEN: usize = i32::MAX as usize;

/// Maximum nesting of objects / arrays accepted on decode.
///
/// The outermost container counts as level 1.
pub const MAX_DEPTH: usize = 64;

/// A tiny helper for validating key lengths.
pub fn validate_key_len(len: usize) -> bool {
    len > 0 && len <= MAX_KEY_LEN
}
