//! Binary encoding/decoding for typed objects, arrays and envelopes.
//!
//! This module converts between:
//! - raw binary payloads (`&[u8]`)
//! - `sfs_core::SfsObject` / `SfsArray` and the request envelope
//!
//! Layout (all multi-byte integers big-endian):
//!
//! ```text
//! value      := type_id (u8) body
//!
//! Null   (0) : [no body]
//! Bool   (1) : u8 (0 / 1)
//! Byte   (2) : i8
//! Short  (3) : i16
//! Int    (4) : i32
//! Long   (5) : i64
//! Float  (6) : f32 (IEEE-754 bits)
//! Double (7) : f64 (IEEE-754 bits)
//! UtfString (8)       : u16 byte_len, UTF-8 bytes
//! BoolArray (9)       : i16 count, u8 * count
//! ByteArray (10)      : i32 byte_len, bytes
//! Short/Int/Long/Float/DoubleArray (11..=15) : i16 count, element * count
//! UtfStringArray (16) : i16 count, (u16 byte_len, UTF-8 bytes) * count
//! SfsArray (17)       : i16 count, value * count
//! SfsObject (18)      : i16 count, (u16 key_len, key bytes, value) * count
//! Text (20)           : i32 byte_len, UTF-8 bytes
//! ```
//!
//! A request on the wire is one `SfsObject`:
//!
//! ```text
//! { "c": byte controller, "a": short action, "p": object params }
//! ```
//!
//! NOTE: this module handles **one payload per buffer**. Packet headers,
//! compression and socket framing belong to the transport.

use std::fmt;

use sfs_core::request::{KEY_ACTION, KEY_CONTROLLER, KEY_PARAMS};
use sfs_core::{InboundMessage, RequestMessage, SfsArray, SfsObject, SfsValue};

use crate::wire_types::{
    validate_key_len, WireDataType, MAX_COLLECTION_LEN, MAX_DEPTH, MAX_LONG_PAYLOAD_LEN,
    MAX_UTF_STRING_LEN,
};

/// Errors that can arise when encoding/decoding a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Buffer too short for the expected fields.
    Truncated,
    /// Type id not defined by the protocol.
    UnknownType(u8),
    /// Type id defined by the protocol but not handled here.
    UnsupportedType(u8),
    /// A container of one type was expected, another was found.
    UnexpectedType { expected: u8, got: u8 },
    /// Malformed UTF-8 in a key or string.
    InvalidUtf8,
    /// Bool encoded as something other than 0 or 1.
    InvalidBool(u8),
    /// Negative count or length prefix.
    NegativeLength,
    /// Key empty or longer than the wire allows.
    InvalidKey(usize),
    /// String longer than its length prefix can express.
    StringTooLong(usize),
    /// Too many entries for a 16-bit count.
    CollectionTooLarge(usize),
    /// Byte array or text longer than a 32-bit length.
    PayloadTooLarge(usize),
    /// Envelope field missing.
    MissingField(&'static str),
    /// Envelope field present with the wrong type.
    WrongFieldType(&'static str),
    /// Bytes left over after a complete payload.
    TrailingBytes(usize),
    /// Objects and arrays nested deeper than `MAX_DEPTH`.
    DepthExceeded(usize),
    /// The same key appears twice in one object.
    DuplicateKey(String),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::Truncated => write!(f, "Buffer truncated"),
            ProtocolError::UnknownType(t) => write!(f, "Unknown type id: {}", t),
            ProtocolError::UnsupportedType(t) => write!(f, "Unsupported type id: {}", t),
            ProtocolError::UnexpectedType { expected, got } => {
                write!(f, "Unexpected type id: got {}, expected {}", got, expected)
            }
            ProtocolError::InvalidUtf8 => write!(f, "Invalid UTF-8"),
            ProtocolError::InvalidBool(b) => write!(f, "Invalid bool byte: {}", b),
            ProtocolError::NegativeLength => write!(f, "Negative length prefix"),
            ProtocolError::InvalidKey(len) => write!(f, "Invalid key length: {}", len),
            ProtocolError::StringTooLong(len) => write!(f, "String too long: {} bytes", len),
            ProtocolError::CollectionTooLarge(len) => {
                write!(f, "Collection too large: {} entries", len)
            }
            ProtocolError::PayloadTooLarge(len) => write!(f, "Payload too large: {} bytes", len),
            ProtocolError::MissingField(key) => write!(f, "Missing field: {}", key),
            ProtocolError::WrongFieldType(key) => write!(f, "Wrong type for field: {}", key),
            ProtocolError::TrailingBytes(n) => write!(f, "{} trailing bytes after payload", n),
            ProtocolError::DepthExceeded(max) => write!(f, "Nesting deeper than {} levels", max),
            ProtocolError::DuplicateKey(key) => write!(f, "Duplicate key: {}", key),
        }
    }
}

impl std::error::Error for ProtocolError {}

// ============================================================================
// ENVELOPES
// ============================================================================

/// Encode a request envelope.
///
/// The encoded bytes are appended to `out`; nothing is appended on error.
pub fn encode_request(msg: &RequestMessage, out: &mut Vec<u8>) -> Result<(), ProtocolError> {
    encode_object(&msg.to_sfs_object(), out)
}

/// Decode a single envelope received from the server.
pub fn decode_message(buf: &[u8]) -> Result<InboundMessage, ProtocolError> {
    let mut envelope = decode_object(buf)?;

    let controller = match take_field(&mut envelope, KEY_CONTROLLER)? {
        SfsValue::Byte(c) => c as u8,
        _ => return Err(ProtocolError::WrongFieldType(KEY_CONTROLLER)),
    };

    let action = match take_field(&mut envelope, KEY_ACTION)? {
        SfsValue::Short(a) => a,
        _ => return Err(ProtocolError::WrongFieldType(KEY_ACTION)),
    };

    let params = match take_field(&mut envelope, KEY_PARAMS)? {
        SfsValue::Object(p) => p,
        _ => return Err(ProtocolError::WrongFieldType(KEY_PARAMS)),
    };

    Ok(InboundMessage {
        controller,
        action,
        params,
    })
}

fn take_field(obj: &mut SfsObject, key: &'static str) -> Result<SfsValue, ProtocolError> {
    obj.remove(key).ok_or(ProtocolError::MissingField(key))
}

// ============================================================================
// ENCODE
// ============================================================================

/// Encode an object, type id included.
///
/// The encoded bytes are appended to `out`. On error `out` is left as it
/// was before the call.
pub fn encode_object(obj: &SfsObject, out: &mut Vec<u8>) -> Result<(), ProtocolError> {
    all_or_nothing(out, |out| write_object(obj, out))
}

/// Encode an array, type id included.
///
/// The encoded bytes are appended to `out`. On error `out` is left as it
/// was before the call.
pub fn encode_array(arr: &SfsArray, out: &mut Vec<u8>) -> Result<(), ProtocolError> {
    all_or_nothing(out, |out| write_array(arr, out))
}

fn all_or_nothing<F>(out: &mut Vec<u8>, write: F) -> Result<(), ProtocolError>
where
    F: FnOnce(&mut Vec<u8>) -> Result<(), ProtocolError>,
{
    let start = out.len();
    let result = write(out);
    if result.is_err() {
        out.truncate(start);
    }
    result
}

fn write_object(obj: &SfsObject, out: &mut Vec<u8>) -> Result<(), ProtocolError> {
    out.push(WireDataType::SfsObject as u8);
    write_count(obj.len(), out)?;

    for (key, value) in obj.iter() {
        let key_bytes = key.as_bytes();
        if !validate_key_len(key_bytes.len()) {
            return Err(ProtocolError::InvalidKey(key_bytes.len()));
        }
        out.extend_from_slice(&(key_bytes.len() as u16).to_be_bytes());
        out.extend_from_slice(key_bytes);
        encode_value(value, out)?;
    }

    Ok(())
}

fn write_array(arr: &SfsArray, out: &mut Vec<u8>) -> Result<(), ProtocolError> {
    out.push(WireDataType::SfsArray as u8);
    write_count(arr.len(), out)?;

    for value in arr {
        encode_value(value, out)?;
    }

    Ok(())
}

fn encode_value(value: &SfsValue, out: &mut Vec<u8>) -> Result<(), ProtocolError> {
    match value {
        SfsValue::Null => out.push(WireDataType::Null as u8),
        SfsValue::Bool(b) => {
            out.push(WireDataType::Bool as u8);
            out.push(*b as u8);
        }
        SfsValue::Byte(b) => {
            out.push(WireDataType::Byte as u8);
            out.extend_from_slice(&b.to_be_bytes());
        }
        SfsValue::Short(v) => {
            out.push(WireDataType::Short as u8);
            out.extend_from_slice(&v.to_be_bytes());
        }
        SfsValue::Int(v) => {
            out.push(WireDataType::Int as u8);
            out.extend_from_slice(&v.to_be_bytes());
        }
        SfsValue::Long(v) => {
            out.push(WireDataType::Long as u8);
            out.extend_from_slice(&v.to_be_bytes());
        }
        SfsValue::Float(v) => {
            out.push(WireDataType::Float as u8);
            out.extend_from_slice(&v.to_be_bytes());
        }
        SfsValue::Double(v) => {
            out.push(WireDataType::Double as u8);
            out.extend_from_slice(&v.to_be_bytes());
        }
        SfsValue::UtfString(s) => {
            out.push(WireDataType::UtfString as u8);
            write_utf(s, out)?;
        }
        SfsValue::BoolArray(v) => {
            out.push(WireDataType::BoolArray as u8);
            write_count(v.len(), out)?;
            out.extend(v.iter().map(|b| *b as u8));
        }
        SfsValue::ByteArray(v) => {
            out.push(WireDataType::ByteArray as u8);
            write_long_len(v.len(), out)?;
            out.extend_from_slice(v);
        }
        SfsValue::ShortArray(v) => {
            out.push(WireDataType::ShortArray as u8);
            write_count(v.len(), out)?;
            for x in v {
                out.extend_from_slice(&x.to_be_bytes());
            }
        }
        SfsValue::IntArray(v) => {
            out.push(WireDataType::IntArray as u8);
            write_count(v.len(), out)?;
            for x in v {
                out.extend_from_slice(&x.to_be_bytes());
            }
        }
        SfsValue::LongArray(v) => {
            out.push(WireDataType::LongArray as u8);
            write_count(v.len(), out)?;
            for x in v {
                out.extend_from_slice(&x.to_be_bytes());
            }
        }
        SfsValue::FloatArray(v) => {
            out.push(WireDataType::FloatArray as u8);
            write_count(v.len(), out)?;
            for x in v {
                out.extend_from_slice(&x.to_be_bytes());
            }
        }
        SfsValue::DoubleArray(v) => {
            out.push(WireDataType::DoubleArray as u8);
            write_count(v.len(), out)?;
            for x in v {
                out.extend_from_slice(&x.to_be_bytes());
            }
        }
        SfsValue::UtfStringArray(v) => {
            out.push(WireDataType::UtfStringArray as u8);
            write_count(v.len(), out)?;
            for s in v {
                write_utf(s, out)?;
            }
        }
        SfsValue::Array(a) => write_array(a, out)?,
        SfsValue::Object(o) => write_object(o, out)?,
        SfsValue::Text(s) => {
            out.push(WireDataType::Text as u8);
            write_long_len(s.len(), out)?;
            out.extend_from_slice(s.as_bytes());
        }
    }

    Ok(())
}

fn write_count(len: usize, out: &mut Vec<u8>) -> Result<(), ProtocolError> {
    if len > MAX_COLLECTION_LEN {
        return Err(ProtocolError::CollectionTooLarge(len));
    }
    out.extend_from_slice(&(len as i16).to_be_bytes());
    Ok(())
}

fn write_utf(s: &str, out: &mut Vec<u8>) -> Result<(), ProtocolError> {
    let bytes = s.as_bytes();
    if bytes.len() > MAX_UTF_STRING_LEN {
        return Err(ProtocolError::StringTooLong(bytes.len()));
    }
    out.extend_from_slice(&(bytes.len() as u16).to_be_bytes());
    out.extend_from_slice(bytes);
    Ok(())
}

fn write_long_len(len: usize, out: &mut Vec<u8>) -> Result<(), ProtocolError> {
    if len > MAX_LONG_PAYLOAD_LEN {
        return Err(ProtocolError::PayloadTooLarge(len));
    }
    out.extend_from_slice(&(len as i32).to_be_bytes());
    Ok(())
}

// ============================================================================
// DECODE
// ============================================================================

/// Decode a buffer holding exactly one object.
pub fn decode_object(buf: &[u8]) -> Result<SfsObject, ProtocolError> {
    let mut reader = Reader::new(buf);
    reader.expect_type(WireDataType::SfsObject)?;
    let obj = read_object_body(&mut reader)?;
    reader.finish()?;
    Ok(obj)
}

/// Decode a buffer holding exactly one array.
pub fn decode_array(buf: &[u8]) -> Result<SfsArray, ProtocolError> {
    let mut reader = Reader::new(buf);
    reader.expect_type(WireDataType::SfsArray)?;
    let arr = read_array_body(&mut reader)?;
    reader.finish()?;
    Ok(arr)
}

fn read_object_body(r: &mut Reader<'_>) -> Result<SfsObject, ProtocolError> {
    r.enter()?;
    let count = r.count()?;
    let mut obj = SfsObject::new();

    for _ in 0..count {
        let key_len = r.u16()? as usize;
        if !validate_key_len(key_len) {
            return Err(ProtocolError::InvalidKey(key_len));
        }
        let key = r.utf8(key_len)?;
        if obj.contains_key(&key) {
            return Err(ProtocolError::DuplicateKey(key));
        }
        let value = read_value(r)?;
        obj.put(key, value);
    }

    r.leave();
    Ok(obj)
}

fn read_array_body(r: &mut Reader<'_>) -> Result<SfsArray, ProtocolError> {
    r.enter()?;
    let count = r.count()?;
    let mut items = Vec::with_capacity(r.capacity_for(count));
    for _ in 0..count {
        items.push(read_value(r)?);
    }
    r.leave();
    Ok(SfsArray::from(items))
}

fn read_value(r: &mut Reader<'_>) -> Result<SfsValue, ProtocolError> {
    let type_id = r.u8()?;
    let wire_type = WireDataType::from_u8(type_id).ok_or(ProtocolError::UnknownType(type_id))?;

    let value = match wire_type {
        WireDataType::Null => SfsValue::Null,
        WireDataType::Bool => SfsValue::Bool(r.bool()?),
        WireDataType::Byte => SfsValue::Byte(i8::from_be_bytes(r.array()?)),
        WireDataType::Short => SfsValue::Short(i16::from_be_bytes(r.array()?)),
        WireDataType::Int => SfsValue::Int(i32::from_be_bytes(r.array()?)),
        WireDataType::Long => SfsValue::Long(i64::from_be_bytes(r.array()?)),
        WireDataType::Float => SfsValue::Float(f32::from_be_bytes(r.array()?)),
        WireDataType::Double => SfsValue::Double(f64::from_be_bytes(r.array()?)),
        WireDataType::UtfString => {
            let len = r.u16()? as usize;
            SfsValue::UtfString(r.utf8(len)?)
        }
        WireDataType::BoolArray => {
            let count = r.count()?;
            let mut v = Vec::with_capacity(r.capacity_for(count));
            for _ in 0..count {
                v.push(r.bool()?);
            }
            SfsValue::BoolArray(v)
        }
        WireDataType::ByteArray => {
            let len = r.long_len()?;
            SfsValue::ByteArray(r.take(len)?.to_vec())
        }
        WireDataType::ShortArray => {
            let count = r.count()?;
            let mut v = Vec::with_capacity(r.capacity_for(count));
            for _ in 0..count {
                v.push(i16::from_be_bytes(r.array()?));
            }
            SfsValue::ShortArray(v)
        }
        WireDataType::IntArray => {
            let count = r.count()?;
            let mut v = Vec::with_capacity(r.capacity_for(count));
            for _ in 0..count {
                v.push(i32::from_be_bytes(r.array()?));
            }
            SfsValue::IntArray(v)
        }
        WireDataType::LongArray => {
            let count = r.count()?;
            let mut v = Vec::with_capacity(r.capacity_for(count));
            for _ in 0..count {
                v.push(i64::from_be_bytes(r.array()?));
            }
            SfsValue::LongArray(v)
        }
        WireDataType::FloatArray => {
            let count = r.count()?;
            let mut v = Vec::with_capacity(r.capacity_for(count));
            for _ in 0..count {
                v.push(f32::from_be_bytes(r.array()?));
            }
            SfsValue::FloatArray(v)
        }
        WireDataType::DoubleArray => {
            let count = r.count()?;
            let mut v = Vec::with_capacity(r.capacity_for(count));
            for _ in 0..count {
                v.push(f64::from_be_bytes(r.array()?));
            }
            SfsValue::DoubleArray(v)
        }
        WireDataType::UtfStringArray => {
            let count = r.count()?;
            let mut v = Vec::with_capacity(r.capacity_for(count));
            for _ in 0..count {
                let len = r.u16()? as usize;
                v.push(r.utf8(len)?);
            }
            SfsValue::UtfStringArray(v)
        }
        WireDataType::SfsArray => SfsValue::Array(read_array_body(r)?),
        WireDataType::SfsObject => SfsValue::Object(read_object_body(r)?),
        WireDataType::Class => return Err(ProtocolError::UnsupportedType(type_id)),
        WireDataType::Text => {
            let len = r.long_len()?;
            SfsValue::Text(r.utf8(len)?)
        }
    };

    Ok(value)
}

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

/// Forward-only cursor over a payload.
struct Reader<'a> {
    buf: &'a [u8],
    offset: usize,
    /// Objects / arrays currently open.
    depth: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Reader {
            buf,
            offset: 0,
            depth: 0,
        }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    /// Every element takes at least one byte, so a count never needs more
    /// slots than there are bytes left.
    fn capacity_for(&self, count: usize) -> usize {
        count.min(self.remaining())
    }

    fn enter(&mut self) -> Result<(), ProtocolError> {
        if self.depth >= MAX_DEPTH {
            return Err(ProtocolError::DepthExceeded(MAX_DEPTH));
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], ProtocolError> {
        let end = self.offset.checked_add(n).ok_or(ProtocolError::Truncated)?;
        if end > self.buf.len() {
            return Err(ProtocolError::Truncated);
        }
        let bytes = &self.buf[self.offset..end];
        self.offset = end;
        Ok(bytes)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], ProtocolError> {
        let mut arr = [0u8; N];
        arr.copy_from_slice(self.take(N)?);
        Ok(arr)
    }

    fn u8(&mut self) -> Result<u8, ProtocolError> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16, ProtocolError> {
        Ok(u16::from_be_bytes(self.array()?))
    }

    fn bool(&mut self) -> Result<bool, ProtocolError> {
        match self.u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(ProtocolError::InvalidBool(other)),
        }
    }

    /// Signed 16-bit entry count.
    fn count(&mut self) -> Result<usize, ProtocolError> {
        let n = i16::from_be_bytes(self.array()?);
        usize::try_from(n).map_err(|_| ProtocolError::NegativeLength)
    }

    /// Signed 32-bit byte length.
    fn long_len(&mut self) -> Result<usize, ProtocolError> {
        let n = i32::from_be_bytes(self.array()?);
        usize::try_from(n).map_err(|_| ProtocolError::NegativeLength)
    }

    fn utf8(&mut self, len: usize) -> Result<String, ProtocolError> {
        let bytes = self.take(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|_| ProtocolError::InvalidUtf8)
    }

    fn expect_type(&mut self, expected: WireDataType) -> Result<(), ProtocolError> {
        let got = self.u8()?;
        if got != expected as u8 {
            return Err(ProtocolError::UnexpectedType {
                expected: expected as u8,
                got,
            });
        }
        Ok(())
    }

    fn finish(&self) -> Result<(), ProtocolError> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(ProtocolError::TrailingBytes(n)),
        }
    }
}
