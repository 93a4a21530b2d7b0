//! Typed values carried by objects and arrays.
//!
//! Every value remembers its protocol type, so an `Int(42)` and a
//! `Short(42)` are different values and are encoded differently. The
//! numeric type ids used on the wire live in `sfs-protocol`; this module
//! is purely logical.

use std::fmt;

use serde::Serialize;

use crate::object::{SfsArray, SfsObject};

/// A single typed value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SfsValue {
    Null,
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    UtfString(String),
    BoolArray(Vec<bool>),
    ByteArray(Vec<u8>),
    ShortArray(Vec<i16>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
    FloatArray(Vec<f32>),
    DoubleArray(Vec<f64>),
    UtfStringArray(Vec<String>),
    Array(SfsArray),
    Object(SfsObject),
    /// Long string (32-bit length prefix on the wire).
    Text(String),
}

impl SfsValue {
    /// Short lowercase type label, as used in dumps and warnings.
    pub fn type_name(&self) -> &'static str {
        match self {
            SfsValue::Null => "null",
            SfsValue::Bool(_) => "bool",
            SfsValue::Byte(_) => "byte",
            SfsValue::Short(_) => "short",
            SfsValue::Int(_) => "int",
            SfsValue::Long(_) => "long",
            SfsValue::Float(_) => "float",
            SfsValue::Double(_) => "double",
            SfsValue::UtfString(_) => "utf_string",
            SfsValue::BoolArray(_) => "bool_array",
            SfsValue::ByteArray(_) => "byte_array",
            SfsValue::ShortArray(_) => "short_array",
            SfsValue::IntArray(_) => "int_array",
            SfsValue::LongArray(_) => "long_array",
            SfsValue::FloatArray(_) => "float_array",
            SfsValue::DoubleArray(_) => "double_array",
            SfsValue::UtfStringArray(_) => "utf_string_array",
            SfsValue::Array(_) => "sfs_array",
            SfsValue::Object(_) => "sfs_object",
            SfsValue::Text(_) => "text",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SfsValue::Null)
    }

    /// Integer view of `Byte`, `Short`, `Int` and `Long` values.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            SfsValue::Byte(v) => Some(v as i64),
            SfsValue::Short(v) => Some(v as i64),
            SfsValue::Int(v) => Some(v as i64),
            SfsValue::Long(v) => Some(v),
            _ => None,
        }
    }

    /// String view of `UtfString` and `Text` values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SfsValue::UtfString(s) | SfsValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&SfsArray> {
        match self {
            SfsValue::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&SfsObject> {
        match self {
            SfsValue::Object(o) => Some(o),
            _ => None,
        }
    }
}

impl fmt::Display for SfsValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SfsValue::Null => write!(f, "null"),
            SfsValue::Bool(v) => write!(f, "{}", v),
            SfsValue::Byte(v) => write!(f, "{}", v),
            SfsValue::Short(v) => write!(f, "{}", v),
            SfsValue::Int(v) => write!(f, "{}", v),
            SfsValue::Long(v) => write!(f, "{}", v),
            SfsValue::Float(v) => write!(f, "{}", v),
            SfsValue::Double(v) => write!(f, "{}", v),
            SfsValue::UtfString(s) | SfsValue::Text(s) => write!(f, "{}", s),
            SfsValue::BoolArray(v) => write!(f, "{:?}", v),
            SfsValue::ByteArray(v) => write!(f, "[byte_array, size: {}]", v.len()),
            SfsValue::ShortArray(v) => write!(f, "{:?}", v),
            SfsValue::IntArray(v) => write!(f, "{:?}", v),
            SfsValue::LongArray(v) => write!(f, "{:?}", v),
            SfsValue::FloatArray(v) => write!(f, "{:?}", v),
            SfsValue::DoubleArray(v) => write!(f, "{:?}", v),
            SfsValue::UtfStringArray(v) => write!(f, "{:?}", v),
            SfsValue::Array(a) => write!(f, "[sfs_array, size: {}]", a.len()),
            SfsValue::Object(o) => write!(f, "{{sfs_object, size: {}}}", o.len()),
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions from plain Rust values
// -----------------------------------------------------------------------------

impl From<bool> for SfsValue {
    fn from(v: bool) -> Self {
        SfsValue::Bool(v)
    }
}

impl From<i8> for SfsValue {
    fn from(v: i8) -> Self {
        SfsValue::Byte(v)
    }
}

impl From<i16> for SfsValue {
    fn from(v: i16) -> Self {
        SfsValue::Short(v)
    }
}

impl From<i32> for SfsValue {
    fn from(v: i32) -> Self {
        SfsValue::Int(v)
    }
}

impl From<i64> for SfsValue {
    fn from(v: i64) -> Self {
        SfsValue::Long(v)
    }
}

impl From<f32> for SfsValue {
    fn from(v: f32) -> Self {
        SfsValue::Float(v)
    }
}

impl From<f64> for SfsValue {
    fn from(v: f64) -> Self {
        SfsValue::Double(v)
    }
}

impl From<&str> for SfsValue {
    fn from(v: &str) -> Self {
        SfsValue::UtfString(v.to_string())
    }
}

impl From<String> for SfsValue {
    fn from(v: String) -> Self {
        SfsValue::UtfString(v)
    }
}

impl From<SfsArray> for SfsValue {
    fn from(v: SfsArray) -> Self {
        SfsValue::Array(v)
    }
}

impl From<SfsObject> for SfsValue {
    fn from(v: SfsObject) -> Self {
        SfsValue::Object(v)
    }
}
