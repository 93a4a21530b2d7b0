//! Structured containers: `SfsObject` (keyed) and `SfsArray` (indexed).
//!
//! Objects keep insertion order so that encoding is deterministic:
//! the same sequence of puts always yields the same bytes.

use indexmap::IndexMap;
use serde::Serialize;

use crate::value::SfsValue;

/// Ordered string-keyed map of typed values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SfsObject {
    entries: IndexMap<String, SfsValue>,
}

impl SfsObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace `key`. A replaced key keeps its original position.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<SfsValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn put_null(&mut self, key: impl Into<String>) {
        self.put(key, SfsValue::Null);
    }

    pub fn put_bool(&mut self, key: impl Into<String>, v: bool) {
        self.put(key, SfsValue::Bool(v));
    }

    pub fn put_byte(&mut self, key: impl Into<String>, v: i8) {
        self.put(key, SfsValue::Byte(v));
    }

    pub fn put_short(&mut self, key: impl Into<String>, v: i16) {
        self.put(key, SfsValue::Short(v));
    }

    pub fn put_int(&mut self, key: impl Into<String>, v: i32) {
        self.put(key, SfsValue::Int(v));
    }

    pub fn put_long(&mut self, key: impl Into<String>, v: i64) {
        self.put(key, SfsValue::Long(v));
    }

    pub fn put_double(&mut self, key: impl Into<String>, v: f64) {
        self.put(key, SfsValue::Double(v));
    }

    pub fn put_utf_string(&mut self, key: impl Into<String>, v: impl Into<String>) {
        self.put(key, SfsValue::UtfString(v.into()));
    }

    pub fn put_array(&mut self, key: impl Into<String>, v: SfsArray) {
        self.put(key, SfsValue::Array(v));
    }

    pub fn put_object(&mut self, key: impl Into<String>, v: SfsObject) {
        self.put(key, SfsValue::Object(v));
    }

    pub fn get(&self, key: &str) -> Option<&SfsValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<SfsValue> {
        self.entries.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SfsValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    // Typed getters: `None` when the key is missing or holds another type.

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            SfsValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn get_byte(&self, key: &str) -> Option<i8> {
        match self.get(key)? {
            SfsValue::Byte(v) => Some(*v),
            _ => None,
        }
    }

    pub fn get_short(&self, key: &str) -> Option<i16> {
        match self.get(key)? {
            SfsValue::Short(v) => Some(*v),
            _ => None,
        }
    }

    pub fn get_int(&self, key: &str) -> Option<i32> {
        match self.get(key)? {
            SfsValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn get_utf_string(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            SfsValue::UtfString(s) => Some(s),
            _ => None,
        }
    }

    pub fn get_array(&self, key: &str) -> Option<&SfsArray> {
        self.get(key)?.as_array()
    }

    pub fn get_object(&self, key: &str) -> Option<&SfsObject> {
        self.get(key)?.as_object()
    }
}

impl<K: Into<String>, V: Into<SfsValue>> FromIterator<(K, V)> for SfsObject {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut obj = SfsObject::new();
        for (k, v) in iter {
            obj.put(k, v);
        }
        obj
    }
}

/// Ordered list of typed values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SfsArray {
    items: Vec<SfsValue>,
}

impl SfsArray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: impl Into<SfsValue>) {
        self.items.push(value.into());
    }

    pub fn add_null(&mut self) {
        self.items.push(SfsValue::Null);
    }

    pub fn add_bool(&mut self, v: bool) {
        self.items.push(SfsValue::Bool(v));
    }

    pub fn add_byte(&mut self, v: i8) {
        self.items.push(SfsValue::Byte(v));
    }

    pub fn add_int(&mut self, v: i32) {
        self.items.push(SfsValue::Int(v));
    }

    pub fn add_double(&mut self, v: f64) {
        self.items.push(SfsValue::Double(v));
    }

    pub fn add_utf_string(&mut self, v: impl Into<String>) {
        self.items.push(SfsValue::UtfString(v.into()));
    }

    pub fn add_array(&mut self, v: SfsArray) {
        self.items.push(SfsValue::Array(v));
    }

    pub fn add_object(&mut self, v: SfsObject) {
        self.items.push(SfsValue::Object(v));
    }

    pub fn get(&self, index: usize) -> Option<&SfsValue> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SfsValue> {
        self.items.iter()
    }
}

impl From<Vec<SfsValue>> for SfsArray {
    fn from(items: Vec<SfsValue>) -> Self {
        SfsArray { items }
    }
}

impl FromIterator<SfsValue> for SfsArray {
    fn from_iter<I: IntoIterator<Item = SfsValue>>(iter: I) -> Self {
        SfsArray {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SfsArray {
    type Item = &'a SfsValue;
    type IntoIter = std::slice::Iter<'a, SfsValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
