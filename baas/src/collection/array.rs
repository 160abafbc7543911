use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt::{Debug, Display, Formatter};

use crate::collection::Document;
use crate::common::{JsonType, ScalarValue, Value, NULL_VALUE};

/// Largest size an [Array] can reach. The index with this value is never
/// writable.
pub const ARRAY_MAX_SIZE: u32 = u32::MAX;

/// A JSON array addressed by `u32` indices.
///
/// Writing past the end grows the array; the gap reads as `null`. Slots are
/// stored sparsely, so writing at `ARRAY_MAX_SIZE - 1` is cheap and brings
/// the size to [ARRAY_MAX_SIZE].
///
/// Capacity rules:
///
/// * every write addressed at index [ARRAY_MAX_SIZE] is rejected and returns
///   `false`, without growing the array;
/// * appending to an array whose size is already [ARRAY_MAX_SIZE] returns
///   `false` and leaves it unchanged.
#[derive(Clone, Default)]
pub struct Array {
    len: u32,
    slots: BTreeMap<u32, Value>,
}

impl Array {
    pub fn new() -> Self {
        Array {
            len: 0,
            slots: BTreeMap::new(),
        }
    }

    /// Parses a JSON array. Malformed text or a non-array top level yields an
    /// empty array.
    pub fn from_json(text: &str) -> Self {
        let mut array = Array::new();
        array.put_all(text);
        array
    }

    /// Replaces the whole content with the parsed `text`.
    ///
    /// Returns `true` when `text` is syntactically valid JSON; the array is
    /// left empty when it is not, or when its top level is not an array.
    pub fn put_all(&mut self, text: &str) -> bool {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Array(array)) => {
                *self = array;
                true
            }
            Ok(other) => {
                log::debug!("Expected a JSON array, found {}", other.json_type());
                self.clear();
                true
            }
            Err(err) => {
                log::debug!("Failed to parse JSON array: {}", err);
                self.clear();
                false
            }
        }
    }

    /// Replaces the content with `items`, one element per item, in order.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut array = Array::from_json(r#"["old"]"#);
    /// array.put_all_list([1, 2, 3]);
    /// assert_eq!(array.to_json_string(), "[1,2,3]");
    /// ```
    pub fn put_all_list<T, I>(&mut self, items: I)
    where
        T: ScalarValue,
        I: IntoIterator<Item = T>,
    {
        self.clear();
        for item in items {
            if !self.append(item) {
                log::warn!("Array is full, dropping remaining list items");
                break;
            }
        }
    }

    /// Number of elements, holes included.
    pub fn size(&self) -> u32 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the raw value at `index`. Holes read as `null`.
    pub fn get(&self, index: u32) -> Option<&Value> {
        if index >= self.len {
            return None;
        }
        Some(self.slots.get(&index).unwrap_or(&NULL_VALUE))
    }

    /// Reads an `i32`, with the conversion rules of [Document::get_i32].
    pub fn get_i32(&self, index: u32, default: i32) -> i32 {
        self.get(index).and_then(Value::to_i32).unwrap_or(default)
    }

    pub fn get_u32(&self, index: u32, default: u32) -> u32 {
        self.get(index).and_then(Value::to_u32).unwrap_or(default)
    }

    pub fn get_i64(&self, index: u32, default: i64) -> i64 {
        self.get(index).and_then(Value::to_i64).unwrap_or(default)
    }

    pub fn get_u64(&self, index: u32, default: u64) -> u64 {
        self.get(index).and_then(Value::to_u64).unwrap_or(default)
    }

    pub fn get_f64(&self, index: u32, default: f64) -> f64 {
        self.get(index).and_then(Value::to_f64).unwrap_or(default)
    }

    pub fn get_bool(&self, index: u32, default: bool) -> bool {
        self.get(index).and_then(Value::as_bool).unwrap_or(default)
    }

    pub fn get_string(&self, index: u32, default: &str) -> String {
        self.get(index)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    }

    /// Returns a copy of the nested document at `index`, or an empty one.
    pub fn get_document(&self, index: u32) -> Document {
        self.get(index)
            .and_then(Value::as_document)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns a copy of the nested array at `index`, or an empty one.
    pub fn get_array(&self, index: u32) -> Array {
        self.get(index)
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    }

    /// Kind of the element at `index`; out of range reports [JsonType::Null].
    pub fn get_type(&self, index: u32) -> JsonType {
        self.get(index)
            .map(Value::json_type)
            .unwrap_or(JsonType::Null)
    }

    /// Stores a scalar at `index`, growing the array when needed.
    pub fn set<T: ScalarValue>(&mut self, index: u32, value: T) -> bool {
        self.store(index, value.into())
    }

    /// Stores a copy of `document` at `index`.
    pub fn put_document(&mut self, index: u32, document: &Document) -> bool {
        self.store(index, Value::Document(document.clone()))
    }

    /// Stores a copy of `array` at `index`.
    pub fn put_array(&mut self, index: u32, array: &Array) -> bool {
        self.store(index, Value::Array(array.clone()))
    }

    pub fn put_null(&mut self, index: u32) -> bool {
        self.store(index, Value::Null)
    }

    /// Appends a scalar. Returns `false` when the array is full.
    pub fn append<T: ScalarValue>(&mut self, value: T) -> bool {
        self.append_value(value.into())
    }

    pub fn append_document(&mut self, document: &Document) -> bool {
        self.append_value(Value::Document(document.clone()))
    }

    pub fn append_array(&mut self, array: &Array) -> bool {
        self.append_value(Value::Array(array.clone()))
    }

    pub fn append_null(&mut self) -> bool {
        self.append_value(Value::Null)
    }

    pub(crate) fn append_value(&mut self, value: Value) -> bool {
        if self.len == ARRAY_MAX_SIZE {
            log::warn!("Array already holds {} elements", ARRAY_MAX_SIZE);
            return false;
        }
        self.store(self.len, value)
    }

    fn store(&mut self, index: u32, value: Value) -> bool {
        if index == ARRAY_MAX_SIZE {
            // reserved sentinel, never addressable
            log::warn!("Index {} is out of the writable range", index);
            return false;
        }
        if index >= self.len {
            self.len = index + 1;
        }
        if value.is_null() {
            self.slots.remove(&index);
        } else {
            self.slots.insert(index, value);
        }
        true
    }

    /// Removes the element at `index` and shifts the following elements
    /// down by one. Returns `false` when `index` is out of range.
    pub fn remove(&mut self, index: u32) -> bool {
        if index >= self.len {
            return false;
        }
        let tail = self.slots.split_off(&index);
        for (position, value) in tail {
            if position > index {
                self.slots.insert(position - 1, value);
            }
        }
        self.len -= 1;
        true
    }

    pub fn clear(&mut self) {
        self.len = 0;
        self.slots.clear();
    }

    /// Iterates over all elements in positional order, holes as `null`.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        (0..self.len).map(move |index| self.slots.get(&index).unwrap_or(&NULL_VALUE))
    }

    /// Reads every element as `i32`, substituting `default` per element.
    pub fn get_all_i32(&self, default: i32) -> Vec<i32> {
        self.iter()
            .map(|v| v.to_i32().unwrap_or(default))
            .collect()
    }

    pub fn get_all_i64(&self, default: i64) -> Vec<i64> {
        self.iter()
            .map(|v| v.to_i64().unwrap_or(default))
            .collect()
    }

    pub fn get_all_f64(&self, default: f64) -> Vec<f64> {
        self.iter()
            .map(|v| v.to_f64().unwrap_or(default))
            .collect()
    }

    pub fn get_all_bool(&self, default: bool) -> Vec<bool> {
        self.iter()
            .map(|v| v.as_bool().unwrap_or(default))
            .collect()
    }

    pub fn get_all_string(&self, default: &str) -> Vec<String> {
        self.iter()
            .map(|v| v.as_str().unwrap_or(default).to_string())
            .collect()
    }

    /// Compact JSON text in positional order, no trailing newline.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|err| {
            log::error!("Failed to serialize array: {}", err);
            String::from("[]")
        })
    }
}

impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        // holes and explicit nulls compare equal
        self.len == other.len
            && self
                .slots
                .iter()
                .all(|(index, value)| other.get(*index) == Some(value))
            && other
                .slots
                .iter()
                .all(|(index, value)| self.get(*index) == Some(value))
    }
}

impl Debug for Array {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_json_string())
    }
}

impl Display for Array {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_json_string())
    }
}

impl Serialize for Array {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for Array {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Array(array) => Ok(array),
            other => Err(D::Error::custom(format!(
                "expected a JSON array, found {}",
                other.json_type()
            ))),
        }
    }
}
