use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Debug, Display, Formatter};

use crate::collection::Array;
use crate::common::{JsonType, ScalarValue, Value};

/// A schemaless JSON object.
///
/// A document is a map from string keys to [Value]s. Keys keep the order in
/// which they were first inserted, and that order is used when the document
/// is serialized.
///
/// Reading never fails: every typed getter takes a default that is returned
/// when the key is absent or holds a value of another kind. Nested documents
/// and arrays are returned as empty containers in that case.
///
/// Writing goes through two families of methods:
///
/// * [Document::set] stores a scalar (number, boolean or string). It writes
///   even when `key` is empty.
/// * [Document::put_document], [Document::put_array] and [Document::put_null]
///   store containers and `null`. They ignore an empty key.
///
/// Client code may rely on either behavior, so the two paths stay distinct.
///
/// A document owns its values; cloning copies the whole tree.
#[derive(Clone, Default, PartialEq)]
pub struct Document {
    data: IndexMap<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Document {
            data: IndexMap::new(),
        }
    }

    /// Parses a JSON object.
    ///
    /// Malformed text, or text whose top level is not an object, yields an
    /// empty document. Parsing never reports an error.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let doc = Document::from_json(r#"{"name":"Alice","age":30}"#);
    /// assert_eq!(doc.get_i32("age", 0), 30);
    ///
    /// let broken = Document::from_json("{\"name\":");
    /// assert!(broken.is_empty());
    ///
    /// let array = Document::from_json("[1,2]");
    /// assert!(array.is_empty());
    /// ```
    pub fn from_json(text: &str) -> Self {
        let mut doc = Document::new();
        doc.put_all(text);
        doc
    }

    /// Same as [Document::from_json] for a raw byte buffer, such as a
    /// response body.
    pub fn from_slice(bytes: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Document(doc)) => doc,
            Ok(other) => {
                log::debug!("Expected a JSON object, found {}", other.json_type());
                Document::new()
            }
            Err(err) => {
                log::debug!("Failed to parse JSON object: {}", err);
                Document::new()
            }
        }
    }

    /// Replaces the whole content with the parsed `text`.
    ///
    /// Returns `true` when `text` is syntactically valid JSON. If it is valid
    /// but not an object, the document is left empty and `true` is still
    /// returned. On a syntax error the document is left empty and `false` is
    /// returned.
    pub fn put_all(&mut self, text: &str) -> bool {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Document(doc)) => {
                self.data = doc.data;
                true
            }
            Ok(other) => {
                log::debug!("Expected a JSON object, found {}", other.json_type());
                self.data.clear();
                true
            }
            Err(err) => {
                log::debug!("Failed to parse JSON object: {}", err);
                self.data.clear();
                false
            }
        }
    }

    /// Keys of this document in insertion order.
    pub fn key_set(&self) -> Vec<String> {
        self.data.keys().cloned().collect()
    }

    /// Returns the raw [Value] stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Reads an `i32`.
    ///
    /// Any number is accepted as long as it fits: an `i64` of `7` reads as
    /// `7`, a float is truncated toward zero. A number outside `i32` range,
    /// or a value of another kind, yields `default`.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let doc = Document::from_json(r#"{"a":1.9,"b":4294967295,"c":"1"}"#);
    /// assert_eq!(doc.get_i32("a", -1), 1);
    /// assert_eq!(doc.get_i32("b", -1), -1);
    /// assert_eq!(doc.get_i32("c", -1), -1);
    /// assert_eq!(doc.get_i32("missing", -1), -1);
    /// ```
    pub fn get_i32(&self, key: &str, default: i32) -> i32 {
        self.get(key).and_then(Value::to_i32).unwrap_or(default)
    }

    /// Reads a `u32`. See [Document::get_i32].
    pub fn get_u32(&self, key: &str, default: u32) -> u32 {
        self.get(key).and_then(Value::to_u32).unwrap_or(default)
    }

    /// Reads an `i64`. See [Document::get_i32].
    pub fn get_i64(&self, key: &str, default: i64) -> i64 {
        self.get(key).and_then(Value::to_i64).unwrap_or(default)
    }

    /// Reads a `u64`. See [Document::get_i32].
    pub fn get_u64(&self, key: &str, default: u64) -> u64 {
        self.get(key).and_then(Value::to_u64).unwrap_or(default)
    }

    /// Reads any number as `f64`.
    pub fn get_f64(&self, key: &str, default: f64) -> f64 {
        self.get(key).and_then(Value::to_f64).unwrap_or(default)
    }

    /// Reads a boolean. Numbers are not coerced.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    /// Reads a string. Numbers are not stringified.
    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    }

    /// Returns a copy of the nested document under `key`, or an empty one.
    pub fn get_document(&self, key: &str) -> Document {
        self.get(key)
            .and_then(Value::as_document)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns a copy of the nested array under `key`, or an empty one.
    pub fn get_array(&self, key: &str) -> Array {
        self.get(key)
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    }

    /// Kind of the value under `key`. An absent key reports [JsonType::Null].
    pub fn get_type(&self, key: &str) -> JsonType {
        self.get(key)
            .map(Value::json_type)
            .unwrap_or(JsonType::Null)
    }

    /// Stores a scalar under `key`, replacing any previous value.
    ///
    /// Unlike the `put_*` methods this writes even when `key` is empty.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut doc = Document::new();
    /// doc.set("name", "Alice");
    /// doc.set("age", 30);
    /// doc.set("", true);
    /// assert_eq!(doc.to_json_string(), r#"{"name":"Alice","age":30,"":true}"#);
    /// ```
    pub fn set<T: ScalarValue>(&mut self, key: &str, value: T) {
        self.data.insert(key.to_string(), value.into());
    }

    /// Stores a copy of `document` under `key`. No-op for an empty key.
    pub fn put_document(&mut self, key: &str, document: &Document) {
        if key.is_empty() {
            log::warn!("Ignoring document put with an empty key");
            return;
        }
        self.data
            .insert(key.to_string(), Value::Document(document.clone()));
    }

    /// Stores a copy of `array` under `key`. No-op for an empty key.
    pub fn put_array(&mut self, key: &str, array: &Array) {
        if key.is_empty() {
            log::warn!("Ignoring array put with an empty key");
            return;
        }
        self.data.insert(key.to_string(), Value::Array(array.clone()));
    }

    /// Stores `null` under `key`. No-op for an empty key.
    pub fn put_null(&mut self, key: &str) {
        if key.is_empty() {
            log::warn!("Ignoring null put with an empty key");
            return;
        }
        self.data.insert(key.to_string(), Value::Null);
    }

    /// Inserts an already built value. Keeps the position of an existing key.
    pub(crate) fn insert_value(&mut self, key: impl Into<String>, value: Value) {
        self.data.insert(key.into(), value);
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.data.get_mut(key)
    }

    /// Removes `key` and returns its value. Remaining keys keep their order.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Removes every key in place.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }

    /// Compact JSON text, keys in insertion order, no trailing newline.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|err| {
            log::error!("Failed to serialize document: {}", err);
            String::from("{}")
        })
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_json_string())
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_json_string())
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.data.iter())
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Document(doc) => Ok(doc),
            other => Err(D::Error::custom(format!(
                "expected a JSON object, found {}",
                other.json_type()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_keeps_insertion_order() {
        let doc = Document::from_json(r#"{"z":1,"a":2,"m":3}"#);
        assert_eq!(doc.key_set(), vec!["z", "a", "m"]);
        assert_eq!(doc.to_json_string(), r#"{"z":1,"a":2,"m":3}"#);
    }

    #[test]
    fn test_from_json_degrades_to_empty() {
        assert!(Document::from_json("").is_empty());
        assert!(Document::from_json("{\"a\":").is_empty());
        assert!(Document::from_json("[1,2,3]").is_empty());
        assert!(Document::from_json("42").is_empty());
    }

    #[test]
    fn test_put_all_reports_syntax_only() {
        let mut doc = Document::from_json(r#"{"a":1}"#);
        assert!(!doc.put_all("{broken"));
        assert!(doc.is_empty());

        let mut doc = Document::from_json(r#"{"a":1}"#);
        assert!(doc.put_all("[1]"));
        assert!(doc.is_empty());

        assert!(doc.put_all(r#"{"b":true}"#));
        assert!(doc.get_bool("b", false));
    }

    #[test]
    fn test_from_slice() {
        let doc = Document::from_slice(br#"{"k":"v"}"#);
        assert_eq!(doc.get_string("k", ""), "v");
        assert!(Document::from_slice(b"\xff\xfe").is_empty());
    }

    #[test]
    fn test_integer_getters() {
        let doc = Document::from_json(
            r#"{"small":123,"big":5000000000,"neg":-7,"huge":18446744073709551615,"real":12.75}"#,
        );
        assert_eq!(doc.get_i32("small", 0), 123);
        assert_eq!(doc.get_i32("big", -1), -1);
        assert_eq!(doc.get_i64("big", -1), 5_000_000_000);
        assert_eq!(doc.get_u32("neg", 9), 9);
        assert_eq!(doc.get_i64("huge", -1), -1);
        assert_eq!(doc.get_u64("huge", 0), u64::MAX);
        assert_eq!(doc.get_i32("real", 0), 12);
        assert_eq!(doc.get_f64("real", 0.0), 12.75);
        assert_eq!(doc.get_f64("huge", 0.0), u64::MAX as f64);
    }

    #[test]
    fn test_unsigned_max_through_i32_returns_default() {
        let mut doc = Document::new();
        doc.set("u", u32::MAX);
        assert_eq!(doc.get_i32("u", 0), 0);
        assert_eq!(doc.get_u32("u", 0), u32::MAX);
        assert_eq!(doc.get_i64("u", 0), u32::MAX as i64);
    }

    #[test]
    fn test_no_cross_kind_coercion() {
        let doc = Document::from_json(r#"{"n":1,"s":"1","b":true}"#);
        assert_eq!(doc.get_string("n", "default"), "default");
        assert_eq!(doc.get_i32("s", -1), -1);
        assert!(!doc.get_bool("n", false));
        assert_eq!(doc.get_i32("b", -1), -1);
        assert_eq!(doc.get_f64("b", 0.5), 0.5);
    }

    #[test]
    fn test_container_getters_return_empty() {
        let doc = Document::from_json(r#"{"o":{"x":1},"a":[1],"s":"str"}"#);
        assert_eq!(doc.get_document("o").get_i32("x", 0), 1);
        assert_eq!(doc.get_array("a").size(), 1);
        assert!(doc.get_document("s").is_empty());
        assert!(doc.get_document("a").is_empty());
        assert!(doc.get_array("o").is_empty());
        assert!(doc.get_array("missing").is_empty());
    }

    #[test]
    fn test_getters_have_no_side_effects() {
        let doc = Document::from_json(r#"{"a":1}"#);
        let _ = doc.get_string("missing", "x");
        let _ = doc.get_document("missing");
        assert_eq!(doc.size(), 1);
        assert!(!doc.contains_key("missing"));
    }

    #[test]
    fn test_set_writes_with_empty_key() {
        let mut doc = Document::new();
        doc.set("", 5);
        assert_eq!(doc.get_i32("", 0), 5);
        assert_eq!(doc.to_json_string(), r#"{"":5}"#);
    }

    #[test]
    fn test_put_family_ignores_empty_key() {
        let mut doc = Document::new();
        doc.put_document("", &Document::from_json(r#"{"a":1}"#));
        doc.put_array("", &Array::from_json("[1]"));
        doc.put_null("");
        assert!(doc.is_empty());
    }

    #[test]
    fn test_put_family() {
        let mut doc = Document::new();
        doc.put_document("o", &Document::from_json(r#"{"a":1}"#));
        doc.put_array("a", &Array::from_json("[true]"));
        doc.put_null("n");
        assert_eq!(doc.to_json_string(), r#"{"o":{"a":1},"a":[true],"n":null}"#);
        assert_eq!(doc.get_type("o"), JsonType::Object);
        assert_eq!(doc.get_type("a"), JsonType::Array);
        assert_eq!(doc.get_type("n"), JsonType::Null);
        assert_eq!(doc.get_type("missing"), JsonType::Null);
    }

    #[test]
    fn test_put_copies_container() {
        let mut inner = Document::from_json(r#"{"a":1}"#);
        let mut doc = Document::new();
        doc.put_document("inner", &inner);
        inner.set("a", 2);
        assert_eq!(doc.get_document("inner").get_i32("a", 0), 1);
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut doc = Document::from_json(r#"{"a":1,"b":2}"#);
        doc.set("a", "x");
        assert_eq!(doc.to_json_string(), r#"{"a":"x","b":2}"#);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut doc = Document::from_json(r#"{"a":1,"b":2,"c":3}"#);
        assert_eq!(doc.remove("b"), Some(Value::I64(2)));
        assert_eq!(doc.remove("b"), None);
        assert_eq!(doc.key_set(), vec!["a", "c"]);
        doc.clear();
        assert!(doc.is_empty());
        assert_eq!(doc.to_json_string(), "{}");
    }

    #[test]
    fn test_serialize_round_trip() {
        let mut doc = Document::new();
        doc.set("i", -12);
        doc.set("u", 42u64);
        doc.set("f", 1.25);
        doc.set("b", false);
        doc.set("s", "quote\"d");
        let text = doc.to_json_string();
        assert_eq!(Document::from_json(&text).to_json_string(), text);
        assert_eq!(Document::from_json(&text), doc);
    }

    #[test]
    fn test_deserialize_rejects_non_object() {
        assert!(serde_json::from_str::<Document>("[1]").is_err());
        let doc: Document = serde_json::from_str(r#"{"a":null}"#).unwrap();
        assert!(doc.contains_key("a"));
    }
}
