use crate::collection::{Array, Document};
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Debug, Display, Formatter};

/// Kind of a JSON value as reported by [Document::get_type] and
/// [Array::get_type]. All numeric representations report [JsonType::Number].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    Null,
    Number,
    Boolean,
    String,
    Object,
    Array,
}

impl Display for JsonType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonType::Null => write!(f, "null"),
            JsonType::Number => write!(f, "number"),
            JsonType::Boolean => write!(f, "boolean"),
            JsonType::String => write!(f, "string"),
            JsonType::Object => write!(f, "object"),
            JsonType::Array => write!(f, "array"),
        }
    }
}

/// A JSON value held by a [Document] or an [Array].
///
/// Numbers keep the representation they were parsed or stored with:
/// integers that fit in `i64` are [Value::I64], larger non-negative integers
/// are [Value::U64] and everything else is [Value::F64]. The typed views
/// ([Value::to_i32], [Value::to_i64], ...) convert between them and return
/// `None` when the number does not fit the requested width.
///
/// # Usage
/// ```text
/// let v: Value = 42.into();
/// assert_eq!(v.to_i32(), Some(42));
/// assert_eq!(v.to_json_string(), "42");
/// ```
#[derive(Clone, Default)]
pub enum Value {
    /// JSON `null`.
    #[default]
    Null,
    /// JSON `true`/`false`.
    Bool(bool),
    /// Signed integer.
    I64(i64),
    /// Unsigned integer, used for values above `i64::MAX` and for `u32`/`u64` inputs.
    U64(u64),
    /// Floating point number.
    F64(f64),
    /// JSON string.
    String(String),
    /// JSON object.
    Document(Document),
    /// JSON array.
    Array(Array),
}

pub(crate) static NULL_VALUE: Value = Value::Null;

#[inline]
fn in_range(value: f64, min: f64, max: f64) -> bool {
    value >= min && value <= max
}

impl Value {
    pub fn json_type(&self) -> JsonType {
        match self {
            Value::Null => JsonType::Null,
            Value::Bool(_) => JsonType::Boolean,
            Value::I64(_) | Value::U64(_) | Value::F64(_) => JsonType::Number,
            Value::String(_) => JsonType::String,
            Value::Document(_) => JsonType::Object,
            Value::Array(_) => JsonType::Array,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, Value::I64(_) | Value::U64(_) | Value::F64(_))
    }

    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    pub fn is_document(&self) -> bool {
        matches!(self, Value::Document(_))
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Value::Document(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn as_document_mut(&mut self) -> Option<&mut Document> {
        match self {
            Value::Document(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Reads the number as `i32`. Integers must fit; floats are truncated
    /// toward zero when they lie within `i32` range.
    pub fn to_i32(&self) -> Option<i32> {
        match self {
            Value::I64(v) => i32::try_from(*v).ok(),
            Value::U64(v) => i32::try_from(*v).ok(),
            Value::F64(v) if in_range(*v, i32::MIN as f64, i32::MAX as f64) => Some(*v as i32),
            _ => None,
        }
    }

    /// Reads the number as `u32`, with the same rules as [Value::to_i32].
    pub fn to_u32(&self) -> Option<u32> {
        match self {
            Value::I64(v) => u32::try_from(*v).ok(),
            Value::U64(v) => u32::try_from(*v).ok(),
            Value::F64(v) if in_range(*v, 0.0, u32::MAX as f64) => Some(*v as u32),
            _ => None,
        }
    }

    /// Reads the number as `i64`, with the same rules as [Value::to_i32].
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Value::I64(v) => Some(*v),
            Value::U64(v) => i64::try_from(*v).ok(),
            Value::F64(v) if in_range(*v, i64::MIN as f64, i64::MAX as f64) => Some(*v as i64),
            _ => None,
        }
    }

    /// Reads the number as `u64`, with the same rules as [Value::to_i32].
    pub fn to_u64(&self) -> Option<u64> {
        match self {
            Value::I64(v) => u64::try_from(*v).ok(),
            Value::U64(v) => Some(*v),
            Value::F64(v) if in_range(*v, 0.0, u64::MAX as f64) => Some(*v as u64),
            _ => None,
        }
    }

    /// Reads any number as `f64`. Never fails on range.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Value::I64(v) => Some(*v as f64),
            Value::U64(v) => Some(*v as f64),
            Value::F64(v) => Some(*v),
            _ => None,
        }
    }

    /// Compact JSON text of this value.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|err| {
            log::error!("Failed to serialize value: {}", err);
            String::new()
        })
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_json_string())
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_json_string())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::U64(a), Value::U64(b)) => a == b,
            (Value::F64(a), Value::F64(b)) => a == b,
            (Value::I64(a), Value::U64(b)) | (Value::U64(b), Value::I64(a)) => {
                u64::try_from(*a).is_ok_and(|a| a == *b)
            }
            (Value::I64(a), Value::F64(b)) | (Value::F64(b), Value::I64(a)) => *a as f64 == *b,
            (Value::U64(a), Value::F64(b)) | (Value::F64(b), Value::U64(a)) => *a as f64 == *b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Document(a), Value::Document(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::I64(value as i64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::U64(value as u64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::I64(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::U64(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::F64(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::String(value.clone())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Document> for Value {
    fn from(value: Document) -> Self {
        Value::Document(value)
    }
}

impl From<&Document> for Value {
    fn from(value: &Document) -> Self {
        Value::Document(value.clone())
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl From<&Array> for Value {
    fn from(value: &Array) -> Self {
        Value::Array(value.clone())
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Scalar kinds that may be written with `set`/`append`.
///
/// Nested containers go through the dedicated `put_document`/`put_array`
/// methods instead, so this trait is sealed to numbers, booleans and strings.
pub trait ScalarValue: sealed::Sealed + Into<Value> {}

macro_rules! scalar_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $t {}
            impl ScalarValue for $t {}
        )*
    };
}

scalar_value!(bool, i32, u32, i64, u64, f64, String, &String, &str);

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::I64(v) => serializer.serialize_i64(*v),
            Value::U64(v) => serializer.serialize_u64(*v),
            Value::F64(v) => serializer.serialize_f64(*v),
            Value::String(s) => serializer.serialize_str(s),
            Value::Document(doc) => doc.serialize(serializer),
            Value::Array(array) => array.serialize(serializer),
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::I64(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        match i64::try_from(v) {
            Ok(v) => Ok(Value::I64(v)),
            Err(_) => Ok(Value::U64(v)),
        }
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::F64(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut array = Array::new();
        while let Some(value) = seq.next_element::<Value>()? {
            if !array.append_value(value) {
                return Err(de::Error::custom("array exceeds maximum size"));
            }
        }
        Ok(Value::Array(array))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut doc = Document::new();
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            doc.insert_value(key, value);
        }
        Ok(Value::Document(doc))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}
