//! JSON containers: the keyed [Document] and the indexed [Array].
//!
//! Both containers parse leniently (malformed input yields an empty
//! container), read through typed getters with caller-supplied defaults, and
//! serialize to compact JSON.
//!
//! ```rust,ignore
//! use baas::collection::{Array, Document};
//!
//! let mut doc = Document::from_json(r#"{"name":"Alice"}"#);
//! doc.set("age", 30);
//!
//! let mut tags = Array::new();
//! tags.append("admin");
//! doc.put_array("tags", &tags);
//!
//! assert_eq!(doc.to_json_string(), r#"{"name":"Alice","age":30,"tags":["admin"]}"#);
//! ```
//!
//! Neither container is synchronized. Share one between threads only behind
//! external locking.

mod array;
mod document;

pub use array::*;
pub use document::*;
