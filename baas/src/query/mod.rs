//! Query compilation for object bucket searches.
//!
//! A [Query] accumulates conditions, ordering, paging, projection and read
//! settings, then renders each part as an independent string. The object
//! bucket turns the non-empty strings into request parameters.
//!
//! ```rust,ignore
//! use baas::query::{Query, ReadPreference};
//!
//! let query = Query::new()
//!     .greater_than("age", 20)
//!     .regex("name", "^A", Some("i"))
//!     .order_by(&["-age", "name"])
//!     .limit(10)
//!     .read_preference(ReadPreference::SecondaryPreferred);
//!
//! assert_eq!(query.conditions_string(), r#"{"age":{"$gt":20},"name":{"$regex":"^A","$options":"i"}}"#);
//! assert_eq!(query.order_string(), "-age,name");
//! assert_eq!(query.limit_string(), "10");
//! ```
//!
//! Every builder method ignores an empty field key. Rendering never fails;
//! a part that is unset renders as the empty string.

mod conditions;
mod query_spec;
mod read_preference;

pub use query_spec::*;
pub use read_preference::*;
