//! Remote objects and the buckets that hold them.
//!
//! [ObjectBucket] fetches and queries objects. [RemoteDocument] is a single
//! object: a [crate::collection::Document] body plus the server metadata,
//! kept in sync through save, partial update and delete.

mod object_bucket;
mod remote_document;

pub use object_bucket::*;
pub use remote_document::*;
