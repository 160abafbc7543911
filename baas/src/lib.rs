//! # baas - client data model for a backend-as-a-service
//!
//! `baas` is the data layer of an embedded client for a hosted object store.
//! It models JSON documents, compiles queries into request parameters, and
//! keeps local objects in sync with the server through a pluggable HTTP
//! executor.
//!
//! ## Key Features
//!
//! - **JSON model**: [collection::Document] and [collection::Array] with typed,
//!   never-failing getters and compact serialization
//! - **Queries**: [query::Query] builds conditions, ordering, paging and
//!   projection for bucket searches
//! - **Remote objects**: [object::RemoteDocument] creates, overwrites,
//!   patches and deletes objects, with ETag preconditions and ACLs
//! - **Pluggable transport**: bring any HTTP client by implementing
//!   [http::RestExecutor]; executors are pooled and reused
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use baas::collection::Document;
//! use baas::query::Query;
//! use baas::service::Service;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let service = Service::builder()
//!     .endpoint_url("https://api.example.com")
//!     .tenant_id("tenant")
//!     .app_id("app")
//!     .app_key("key")
//!     .build(|| Box::new(MyExecutor::new()) as Box<dyn RestExecutor>);
//!
//! let bucket = service.object_bucket("todos");
//!
//! // Create an object
//! let mut todo = bucket.new_object();
//! todo.set("title", "write docs");
//! todo.save(true)?;
//!
//! // Patch it
//! let mut patch = Document::new();
//! patch.set("done", true);
//! todo.part_update(&patch)?;
//!
//! // Query the bucket
//! let result = bucket.query(&Query::new().equal_to("done", true), true)?;
//! println!("{} done", result.count().unwrap_or(0));
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Every fallible operation returns [errors::BaasResult]. Arguments are
//! validated in a fixed order before any request is sent, so the first
//! failing check is always the one reported. Malformed JSON is never an
//! error: parsing degrades to an empty container.
//!
//! ## Module Organization
//!
//! - [`acl`] - Access control lists attached to objects
//! - [`collection`] - JSON documents and arrays
//! - [`common`] - Values, constants and utilities
//! - [`errors`] - Error types and result definitions
//! - [`http`] - Request building, executor seam and pooling
//! - [`object`] - Remote objects and object buckets
//! - [`query`] - Query builder
//! - [`service`] - Service configuration and entry point

pub mod acl;
pub mod collection;
pub mod common;
pub mod errors;
pub mod http;
pub mod object;
pub mod query;
pub mod service;

pub use common::*;
