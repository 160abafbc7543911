//! Transport seam between the object protocol and an HTTP client.
//!
//! The crate builds [HttpRequest]s through a [RequestFactory], checks an
//! executor out of the [ExecutorPool], and hands the request to a
//! caller-supplied [RestExecutor]. The executor performs the actual I/O.
//! [classify_response] then maps the raw [HttpResponse] to success or a
//! typed error.

mod executor;
mod executor_pool;
mod request;
mod request_factory;
mod response;

pub use executor::*;
pub use executor_pool::*;
pub use request::*;
pub use request_factory::*;
pub use response::*;
