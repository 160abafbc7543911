//! Common types shared by the value model, the query compiler and the
//! remote document protocol.

mod constants;
mod util;
mod value;

pub use constants::*;
pub use util::*;
pub use value::*;
