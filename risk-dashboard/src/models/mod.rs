//! Request and response shapes

pub mod catalog;
pub mod evaluation;
pub mod query;
pub mod status;

pub use catalog::*;
pub use evaluation::*;
pub use query::*;
pub use status::*;
