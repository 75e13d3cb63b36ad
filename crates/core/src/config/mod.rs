//! Configuration loading and schema definitions
//!
//! Settings for where to look for Xcode, how to activate it and how to log.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
