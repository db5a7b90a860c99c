//! Configuration loading and schema definitions
//!
//! Settings come from a `keepsake.toml` file; every field has a default.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
