//! Configuration for the tilepaint command line
//!
//! Provides types, discovery and parsing for `tilepaint.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
