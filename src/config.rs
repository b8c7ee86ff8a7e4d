//! Device settings: schema types and the loader.
//!
//! Settings come from an optional TOML file plus `TAILPOD__` environment
//! overrides; see `Settings` for the precedence rules.

mod load;
mod schema;

pub use load::InvalidSettings;
pub use schema::*;
