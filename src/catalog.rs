//! Catalog loader: turns the YAML card document into validated entries.
//!
//! The catalog is built once at startup and never changes afterwards. See
//! `Catalog::load` for backend selection and `Catalog::parse` for the field
//! defaulting rules.

mod audit;
mod error;
mod load;
mod model;

pub use audit::AuditReport;
pub use error::LoadError;
pub use model::*;
