use thiserror::Error;

/// Why no catalog could be produced. Neither case is fatal: the device keeps
/// running unconfigured.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("catalog document {path} not found on any storage backend")]
    NotFound { path: String },

    #[error("catalog document could not be parsed: {0}")]
    ParseError(String),
}
