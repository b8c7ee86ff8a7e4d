//! Log output. The terminal is owned by the UI, so events go to a file.

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Registry};

use crate::config::LoggingSettings;

#[derive(Debug, Error)]
pub enum LogInitError {
    #[error("cannot open log file {path}: {source}")]
    Open { path: String, source: io::Error },
    #[error("invalid log filter {0:?}")]
    Filter(String),
    #[error(transparent)]
    Install(#[from] TryInitError),
}

/// `RUST_LOG` wins over the configured level.
fn filter(settings: &LoggingSettings) -> Result<EnvFilter, LogInitError> {
    match EnvFilter::try_from_default_env() {
        Ok(f) => Ok(f),
        Err(_) => EnvFilter::try_new(&settings.level)
            .map_err(|_| LogInitError::Filter(settings.level.clone())),
    }
}

/// Install the global subscriber, appending to `settings.file`.
pub fn init(settings: &LoggingSettings) -> Result<(), LogInitError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&settings.file)
        .map_err(|source| LogInitError::Open {
            path: settings.file.clone(),
            source,
        })?;

    Registry::default()
        .with(filter(settings)?)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()?;
    Ok(())
}
