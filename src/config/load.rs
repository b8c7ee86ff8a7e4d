use std::env;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::schema::Settings;

/// Environment prefix for per-field overrides, e.g. `TAILPOD__DISPLAY__WIDTH`.
const ENV_PREFIX: &str = "TAILPOD";
/// Points the player at a specific settings file.
const CONFIG_PATH_VAR: &str = "TAILPOD_CONFIG_PATH";

/// Settings the player refuses to start the panel or control loop with.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidSettings {
    #[error("display panel must be at least 1x1 pixels, got {width}x{height}")]
    PanelSize { width: u32, height: u32 },

    #[error("input.poll_interval_ms must be >= 1")]
    PollInterval,

    #[error("storage.catalog_path must name a document on the card")]
    CatalogPath,
}

impl Settings {
    /// Read the host settings: the file named by `TAILPOD_CONFIG_PATH` (or
    /// the XDG default), overlaid with `TAILPOD__` variables.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        Self::load_from(resolve_config_path().as_deref())
    }

    /// Same as `load` with an explicit settings file. A missing file is not
    /// an error; every field has a default matching the reference device.
    pub fn load_from(file: Option<&Path>) -> Result<Self, ::config::ConfigError> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(::config::File::from(path).required(false));
        }
        builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Check the panel, control loop and catalog settings are usable.
    pub fn validate(&self) -> Result<(), InvalidSettings> {
        let (width, height) = (self.display.width, self.display.height);
        if width == 0 || height == 0 {
            return Err(InvalidSettings::PanelSize { width, height });
        }
        if self.input.poll_interval_ms == 0 {
            return Err(InvalidSettings::PollInterval);
        }
        if self.storage.catalog_path.trim().is_empty() {
            return Err(InvalidSettings::CatalogPath);
        }
        Ok(())
    }
}

/// `TAILPOD_CONFIG_PATH` when set, else the per-user default.
pub fn resolve_config_path() -> Option<PathBuf> {
    env::var_os(CONFIG_PATH_VAR)
        .map(PathBuf::from)
        .or_else(default_config_path)
}

/// `tailpod/config.toml` under the XDG config home. An empty
/// `XDG_CONFIG_HOME` counts as unset.
pub fn default_config_path() -> Option<PathBuf> {
    env::var_os("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .map(|dir| dir.join("tailpod").join("config.toml"))
}
