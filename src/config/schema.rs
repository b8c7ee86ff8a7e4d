use std::time::Duration;

use serde::Deserialize;

use crate::audio::Pinout;

/// Top-level device settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/tailpod/config.toml` or
/// `~/.config/tailpod/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `TAILPOD__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
///
/// These describe the host the player runs on. What the cards play lives in
/// the catalog document on the storage backends, not here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
    pub display: DisplaySettings,
    pub audio: AudioSettings,
    pub input: InputSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory standing in for the removable card. Preferred backend.
    pub removable_root: String,
    /// Directory standing in for onboard flash.
    pub onboard_root: String,
    /// Catalog document path, relative to each backend root.
    pub catalog_path: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            removable_root: "sdcard".to_string(),
            onboard_root: "flash".to_string(),
            catalog_path: "/config.yaml".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Panel size in pixels.
    pub width: u32,
    pub height: u32,
    /// Banner shown while idle.
    pub idle_text: String,
    /// First row of the now-playing layout.
    pub playing_header: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            width: 128,
            height: 64,
            idle_text: "Tailpod 3000".to_string(),
            playing_header: "Now playing..".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// I2S pins; only meaningful on hardware outputs.
    pub pinout: Option<Pinout>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// How long the control loop waits for a key event per iteration.
    pub poll_interval_ms: u64,
    pub rotary_debounce_ms: u64,
    pub button_debounce_ms: u64,
    /// Quiet period after a token is released.
    pub token_cooldown_ms: u64,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 50,
            rotary_debounce_ms: 5,
            button_debounce_ms: 50,
            token_cooldown_ms: 1000,
        }
    }
}

impl InputSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn rotary_debounce(&self) -> Duration {
        Duration::from_millis(self.rotary_debounce_ms)
    }

    pub fn button_debounce(&self) -> Duration {
        Duration::from_millis(self.button_debounce_ms)
    }

    pub fn token_cooldown(&self) -> Duration {
        Duration::from_millis(self.token_cooldown_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is unset, e.g. `info` or `tailpod=debug`.
    pub level: String,
    /// Log file. The terminal belongs to the UI, so logs never go to stdout.
    pub file: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: "tailpod.log".to_string(),
        }
    }
}
