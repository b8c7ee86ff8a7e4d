use crate::config::Settings;

/// Host settings for this run. Logging is not up yet, so a broken settings
/// file is reported on stderr and the player starts as the reference device.
pub fn load_settings() -> Settings {
    usable_or_default(Settings::load())
}

fn usable_or_default(loaded: Result<Settings, ::config::ConfigError>) -> Settings {
    let reason = match loaded {
        Ok(settings) => match settings.validate() {
            Ok(()) => return settings,
            Err(e) => format!("invalid settings ({e})"),
        },
        Err(e) => format!("unreadable settings ({e})"),
    };
    eprintln!("tailpod: {reason}; using the 128x64 reference device defaults");
    Settings::default()
}
