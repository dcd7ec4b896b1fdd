mod settings;

use config::{Config, ConfigError, Environment, File};

use settings::PartialSettings;

pub use settings::{LogSettings, ServerSettings, Settings, WebSocketSettings};

/// Location of the optional configuration file, without extension.
pub const DEFAULT_CONFIG_FILE: &str = "config/default";

/// Prefix of the nested environment overrides, e.g. `BROKER_SERVER_PORT`.
pub const ENV_PREFIX: &str = "BROKER";

/// Loads the configuration from the default file and environment variables
/// Merges the configuration with default values
/// Returns a `Settings` struct containing the server, websocket and log configurations
pub fn load_config() -> Result<Settings, ConfigError> {
    load_config_from(DEFAULT_CONFIG_FILE)
}

/// Same as [`load_config`] but reads the optional file at `path`.
pub fn load_config_from(path: &str) -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name(path).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("_")
                .ignore_empty(true),
        );

    let config = builder.build()?;

    // Try to deserialize what is available
    let mut partial: PartialSettings = config.try_deserialize()?;
    partial.port = bare_port();

    Ok(partial.merge(Settings::default()))
}

/// The plain `PORT` variable. Unset, empty or unparsable values are ignored.
fn bare_port() -> Option<u16> {
    std::env::var("PORT").ok().and_then(|p| p.trim().parse().ok())
}
