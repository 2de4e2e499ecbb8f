mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{BrokerSettings, LogSettings, ServerSettings, Settings};

/// Prefix for environment overrides, e.g. `ECHOSUB_SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "ECHOSUB";

/// Loads the configuration from `config/default` and `ECHOSUB_*` environment
/// variables, then fills whatever is missing from `Settings::default()`.
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

    let config = builder.build()?;
    let partial: PartialSettings = config.try_deserialize()?;
    let default = Settings::default();

    Ok(Settings {
        server: ServerSettings {
            host: partial
                .server
                .as_ref()
                .and_then(|s| s.host.clone())
                .unwrap_or(default.server.host),
            port: partial
                .server
                .as_ref()
                .and_then(|s| s.port)
                .unwrap_or(default.server.port),
            keep_alive_secs: partial
                .server
                .as_ref()
                .and_then(|s| s.keep_alive_secs)
                .unwrap_or(default.server.keep_alive_secs),
            outbound_capacity: partial
                .server
                .as_ref()
                .and_then(|s| s.outbound_capacity)
                .unwrap_or(default.server.outbound_capacity),
        },
        broker: BrokerSettings {
            subscriber_capacity: partial
                .broker
                .as_ref()
                .and_then(|b| b.subscriber_capacity)
                .unwrap_or(default.broker.subscriber_capacity),
        },
        log: LogSettings {
            level: partial
                .log
                .as_ref()
                .and_then(|l| l.level.clone())
                .unwrap_or(default.log.level),
        },
    })
}
