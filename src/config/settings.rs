use serde::Deserialize;

/// Top-level configuration settings for the application.
///
/// Includes settings for the server, the broadcaster and logging.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub broker: BrokerSettings,
    pub log: LogSettings,
}

impl Settings {
    /// Address the server binds to, as `host:port`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Configuration settings for the server.
///
/// `keep_alive_secs` is the WebSocket ping interval; 0 disables pings.
/// `outbound_capacity` bounds the frames queued per connection; subscription
/// events that do not fit are dropped.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub keep_alive_secs: u64,
    pub outbound_capacity: usize,
}

/// Configuration settings for the broadcaster.
#[derive(Debug, Deserialize, Clone)]
pub struct BrokerSettings {
    pub subscriber_capacity: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub level: String,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub server: Option<PartialServerSettings>,
    pub broker: Option<PartialBrokerSettings>,
    pub log: Option<PartialLogSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialServerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub keep_alive_secs: Option<u64>,
    pub outbound_capacity: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct PartialBrokerSettings {
    pub subscriber_capacity: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLogSettings {
    pub level: Option<String>,
}

/// Provides default values for `Settings`.
impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 8080,
                keep_alive_secs: 10,
                outbound_capacity: 32,
            },
            broker: BrokerSettings {
                subscriber_capacity: 1,
            },
            log: LogSettings {
                level: "info".to_string(),
            },
        }
    }
}
