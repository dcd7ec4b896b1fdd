use serde::Deserialize;

/// Top-level configuration settings for the application.
///
/// Includes settings for the HTTP server, the optional WebSocket front end
/// and logging.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Settings {
    pub server: ServerSettings,
    pub websocket: WebSocketSettings,
    pub log: LogSettings,
}

/// Configuration settings for the HTTP server.
///
/// Defines the host and port the server will bind to.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Configuration settings for the WebSocket front end.
///
/// Disabled by default; when enabled it serves the same broker as HTTP.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct WebSocketSettings {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LogSettings {
    pub level: String,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
/// `port` is filled from the bare `PORT` variable, not from any source, and
/// overrides `server.port`.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    #[serde(skip)]
    pub port: Option<u16>,
    pub server: Option<PartialServerSettings>,
    pub websocket: Option<PartialWebSocketSettings>,
    pub log: Option<PartialLogSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialServerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Deserialize)]
pub struct PartialWebSocketSettings {
    pub enabled: Option<bool>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLogSettings {
    pub level: Option<String>,
}

impl PartialSettings {
    /// Fill every missing value from `default`.
    pub fn merge(self, default: Settings) -> Settings {
        let server = self.server;
        let websocket = self.websocket;

        Settings {
            server: ServerSettings {
                host: server
                    .as_ref()
                    .and_then(|s| s.host.clone())
                    .unwrap_or(default.server.host),
                port: self
                    .port
                    .or_else(|| server.as_ref().and_then(|s| s.port))
                    .unwrap_or(default.server.port),
            },
            websocket: WebSocketSettings {
                enabled: websocket
                    .as_ref()
                    .and_then(|w| w.enabled)
                    .unwrap_or(default.websocket.enabled),
                host: websocket
                    .as_ref()
                    .and_then(|w| w.host.clone())
                    .unwrap_or(default.websocket.host),
                port: websocket
                    .as_ref()
                    .and_then(|w| w.port)
                    .unwrap_or(default.websocket.port),
            },
            log: LogSettings {
                level: self
                    .log
                    .and_then(|l| l.level)
                    .unwrap_or(default.log.level),
            },
        }
    }
}

/// Provides default values for `Settings`.
///
/// Ensures the application has sensible defaults if no configuration is provided.
impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            websocket: WebSocketSettings {
                enabled: false,
                host: "0.0.0.0".to_string(),
                port: 3001,
            },
            log: LogSettings {
                level: "info".to_string(),
            },
        }
    }
}
