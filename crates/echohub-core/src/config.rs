//! Configuration for the echo server.
//!
//! All configuration is driven by environment variables.

/// Global configuration for EchoHub.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EchoConfig {
    /// Bind address for the server.
    pub listen: String,
    /// Log level.
    pub log_level: String,
}

impl Default for EchoConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:8080".to_owned(),
            log_level: "info".to_owned(),
        }
    }
}

impl EchoConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("ECHOHUB_LISTEN") {
            config.listen = v;
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }
}
