use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::Path;

/// Default values used when the config file omits a field
pub mod defaults {
    /// Config file looked up in the working directory
    pub const CONFIG_FILE: &str = "onionalias.toml";

    /// Provisioning API listen address
    pub const API_LISTEN_ADDR: &str = "127.0.0.1:9160";

    /// Log filter used when RUST_LOG is unset
    pub const LOG_LEVEL: &str = "info";
}

/// Provisioning API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Address the HTTP API binds to
    pub listen_addr: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            listen_addr: defaults::API_LISTEN_ADDR.to_string(),
        }
    }
}

/// Daemon configuration
///
/// The `[aliases]` table is handed to the registry at startup; entries are
/// validated there, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AliasConfig {
    /// Log filter directive (e.g. "info", "onionalias_core=debug")
    pub log_level: String,

    /// HTTP API settings
    pub api: ApiConfig,

    /// Alias -> onion address entries to provision at startup
    pub aliases: BTreeMap<String, String>,
}

impl Default for AliasConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::LOG_LEVEL.to_string(),
            api: ApiConfig::default(),
            aliases: BTreeMap::new(),
        }
    }
}

impl AliasConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.api.listen_addr = addr.into();
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>, address: impl Into<String>) -> Self {
        self.aliases.insert(alias.into(), address.into());
        self
    }

    /// Parse the API listen address
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.api.listen_addr.parse().map_err(|_| {
            ConfigError::InvalidValue(format!("api.listen_addr: {}", self.api.listen_addr))
        })
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError(e.to_string()))?;

        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save configuration to a TOML file
    pub fn to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, contents).map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config: {0}")]
    ParseError(String),

    #[error("Failed to serialize config: {0}")]
    SerializeError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}
