use serde::{Deserialize, Serialize};

use super::api::ApiConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::store::{StoreBackend, StoreConfig};
use super::zone::ZoneConfig;
use crate::dns_name::validate_domain_name;

/// Main configuration structure for addd
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// DNS listener (port, bind address, PID file)
    #[serde(default)]
    pub server: ServerConfig,

    /// Served zone and its signing key
    #[serde(default)]
    pub zone: ZoneConfig,

    /// Management HTTP API
    #[serde(default)]
    pub api: ApiConfig,

    /// Record storage engine
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. addd.toml in current directory
    /// 3. /etc/addd/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("addd.toml").exists() {
            Self::from_file("addd.toml")?
        } else if std::path::Path::new("/etc/addd/config.toml").exists() {
            Self::from_file("/etc/addd/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    /// Apply command-line overrides to configuration
    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(domain) = overrides.domain {
            self.zone.domain = domain;
        }
        if let Some(tsig) = overrides.tsig {
            self.zone.tsig = Some(tsig);
        }
        if !overrides.external_addresses.is_empty() {
            self.zone.external_addresses = overrides.external_addresses;
        }
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(pid) = overrides.pid_file {
            self.server.pid_file = pid;
        }
        if let Some(api) = overrides.api_bind_address {
            self.api.bind_address = api;
        }
        if let Some(token) = overrides.api_token {
            self.api.token = token;
        }
        if overrides.api_disabled {
            self.api.enabled = false;
        }
        if let Some(backend) = overrides.store_backend {
            self.store.backend = backend;
        }
        if let Some(path) = overrides.store_path {
            self.store.path = path;
        }
        if let Some(url) = overrides.rqlite_url {
            self.store.rqlite_url = Some(url);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        let apex = self.zone.domain.trim().trim_start_matches('.');
        if !apex.is_empty() && apex != "." {
            validate_domain_name(apex)
                .map_err(|e| ConfigError::Validation(format!("zone.domain: {}", e)))?;
        }

        self.zone.tsig_key()?;
        self.zone.external_ips()?;

        if self.store.backend == StoreBackend::Rqlite
            && self.store.rqlite_url.as_deref().unwrap_or("").is_empty()
        {
            return Err(ConfigError::Validation(
                "store.rqlite_url is required for the rqlite backend".to_string(),
            ));
        }

        if self.store.backend == StoreBackend::Sqlite && self.store.path.is_empty() {
            return Err(ConfigError::Validation(
                "store.path cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub domain: Option<String>,
    pub tsig: Option<String>,
    pub external_addresses: Vec<String>,
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub pid_file: Option<String>,
    pub api_bind_address: Option<String>,
    pub api_token: Option<String>,
    pub api_disabled: bool,
    pub store_backend: Option<StoreBackend>,
    pub store_path: Option<String>,
    pub rqlite_url: Option<String>,
    pub log_level: Option<String>,
}
