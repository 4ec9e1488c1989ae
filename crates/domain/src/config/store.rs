use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Single-node SQLite file.
    #[default]
    Sqlite,
    /// rqlite cluster reached over its HTTP API.
    Rqlite,
    /// Process memory, lost on exit.
    Memory,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Sqlite => "sqlite",
            StoreBackend::Rqlite => "rqlite",
            StoreBackend::Memory => "memory",
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StoreBackend::Sqlite),
            "rqlite" => Ok(StoreBackend::Rqlite),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("Unknown store backend: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    #[serde(default = "default_path")]
    pub path: String,

    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,

    #[serde(default)]
    pub rqlite_url: Option<String>,

    #[serde(default = "default_rqlite_timeout_ms")]
    pub rqlite_timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            path: default_path(),
            busy_timeout_secs: default_busy_timeout_secs(),
            rqlite_url: None,
            rqlite_timeout_ms: default_rqlite_timeout_ms(),
        }
    }
}

fn default_path() -> String {
    "./addd.db".to_string()
}

fn default_busy_timeout_secs() -> u64 {
    10
}

fn default_rqlite_timeout_ms() -> u64 {
    5_000
}
