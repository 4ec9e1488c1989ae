use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_dns_port")]
    pub dns_port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Empty disables the PID file.
    #[serde(default = "default_pid_file")]
    pub pid_file: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dns_port: default_dns_port(),
            bind_address: default_bind_address(),
            pid_file: default_pid_file(),
        }
    }
}

impl ServerConfig {
    pub fn pid_file(&self) -> Option<&str> {
        Some(self.pid_file.as_str()).filter(|p| !p.is_empty())
    }
}

fn default_dns_port() -> u16 {
    53
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_pid_file() -> String {
    "./addd.pid".to_string()
}
