use super::errors::ConfigError;
use crate::dns_name::to_fqdn;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ZoneConfig {
    /// Apex of the served zone.
    #[serde(default = "default_domain")]
    pub domain: String,

    /// TSIG key as `name:base64secret`.
    #[serde(default)]
    pub tsig: Option<String>,

    /// Additional addresses advertised for `ns.<apex>`.
    #[serde(default)]
    pub external_addresses: Vec<String>,
}

/// A TSIG key split out of its `name:secret` form. The secret is still base64.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsigKeyConfig {
    pub name: String,
    pub secret: String,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            domain: default_domain(),
            tsig: None,
            external_addresses: Vec::new(),
        }
    }
}

impl ZoneConfig {
    pub fn tsig_key(&self) -> Result<Option<TsigKeyConfig>, ConfigError> {
        let Some(raw) = self.tsig.as_deref().filter(|t| !t.is_empty()) else {
            return Ok(None);
        };

        match raw.split_once(':') {
            Some((name, secret)) if !name.trim().is_empty() && !secret.trim().is_empty() => {
                Ok(Some(TsigKeyConfig {
                    name: to_fqdn(name.trim()),
                    secret: secret.trim().to_string(),
                }))
            }
            _ => Err(ConfigError::Validation(
                "TSIG key must be given as name:secret".to_string(),
            )),
        }
    }

    pub fn external_ips(&self) -> Result<Vec<IpAddr>, ConfigError> {
        self.external_addresses
            .iter()
            .map(|raw| {
                raw.trim().parse::<IpAddr>().map_err(|_| {
                    ConfigError::Validation(format!("Invalid external address: {}", raw))
                })
            })
            .collect()
    }
}

fn default_domain() -> String {
    ".".to_string()
}
