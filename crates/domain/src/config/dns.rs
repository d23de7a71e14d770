use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::errors::ConfigError;
use crate::{TransportProtocol, UpstreamAddr};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// `host:port` entries. Repeats are allowed and bias random selection.
    #[serde(default = "default_servers")]
    pub servers: Vec<String>,

    /// Applied to every single exchange, never split across attempts.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    #[serde(default)]
    pub protocol: TransportProtocol,

    /// Sets the EDNS0 DO bit so validating upstreams apply DNSSEC.
    #[serde(default = "default_true")]
    pub dnssec_ok: bool,
}

impl DnsConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }

    pub fn parsed_servers(&self) -> Result<Vec<UpstreamAddr>, ConfigError> {
        self.servers
            .iter()
            .map(|s| s.parse::<UpstreamAddr>().map_err(ConfigError::Validation))
            .collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.servers.is_empty() {
            return Err(ConfigError::Validation(
                "No DNS servers configured".to_string(),
            ));
        }

        if self.query_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "query_timeout_ms must be greater than 0".to_string(),
            ));
        }

        self.parsed_servers()?;
        Ok(())
    }
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            servers: default_servers(),
            query_timeout_ms: default_query_timeout_ms(),
            protocol: TransportProtocol::Udp,
            dnssec_ok: true,
        }
    }
}

fn default_servers() -> Vec<String> {
    vec!["8.8.8.8:53".to_string(), "1.1.1.1:53".to_string()]
}

fn default_query_timeout_ms() -> u64 {
    10_000
}

fn default_true() -> bool {
    true
}
