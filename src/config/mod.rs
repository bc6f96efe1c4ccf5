//! Service configuration: connection, ambient namespace and logging.

mod loader;

pub use loader::ConfigLoader;

use crate::logging::LoggingConfig;
use crate::namespace::Namespace;
use serde::{Deserialize, Serialize};

fn default_scheme() -> String {
    "https".to_string()
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    8089
}

/// Where and how to reach the management port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    #[serde(default = "default_scheme")]
    pub scheme: String,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Pre-obtained session token; acquiring one is the caller's concern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Per-request timeout in seconds; None leaves the client default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ConnectionConfig {
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.scheme != "http" && self.scheme != "https" {
            return Err(format!(
                "Invalid scheme: {} (must be 'http' or 'https')",
                self.scheme
            ));
        }
        if self.host.trim().is_empty() {
            return Err("Host cannot be empty".to_string());
        }
        if self.port == 0 {
            return Err("Port cannot be 0".to_string());
        }
        Ok(())
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            host: default_host(),
            port: default_port(),
            token: None,
            timeout_secs: None,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub connection: ConnectionConfig,

    /// Ambient namespace applied to relative paths.
    #[serde(default)]
    pub namespace: Namespace,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.connection.validate()
    }
}
