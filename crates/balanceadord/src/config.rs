//! Daemon configuration
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! environment variables.
//!
//! ```toml
//! [server]
//! port = 5000
//! prefix = "/balanceador"
//! call_timeout_ms = 5000
//!
//! [[backend]]
//! name = "mongo"
//! url = "http://localhost:4001"
//!
//! [[backend]]
//! name = "postgres"
//! url = "http://localhost:4002"
//! timeout_ms = 10000
//! ```

use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// Default listening port
pub const DEFAULT_PORT: u16 = 5000;
/// Default document-store backend
pub const DEFAULT_MONGO_URL: &str = "http://localhost:4001";
/// Default relational-store backend
pub const DEFAULT_PG_URL: &str = "http://localhost:4002";

/// Environment overrides for backend URLs: (variable, backend name)
const BACKEND_URL_ENV: [(&str, &str); 2] = [
    ("MONGO_SERVICE_URL", "mongo"),
    ("PG_SERVICE_URL", "postgres"),
];
/// Environment override for the listening port
const PORT_ENV: &str = "PORT";

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_connect_timeout_ms() -> u64 {
    10_000
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    /// Path prefix the hunters routes are mounted under
    pub prefix: String,
    /// Deadline applied by the gateway to every backend call
    pub call_timeout_ms: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            prefix: balanceador_api::DEFAULT_PREFIX.to_string(),
            call_timeout_ms: None,
        }
    }
}

/// One hunters backend
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BackendConfig {
    pub name: String,
    pub url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

impl BackendConfig {
    fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

/// Top-level daemon configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    /// Backends in fan-out order; later backends win merge ties
    #[serde(rename = "backend")]
    pub backends: Vec<BackendConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            backends: vec![
                BackendConfig::new("mongo", DEFAULT_MONGO_URL),
                BackendConfig::new("postgres", DEFAULT_PG_URL),
            ],
        }
    }
}

impl Config {
    /// Load from an optional TOML file, then apply the process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Apply environment overrides through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        for (var, backend_name) in BACKEND_URL_ENV {
            let Some(url) = lookup(var) else {
                continue;
            };
            match self.backends.iter_mut().find(|b| b.name == backend_name) {
                Some(backend) => {
                    tracing::debug!(backend = %backend_name, %url, "URL overridden by {}", var);
                    backend.url = url;
                }
                None => {
                    tracing::warn!(backend = %backend_name, "{} set but no such backend configured", var);
                }
            }
        }

        if let Some(port) = lookup(PORT_ENV) {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}: {}", PORT_ENV, port))?;
        }

        Ok(())
    }

    /// Check the configuration can build a working gateway
    pub fn validate(&self) -> Result<()> {
        if self.backends.is_empty() {
            bail!("At least one [[backend]] must be configured");
        }

        let mut seen = HashSet::new();
        for backend in &self.backends {
            if backend.name.trim().is_empty() {
                bail!("Backend name must not be empty");
            }
            if !seen.insert(backend.name.as_str()) {
                bail!("Duplicate backend name: {}", backend.name);
            }
            url::Url::parse(&backend.url)
                .with_context(|| format!("Invalid URL for backend '{}': {}", backend.name, backend.url))?;
        }

        if !self.server.prefix.is_empty() && !self.server.prefix.starts_with('/') {
            bail!("Server prefix must start with '/': {}", self.server.prefix);
        }

        Ok(())
    }
}
