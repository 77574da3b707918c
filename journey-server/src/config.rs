//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable for the listen address.
pub const BIND_ADDR_VAR: &str = "JOURNEY_BIND_ADDR";

/// Environment variable for the static asset directory.
pub const STATIC_DIR_VAR: &str = "JOURNEY_STATIC_DIR";

/// Environment variable for an optional catalog JSON file.
pub const CATALOG_PATH_VAR: &str = "JOURNEY_CATALOG_PATH";

/// Environment variable for the simulated catalog load delay.
pub const LOAD_DELAY_VAR: &str = "JOURNEY_LOAD_DELAY_MS";

/// Static assets shipped alongside the crate.
const DEFAULT_STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Error returned when a configuration value cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {key}={value:?}: {reason}")]
pub struct ConfigError {
    key: &'static str,
    value: String,
    reason: String,
}

/// Configuration parameters for the web server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind_addr: SocketAddr,

    /// Directory served under `/static`.
    pub static_dir: PathBuf,

    /// Catalog file to load instead of the built-in sample.
    pub catalog_path: Option<PathBuf>,

    /// How long to hold the catalog back before serving it (milliseconds).
    pub load_delay_ms: u64,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(BIND_ADDR_VAR) {
            config.bind_addr = value.parse().map_err(|e: std::net::AddrParseError| ConfigError {
                key: BIND_ADDR_VAR,
                value: value.clone(),
                reason: e.to_string(),
            })?;
        }

        if let Some(value) = lookup(STATIC_DIR_VAR).filter(|v| !v.is_empty()) {
            config.static_dir = PathBuf::from(value);
        }

        config.catalog_path = lookup(CATALOG_PATH_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        if let Some(value) = lookup(LOAD_DELAY_VAR) {
            config.load_delay_ms =
                value
                    .trim()
                    .parse()
                    .map_err(|e: std::num::ParseIntError| ConfigError {
                        key: LOAD_DELAY_VAR,
                        value: value.clone(),
                        reason: e.to_string(),
                    })?;
        }

        Ok(config)
    }

    /// Returns the load delay as a Duration.
    pub fn load_delay(&self) -> Duration {
        Duration::from_millis(self.load_delay_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            catalog_path: None,
            load_delay_ms: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_config() {
        let config = ServerConfig::default();

        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert!(config.static_dir.ends_with("static"));
        assert_eq!(config.catalog_path, None);
        assert_eq!(config.load_delay_ms, 1000);
        assert_eq!(config.load_delay(), Duration::from_secs(1));
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn custom_config() {
        let config = ServerConfig::from_lookup(lookup(&[
            (BIND_ADDR_VAR, "0.0.0.0:8080"),
            (STATIC_DIR_VAR, "/srv/static"),
            (CATALOG_PATH_VAR, "/srv/catalog.json"),
            (LOAD_DELAY_VAR, "0"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
        assert_eq!(config.static_dir, PathBuf::from("/srv/static"));
        assert_eq!(config.catalog_path, Some(PathBuf::from("/srv/catalog.json")));
        assert_eq!(config.load_delay(), Duration::ZERO);
    }

    #[test]
    fn empty_catalog_path_means_sample() {
        let config = ServerConfig::from_lookup(lookup(&[(CATALOG_PATH_VAR, "")])).unwrap();
        assert_eq!(config.catalog_path, None);
    }

    #[test]
    fn invalid_address() {
        let err = ServerConfig::from_lookup(lookup(&[(BIND_ADDR_VAR, "localhost")])).unwrap_err();
        assert!(err.to_string().starts_with("invalid JOURNEY_BIND_ADDR=\"localhost\""));
    }

    #[test]
    fn invalid_delay() {
        let err = ServerConfig::from_lookup(lookup(&[(LOAD_DELAY_VAR, "-5")])).unwrap_err();
        assert!(err.to_string().starts_with("invalid JOURNEY_LOAD_DELAY_MS=\"-5\""));
    }
}
