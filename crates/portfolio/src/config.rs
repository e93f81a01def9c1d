//! Configuration management for the portfolio site.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "portfolio";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "projects.db";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "PORTFOLIO_";

/// Secret shipped in the defaults. Fine for local use, not for deployment.
pub const DEFAULT_SECRET_KEY: &str = "change-me-in-production";

/// Shortest accepted secret key, in bytes.
const MIN_SECRET_KEY_LEN: usize = 16;

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `PORTFOLIO_`, `__` between levels)
/// 2. TOML config file at `~/.config/portfolio/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Site content and session configuration.
    pub site: SiteConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host name or IP to listen on.
    pub host: String,
    /// TCP port to listen on.
    pub port: u16,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/portfolio/projects.db`
    pub database_path: Option<PathBuf>,
    /// Insert the demo projects at startup when the table is empty.
    pub seed_if_empty: bool,
}

/// Site content and session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Name shown in the header, title bar and footer.
    pub owner_name: String,
    /// One-line description shown on the home page.
    pub tagline: String,
    /// Key used to sign flash-message cookies.
    pub secret_key: String,
    /// Directory served under `/static`.
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            owner_name: "Portfolio Owner".to_string(),
            tagline: "Designer & Front-End Developer".to_string(),
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            static_dir: PathBuf::from("static"),
        }
    }
}

impl SiteConfig {
    /// True when the shipped default secret is still in use.
    #[must_use]
    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);
        Self::from_figment(Self::figment(config_file))
    }

    /// The layered provider stack: defaults, then TOML file, then environment.
    #[must_use]
    pub fn figment(config_file: PathBuf) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Extract and validate a configuration from a figment.
    ///
    /// # Errors
    ///
    /// Returns an error if extraction or validation fails.
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(Error::config_validation("server.host must not be empty"));
        }

        if self.site.owner_name.trim().is_empty() {
            return Err(Error::config_validation("site.owner_name must not be empty"));
        }

        if self.site.secret_key.len() < MIN_SECRET_KEY_LEN {
            return Err(Error::config_validation(format!(
                "site.secret_key must be at least {MIN_SECRET_KEY_LEN} bytes"
            )));
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Resolve the listen address.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAddress`] if `host:port` does not resolve.
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.to_socket_addrs()
            .ok()
            .and_then(|mut addrs| addrs.next())
            .ok_or(Error::InvalidAddress { addr })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert!(config.storage.database_path.is_none());
        assert!(!config.storage.seed_if_empty);
        assert_eq!(config.site.static_dir, PathBuf::from("static"));
        assert!(config.site.uses_default_secret());
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_host() {
        let mut config = Config::default();
        config.server.host = "  ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("server.host"));
    }

    #[test]
    fn test_validate_empty_owner_name() {
        let mut config = Config::default();
        config.site.owner_name = String::new();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("owner_name"));
    }

    #[test]
    fn test_validate_short_secret() {
        let mut config = Config::default();
        config.site.secret_key = "short".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("secret_key"));
    }

    #[test]
    fn test_database_path_default() {
        let path = Config::default().database_path();
        assert!(path.to_string_lossy().contains("projects.db"));
        assert!(path.to_string_lossy().contains("portfolio"));
    }

    #[test]
    fn test_database_path_custom() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::from("/custom/path/db.sqlite"));

        assert_eq!(
            config.database_path(),
            PathBuf::from("/custom/path/db.sqlite")
        );
    }

    #[test]
    fn test_listen_addr() {
        let addr = Config::default().listen_addr().unwrap();
        assert_eq!(addr, "127.0.0.1:5000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn test_listen_addr_invalid() {
        let mut config = Config::default();
        config.server.host = "not a host".to_string();

        let err = config.listen_addr().unwrap_err();
        assert!(matches!(err, Error::InvalidAddress { .. }));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("portfolio"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        Jail::expect_with(|_jail| {
            let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")))
                .expect("defaults should load");
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_from_toml_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "portfolio.toml",
                r#"
                [server]
                port = 8080

                [storage]
                database_path = "data/site.db"
                seed_if_empty = true

                [site]
                owner_name = "Ada Lovelace"
                secret_key = "a-much-longer-secret-key"
                "#,
            )?;

            let config = Config::load_from(Some(PathBuf::from("portfolio.toml")))
                .expect("config should load");
            assert_eq!(config.server.port, 8080);
            assert_eq!(config.server.host, "127.0.0.1");
            assert_eq!(
                config.storage.database_path,
                Some(PathBuf::from("data/site.db"))
            );
            assert!(config.storage.seed_if_empty);
            assert_eq!(config.site.owner_name, "Ada Lovelace");
            assert!(!config.site.uses_default_secret());
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("portfolio.toml", "[server]\nport = 8080\n")?;
            jail.set_env("PORTFOLIO_SERVER__PORT", "9090");
            jail.set_env("PORTFOLIO_STORAGE__DATABASE_PATH", "/tmp/env.db");

            let config = Config::load_from(Some(PathBuf::from("portfolio.toml")))
                .expect("config should load");
            assert_eq!(config.server.port, 9090);
            assert_eq!(config.database_path(), PathBuf::from("/tmp/env.db"));
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        Jail::expect_with(|jail| {
            jail.create_file("portfolio.toml", "[site]\nsecret_key = \"tiny\"\n")?;

            let result = Config::load_from(Some(PathBuf::from("portfolio.toml")));
            assert!(matches!(result, Err(Error::ConfigValidation { .. })));
            Ok(())
        });
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("owner_name"));
        assert!(json.contains("database_path"));
    }
}
