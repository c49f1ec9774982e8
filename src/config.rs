//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::auth::DEFAULT_TOKEN_EXPIRY_DAYS;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

fn default_database_path() -> String {
    dirs::data_local_dir()
        .map(|p| {
            p.join("healthcoach")
                .join("healthcoach.db")
                .to_string_lossy()
                .to_string()
        })
        .unwrap_or_else(|| "./healthcoach_data/healthcoach.db".to_string())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8001
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

/// Token and password settings
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret. Random per process when unset.
    #[serde(default)]
    pub jwt_secret: Option<String>,

    #[serde(default = "default_token_expiry_days")]
    pub token_expiry_days: i64,

    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

fn default_token_expiry_days() -> i64 {
    DEFAULT_TOKEN_EXPIRY_DAYS
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_expiry_days: default_token_expiry_days(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Accepted bcrypt work factors
pub const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

/// Accepted token lifetimes, in days
pub const TOKEN_EXPIRY_DAYS_RANGE: std::ops::RangeInclusive<i64> = 1..=3650;

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config = Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        config.finish()
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env_overrides()?;
        config.finish()
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides()?;
        config.finish()
    }

    /// Config files looked for when none is given, in priority order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            std::env::var("HEALTHCOACH_CONFIG").ok().map(PathBuf::from),
            dirs::config_dir().map(|p| p.join("healthcoach").join("config.toml")),
            Some(PathBuf::from("/etc/healthcoach/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load the first existing default file, or the environment alone.
    ///
    /// Returns the file that was used. A file that exists but cannot be
    /// loaded is an error, not a reason to fall back to defaults.
    pub fn load_default() -> Result<(Self, Option<PathBuf>), ConfigError> {
        Self::load_first(&Self::default_paths())
    }

    fn load_first(candidates: &[PathBuf]) -> Result<(Self, Option<PathBuf>), ConfigError> {
        match candidates.iter().find(|path| path.exists()) {
            Some(path) => Ok((Self::load_with_env(path)?, Some(path.clone()))),
            None => Ok((Self::from_env()?, None)),
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup (the process environment in production)
    fn apply_overrides(
        &mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        // Storage overrides
        if let Some(path) = var("HEALTHCOACH_DATABASE") {
            self.storage.database_path = path;
        }

        // API overrides
        if let Some(host) = var("HEALTHCOACH_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = var("HEALTHCOACH_API_PORT") {
            self.api.port = port.parse().map_err(|_| {
                ConfigError::Invalid(format!("HEALTHCOACH_API_PORT is not a port: {}", port))
            })?;
        }

        // Auth overrides
        if let Some(secret) = var("HEALTHCOACH_JWT_SECRET") {
            self.auth.jwt_secret = Some(secret);
        }

        // Logging overrides
        if let Some(level) = var("HEALTHCOACH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("HEALTHCOACH_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }

    /// Expand `~/` in paths and check value ranges
    fn finish(mut self) -> Result<Self, ConfigError> {
        self.storage.database_path = expand_home(&self.storage.database_path);

        if !BCRYPT_COST_RANGE.contains(&self.auth.bcrypt_cost) {
            return Err(ConfigError::Invalid(format!(
                "auth.bcrypt_cost must be between {} and {}, got {}",
                BCRYPT_COST_RANGE.start(),
                BCRYPT_COST_RANGE.end(),
                self.auth.bcrypt_cost
            )));
        }

        if !TOKEN_EXPIRY_DAYS_RANGE.contains(&self.auth.token_expiry_days) {
            return Err(ConfigError::Invalid(format!(
                "auth.token_expiry_days must be between {} and {}, got {}",
                TOKEN_EXPIRY_DAYS_RANGE.start(),
                TOKEN_EXPIRY_DAYS_RANGE.end(),
                self.auth.token_expiry_days
            )));
        }

        Ok(self)
    }
}

/// Replace a leading `~/` with the home directory
fn expand_home(path: &str) -> String {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest).to_string_lossy().to_string(),
        _ => path.to_string(),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Health Coach Configuration
#
# Environment variables override these settings:
# - HEALTHCOACH_DATABASE
# - HEALTHCOACH_API_HOST
# - HEALTHCOACH_API_PORT
# - HEALTHCOACH_JWT_SECRET
# - HEALTHCOACH_LOG_LEVEL
# - HEALTHCOACH_LOG_FORMAT

[storage]
# SQLite database holding users and health profiles (a leading ~/ is expanded)
database_path = "~/.local/share/healthcoach/healthcoach.db"

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8001

# Allowed CORS origins (empty = any origin)
cors_origins = []

[auth]
# Secret used to sign access tokens. Leave unset to generate one per run.
# jwt_secret = "change-me-to-a-long-random-string"

# Access token lifetime (days)
token_expiry_days = 7

# bcrypt work factor for password hashes
bcrypt_cost = 12

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.port, 8001);
        assert_eq!(config.auth.token_expiry_days, 7);
        assert!(config.auth.jwt_secret.is_none());
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.api.port, 8001);
        assert_eq!(config.auth.bcrypt_cost, 12);
        assert!(config.api.cors_origins.is_empty());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = Config::parse("[api]\nport = 9000\n").unwrap();
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.api.host, "0.0.0.0");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("HEALTHCOACH_API_PORT", "7777"),
            ("HEALTHCOACH_JWT_SECRET", "from-env"),
            ("HEALTHCOACH_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.api.port, 7777);
        assert_eq!(config.auth.jwt_secret.as_deref(), Some("from-env"));
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_invalid_port_override_rejected() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(|key| {
                (key == "HEALTHCOACH_API_PORT").then(|| "not-a-port".to_string())
            })
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert_eq!(config.api.port, 8001);
    }

    #[test]
    fn test_generated_config_database_path_is_under_home() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, generate_default_config()).unwrap();

        let config = Config::load(&path).unwrap();

        assert!(!config.storage.database_path.starts_with('~'));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                PathBuf::from(&config.storage.database_path),
                home.join(".local/share/healthcoach/healthcoach.db")
            );
        }
    }

    #[test]
    fn test_expand_home_leaves_other_paths() {
        assert_eq!(expand_home("/var/lib/hc.db"), "/var/lib/hc.db");
        assert_eq!(expand_home("data/hc.db"), "data/hc.db");
        assert_eq!(expand_home("~user/hc.db"), "~user/hc.db");
    }

    #[test]
    fn test_unparsable_file_stops_loading() {
        let dir = tempdir().unwrap();
        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[api\nport = ").unwrap();
        let missing = dir.path().join("missing.toml");

        let err = Config::load_first(&[missing, broken]).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_first_reports_used_file() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("config.toml");
        std::fs::write(&good, "[api]\nport = 9100\n").unwrap();
        let missing = dir.path().join("missing.toml");

        let (config, used) = Config::load_first(&[missing, good.clone()]).unwrap();
        assert_eq!(used, Some(good));
        assert_eq!(config.api.port, 9100);
    }

    #[test]
    fn test_out_of_range_auth_settings_rejected() {
        let cost = Config::parse("[auth]\nbcrypt_cost = 40\n").unwrap().finish();
        assert!(matches!(cost, Err(ConfigError::Invalid(_))));

        let expiry = Config::parse("[auth]\ntoken_expiry_days = 9999999999999\n")
            .unwrap()
            .finish();
        assert!(matches!(expiry, Err(ConfigError::Invalid(_))));

        let zero = Config::parse("[auth]\ntoken_expiry_days = 0\n").unwrap().finish();
        assert!(matches!(zero, Err(ConfigError::Invalid(_))));

        assert!(Config::default().finish().is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
