use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Lifecycle phases driven by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    Create,
    Read,
    Delete,
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Read => write!(f, "read"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Deadlines applied to each lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub create: Duration,
    pub read: Duration,
    pub delete: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            create: Duration::from_secs(30 * 60),
            read: Duration::from_secs(5 * 60),
            delete: Duration::from_secs(30 * 60),
        }
    }
}

impl Timeouts {
    pub fn for_operation(&self, operation: Lifecycle) -> Duration {
        match operation {
            Lifecycle::Create => self.create,
            Lifecycle::Read => self.read,
            Lifecycle::Delete => self.delete,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ResourceConfig {
    #[serde(default)]
    pub timeouts: TimeoutsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutsConfig {
    #[serde(default = "default_create_secs")]
    pub create_secs: u64,
    #[serde(default = "default_read_secs")]
    pub read_secs: u64,
    #[serde(default = "default_delete_secs")]
    pub delete_secs: u64,
}

fn default_create_secs() -> u64 {
    30 * 60
}
fn default_read_secs() -> u64 {
    5 * 60
}
fn default_delete_secs() -> u64 {
    30 * 60
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            create_secs: default_create_secs(),
            read_secs: default_read_secs(),
            delete_secs: default_delete_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Error types for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config build error: {0}")]
    Build(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl ConfigError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl ResourceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.timeouts;
        if t.create_secs == 0 || t.read_secs == 0 || t.delete_secs == 0 {
            return Err(ConfigError::validation("timeouts must be > 0"));
        }
        let lvl = self.logging.level.to_ascii_lowercase();
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&lvl.as_str()) {
            return Err(ConfigError::validation(format!(
                "logging.level must be one of {valid_levels:?}"
            )));
        }
        Ok(())
    }

    pub fn timeouts(&self) -> Timeouts {
        Timeouts {
            create: Duration::from_secs(self.timeouts.create_secs),
            read: Duration::from_secs(self.timeouts.read_secs),
            delete: Duration::from_secs(self.timeouts.delete_secs),
        }
    }
}

pub mod loader {
    use super::{ConfigError, ResourceConfig};
    use config::{Config, Environment, File};
    use std::path::PathBuf;

    /// Default configuration file, looked up in the working directory.
    pub const DEFAULT_CONFIG_FILE: &str = "certbind.toml";
    /// Prefix of environment overrides, e.g. `CERTBIND__TIMEOUTS__READ_SECS=60`.
    pub const ENV_PREFIX: &str = "CERTBIND";

    pub fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .separator("__")
    }

    /// Loads `path` (or [`DEFAULT_CONFIG_FILE`] when present) with process
    /// environment overrides.
    pub fn load_config(path: Option<&str>) -> Result<ResourceConfig, ConfigError> {
        load_config_with_env(path, environment())
    }

    /// Loads an optional TOML file and layers `env` on top of it.
    pub fn load_config_with_env(
        path: Option<&str>,
        env: Environment,
    ) -> Result<ResourceConfig, ConfigError> {
        let mut builder = Config::builder();
        let file = PathBuf::from(path.unwrap_or(DEFAULT_CONFIG_FILE));
        if file.exists() {
            builder = builder.add_source(File::from(file));
        } else if path.is_some() {
            return Err(ConfigError::validation(format!(
                "config file {} does not exist",
                file.display()
            )));
        }
        builder = builder.add_source(env);

        let merged: ResourceConfig = builder.build()?.try_deserialize()?;
        merged.validate()?;
        Ok(merged)
    }
}
