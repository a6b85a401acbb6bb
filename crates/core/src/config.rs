//! Client configuration loaded from a YAML (or any `config`-supported) file.

use std::{path::Path, time::Duration};

use ::config::{Config, Environment, File};
use reqwest::Url;
use serde::Deserialize;

use crate::error::ConfigError;

/// Default configuration file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
/// Default location of the cached session record.
pub const DEFAULT_SESSION_FILE: &str = "session.id";
/// Prefix for environment variables overriding file values.
pub const ENV_PREFIX: &str = "BALANCE";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Credentials and endpoint settings for the billing API.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the billing API.
    pub api_site: String,
    /// API key sent with every request.
    pub api_token: String,
    /// Account login.
    pub login: String,
    /// Account password.
    pub password: String,
    /// Substring of the contract number to use. Empty selects the first contract.
    #[serde(default)]
    pub contract: String,
    /// Where the session record is cached between runs.
    #[serde(default = "default_session_file")]
    pub session_file: String,
    /// Upper bound for every network call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_session_file() -> String {
    DEFAULT_SESSION_FILE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl AppConfig {
    /// Read configuration from `path`, overlaid with `BALANCE_*` environment variables.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path.as_ref(), Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(path: &Path, env: Environment) -> Result<Self, ConfigError> {
        let load_err = |source| ConfigError::Load {
            path: path.to_path_buf(),
            source,
        };

        let settings = Config::builder()
            .add_source(File::from(path))
            .add_source(env)
            .build()
            .map_err(load_err)?;
        let config: Self = settings.try_deserialize().map_err(load_err)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the fields every request depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("api_site", &self.api_site),
            ("api_token", &self.api_token),
            ("login", &self.login),
            ("password", &self.password),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField(field));
            }
        }

        let url = Url::parse(&self.api_site).map_err(|err| ConfigError::InvalidValue {
            field: "api_site",
            reason: err.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "api_site",
                reason: format!("unsupported scheme {}", url.scheme()),
            });
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Per-call network timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
