//! Runtime settings resolved once at startup.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;

use crate::error::ConfigError;

pub const ENV_API_KEY: &str = "PINGERA_API_KEY";
pub const ENV_MODE: &str = "PINGERA_MODE";
pub const ENV_BASE_URL: &str = "PINGERA_BASE_URL";
pub const ENV_TIMEOUT: &str = "PINGERA_TIMEOUT";
pub const ENV_MAX_RETRIES: &str = "PINGERA_MAX_RETRIES";
pub const ENV_DEBUG: &str = "PINGERA_DEBUG";
pub const ENV_SERVER_NAME: &str = "PINGERA_SERVER_NAME";

const DEFAULT_TIMEOUT_SECS: f64 = 30.0;
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_SERVER_NAME: &str = "Pingera MCP Server";

/// Whether mutating tools may run
///
/// Fixed for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationMode {
    #[default]
    ReadOnly,
    ReadWrite,
}

impl OperationMode {
    pub fn allows_writes(&self) -> bool {
        matches!(self, OperationMode::ReadWrite)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationMode::ReadOnly => "read_only",
            OperationMode::ReadWrite => "read_write",
        }
    }
}

impl fmt::Display for OperationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "read_only" => Ok(OperationMode::ReadOnly),
            "read_write" => Ok(OperationMode::ReadWrite),
            _ => Err(ConfigError::InvalidValue {
                var: ENV_MODE,
                value: s.to_string(),
                reason: "expected read_only or read_write".to_string(),
            }),
        }
    }
}

/// Immutable server settings
#[derive(Clone)]
pub struct Settings {
    pub api_key: String,
    pub base_url: String,
    pub mode: OperationMode,
    pub timeout: Duration,
    pub max_retries: u32,
    pub debug: bool,
    pub server_name: String,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("mode", &self.mode)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("debug", &self.debug)
            .field("server_name", &self.server_name)
            .finish()
    }
}

impl Settings {
    /// Settings with defaults for everything but the key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: pingera_sdk::DEFAULT_API_BASE.to_string(),
            mode: OperationMode::default(),
            timeout: Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            debug: false,
            server_name: DEFAULT_SERVER_NAME.to_string(),
        }
    }

    /// Resolve settings from the process environment, after loading `.env` if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env file"),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env file"),
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = get(ENV_API_KEY).ok_or(ConfigError::MissingApiKey)?;
        let mut settings = Self::new(api_key.trim());

        if let Some(mode) = get(ENV_MODE) {
            settings.mode = mode.parse()?;
        }

        if let Some(base_url) = get(ENV_BASE_URL) {
            let trimmed = base_url.trim().trim_end_matches('/');
            if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
                return Err(ConfigError::InvalidValue {
                    var: ENV_BASE_URL,
                    value: base_url.clone(),
                    reason: "must be an absolute http(s) URL".to_string(),
                });
            }
            settings.base_url = trimmed.to_string();
        }

        if let Some(timeout) = get(ENV_TIMEOUT) {
            let secs = timeout
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|s| s.is_finite() && *s > 0.0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    var: ENV_TIMEOUT,
                    value: timeout.clone(),
                    reason: "must be a positive number of seconds".to_string(),
                })?;
            settings.timeout = Duration::from_secs_f64(secs);
        }

        if let Some(retries) = get(ENV_MAX_RETRIES) {
            settings.max_retries =
                retries
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| ConfigError::InvalidValue {
                        var: ENV_MAX_RETRIES,
                        value: retries.clone(),
                        reason: "must be a non-negative integer".to_string(),
                    })?;
        }

        if let Some(debug) = get(ENV_DEBUG) {
            settings.debug = matches!(
                debug.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }

        if let Some(name) = get(ENV_SERVER_NAME) {
            settings.server_name = name.trim().to_string();
        }

        Ok(settings)
    }

    /// Build the API client these settings describe
    pub fn client(&self) -> Result<pingera_sdk::PingeraClient, pingera_sdk::PingeraError> {
        pingera_sdk::PingeraClient::builder()
            .api_key(&self.api_key)
            .base_url(&self.base_url)
            .timeout(self.timeout)
            .max_retries(self.max_retries)
            .build()
    }
}
