//! Configuration for redirect rule checks.
//!
//! Configuration is read from a JSON document or from environment variables
//! layered over the defaults. Every field is optional.
//!
//! ```json
//! {
//!   "rpc": { "timeout_secs": 30, "queue_capacity": 64 },
//!   "unresolved_payload": "continue"
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Environment variable overriding [`RpcSettings::timeout`].
pub const ENV_RPC_TIMEOUT_SECS: &str = "REDIRECT_CHECK_RPC_TIMEOUT_SECS";
/// Environment variable overriding [`RpcSettings::queue_capacity`].
pub const ENV_RPC_QUEUE_CAPACITY: &str = "REDIRECT_CHECK_RPC_QUEUE_CAPACITY";
/// Environment variable overriding [`RedirectCheckConfig::unresolved_payload`].
pub const ENV_UNRESOLVED_PAYLOAD: &str = "REDIRECT_CHECK_UNRESOLVED_PAYLOAD";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Errors returned while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// An environment variable held an unusable value.
    #[error("invalid value '{value}' for {variable}")]
    InvalidEnv {
        /// Variable name.
        variable: &'static str,
        /// Offending value.
        value: String,
    },

    /// A parsed value failed validation.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

/// What to do when a payload identifier does not resolve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedPayloadPolicy {
    /// Log the miss and continue with no parameters, yielding an empty
    /// successful report.
    #[default]
    Continue,
    /// Fail the request with a "payload not found" error.
    Reject,
}

impl TryFrom<&str> for UnresolvedPayloadPolicy {
    type Error = ConfigError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "continue" => Ok(Self::Continue),
            "reject" => Ok(Self::Reject),
            _ => Err(ConfigError::InvalidEnv {
                variable: ENV_UNRESOLVED_PAYLOAD,
                value: value.to_owned(),
            }),
        }
    }
}

/// Settings for the shared RPC channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcSettings {
    timeout_secs: u64,
    queue_capacity: usize,
}

impl Default for RpcSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl RpcSettings {
    /// Creates settings with explicit values.
    #[must_use]
    pub const fn new(timeout_secs: u64, queue_capacity: usize) -> Self {
        Self {
            timeout_secs,
            queue_capacity,
        }
    }

    /// Returns how long a call waits for its reply.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the bounded queue size for each responder.
    #[must_use]
    pub const fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }
}

/// Top-level redirect check configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedirectCheckConfig {
    /// RPC channel settings.
    pub rpc: RpcSettings,
    /// Handling of payload identifiers that do not resolve.
    pub unresolved_payload: UnresolvedPayloadPolicy,
}

impl RedirectCheckConfig {
    /// Parses and validates configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Validation`] for out-of-range values.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Builds configuration from the process environment over defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] when a variable cannot be parsed
    /// and [`ConfigError::Validation`] for out-of-range values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds configuration over defaults using `lookup` to read variables.
    ///
    /// # Errors
    ///
    /// See [`RedirectCheckConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_RPC_TIMEOUT_SECS) {
            config.rpc.timeout_secs = parse_env(ENV_RPC_TIMEOUT_SECS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_RPC_QUEUE_CAPACITY) {
            config.rpc.queue_capacity = parse_env(ENV_RPC_QUEUE_CAPACITY, &raw)?;
        }
        if let Some(raw) = lookup(ENV_UNRESOLVED_PAYLOAD) {
            config.unresolved_payload = UnresolvedPayloadPolicy::try_from(raw.as_str())?;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.rpc.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "rpc.timeout_secs must be greater than zero".to_owned(),
            ));
        }
        if self.rpc.queue_capacity == 0 {
            return Err(ConfigError::Validation(
                "rpc.queue_capacity must be greater than zero".to_owned(),
            ));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(variable: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        variable,
        value: raw.to_owned(),
    })
}
