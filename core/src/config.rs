//! Dashboard configuration.
//!
//! Values come from environment-style lookups so tests can supply a map
//! instead of mutating the process environment.

use std::str::FromStr;

use thiserror::Error;

pub const ENV_API_URL: &str = "FOODS_API_URL";
pub const ENV_MAILBOX_CAPACITY: &str = "FOODS_MAILBOX_CAPACITY";
pub const ENV_ERROR_POLICY: &str = "FOODS_ERROR_POLICY";

pub const DEFAULT_API_URL: &str = "http://localhost:3333";
pub const DEFAULT_MAILBOX_CAPACITY: usize = 32;

/// How failed remote calls are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Add and update log and swallow their failures; load and remove
    /// return them to the caller.
    #[default]
    Faithful,
    /// Every operation logs and swallows its failures.
    Unified,
}

impl FromStr for ErrorPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "faithful" => Ok(ErrorPolicy::Faithful),
            "unified" => Ok(ErrorPolicy::Unified),
            other => Err(ConfigError::invalid(ENV_ERROR_POLICY, other)),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

impl ConfigError {
    fn invalid(key: &'static str, value: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub base_url: String,
    /// Bound on queued commands before senders wait.
    pub mailbox_capacity: usize,
    pub error_policy: ErrorPolicy,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
            error_policy: ErrorPolicy::default(),
        }
    }
}

impl DashboardConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_API_URL) {
            config.base_url = url;
        }
        if let Some(raw) = lookup(ENV_MAILBOX_CAPACITY) {
            config.mailbox_capacity = match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::invalid(ENV_MAILBOX_CAPACITY, raw)),
            };
        }
        if let Some(raw) = lookup(ENV_ERROR_POLICY) {
            config.error_policy = raw.parse()?;
        }
        Ok(config)
    }
}
