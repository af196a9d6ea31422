//! Host-supplied editor configuration.
//!
//! # Responsibility
//! - Parse the JSON options object a host passes when creating an editor.
//! - Reject values the core cannot honor before any editing starts.
//!
//! # Invariants
//! - Every field has a default; `{}` is a valid config.

use crate::logging::{normalize_level, LoggingError};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Editor options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Ask the host to confirm before empty cards/subcards are pruned.
    pub confirm_pruning: bool,
    /// Log level for hosts that start file logging (`trace`..`error`).
    pub log_level: Option<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            confirm_pruning: true,
            log_level: None,
        }
    }
}

impl EditorConfig {
    /// Parses and validates a JSON config object.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_str(trimmed)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(level) = &self.log_level {
            normalize_level(level)?;
        }
        Ok(())
    }

    /// Effective log level, falling back to the build-mode default.
    pub fn effective_log_level(&self) -> &'static str {
        self.log_level
            .as_deref()
            .and_then(|level| normalize_level(level).ok())
            .unwrap_or_else(crate::logging::default_log_level)
    }
}

/// Config parse/validation failures.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Logging(LoggingError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid editor config: {err}"),
            Self::Logging(err) => write!(f, "invalid editor config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Logging(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<LoggingError> for ConfigError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}
