//! Configuration parsed from environment variables.
//!
//! All settings can be overridden via environment variables prefixed with
//! `UNLOCK_`, and again by command line flags.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::CliError;

/// Environment variable selecting the log level.
pub const LOG_LEVEL_VAR: &str = "UNLOCK_LOG_LEVEL";

/// Environment variable selecting the conditions dataset.
pub const CONDITIONS_VAR: &str = "UNLOCK_CONDITIONS";

/// Dataset path used when none is configured.
pub const DEFAULT_CONDITIONS: &str = "conditions.json";

/// Log level enumeration matching tracing crate levels.
///
/// Defaults to `Warn` so that command output is not interleaved with
/// progress messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Most verbose logging, includes token streams.
    Trace,
    /// Compilation decisions and dataset statistics.
    Debug,
    /// Standard informational messages.
    Info,
    /// Warning messages, such as malformed prerequisites.
    #[default]
    Warn,
    /// Error messages for failures.
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Self::Trace,
            "debug" => Self::Debug,
            "info" => Self::Info,
            "warn" | "warning" => Self::Warn,
            "error" => Self::Error,
            _ => {
                return Err(CliError::InvalidConfig(format!(
                    "unknown log level '{s}' (use trace, debug, info, warn or error)"
                )));
            }
        };
        Ok(level)
    }
}

impl LogLevel {
    /// The `EnvFilter` directive for this level.
    #[must_use]
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Configuration for the command line tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: LogLevel,
    /// Path to the JSON conditions dataset.
    pub conditions: PathBuf,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            conditions: PathBuf::from(DEFAULT_CONDITIONS),
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads `UNLOCK_LOG_LEVEL` and `UNLOCK_CONDITIONS`, falling back to
    /// defaults for missing values.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidConfig` if an environment variable contains
    /// an invalid value.
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidConfig` if a variable holds an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let log_level = match read(LOG_LEVEL_VAR) {
            Some(val) => val.parse()?,
            None => defaults.log_level,
        };
        let conditions = read(CONDITIONS_VAR).map_or(defaults.conditions, PathBuf::from);

        Ok(Self {
            log_level,
            conditions,
        })
    }

    /// Apply optional overrides to an existing configuration.
    ///
    /// This is intended for CLI overrides that should take precedence over
    /// environment-based defaults.
    #[must_use]
    pub fn apply_overrides(
        mut self,
        log_level: Option<LogLevel>,
        conditions: Option<PathBuf>,
    ) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }

        if let Some(path) = conditions {
            self.conditions = path;
        }

        self
    }

    /// Create a new configuration with the specified log level.
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }
}
