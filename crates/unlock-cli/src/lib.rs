//! Support modules for the `unlock` command line tool.
//!
//! The binary answers prerequisite questions against a JSON dataset mapping
//! course codes to their prerequisite text.
//!
//! # Configuration
//!
//! Settings are read from environment variables and may be overridden by
//! command line flags:
//!
//! - `UNLOCK_LOG_LEVEL`: Log verbosity (trace, debug, info, warn, error)
//! - `UNLOCK_CONDITIONS`: Path to the conditions dataset
//!
//! # Example
//!
//! ```ignore
//! use unlock_cli::config::CliConfig;
//! use unlock_cli::logging::init_logging;
//!
//! let config = CliConfig::from_env()?;
//! init_logging(&config);
//! ```

pub mod config;
pub mod error;
pub mod logging;
