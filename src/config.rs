//! Command-line and environment configuration.

use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Parser, Debug, Clone)]
#[command(name = "tlist", version, about = "Terminal to-do lists")]
pub struct Cli {
    /// JSON file holding the saved lists
    #[arg(long = "data-file", env = "TLIST_DATA_FILE", default_value = "tlist.json")]
    pub data_file: PathBuf,

    /// Directory for log files; logging is off when omitted
    #[arg(long = "log-dir", env = "TLIST_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// error|warn|info|debug|trace
    #[arg(long = "log-level", env = "TLIST_LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported log level `{0}`; expected trace|debug|info|warn|error")]
    UnsupportedLogLevel(String),
}

/// Validated runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_file: PathBuf,
    pub log_dir: Option<PathBuf>,
    pub log_level: &'static str,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let log_level = match cli.log_level.as_deref() {
            Some(level) => normalize_level(level)?,
            None => default_log_level(),
        };

        Ok(Self {
            data_file: cli.data_file,
            log_dir: cli.log_dir,
            log_level,
        })
    }
}

/// `debug` in debug builds, `info` in release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn normalize_level(level: &str) -> Result<&'static str, ConfigError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(ConfigError::UnsupportedLogLevel(other.to_string())),
    }
}
