//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, unreadable file).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A config value is outside its valid range.
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue {
        /// The offending field name.
        field: &'static str,
        /// Why the value is invalid.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/hxv/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Page size in bytes for demand-paged loading.
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Margin, in display lines, at which the next page is prefetched.
    #[serde(default)]
    pub near_end_margin: Option<usize>,

    /// Timeout in milliseconds before an outstanding page fetch is abandoned.
    #[serde(default)]
    pub fetch_timeout_ms: Option<u64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Page size in bytes.
    pub page_size: usize,
    /// Near-end prefetch margin in display lines.
    pub near_end_margin: usize,
    /// Fetch timeout in milliseconds.
    pub fetch_timeout_ms: u64,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            page_size: 8192,
            near_end_margin: crate::state::viewport::DEFAULT_NEAR_END_MARGIN,
            fetch_timeout_ms: 5000,
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/hxv/hxv.log` on Unix-like systems, or the
/// platform-appropriate state directory elsewhere. Falls back to the
/// current directory if no state directory can be determined.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("hxv").join("hxv.log")
    } else {
        PathBuf::from("hxv.log")
    }
}

/// Resolve default config file path.
///
/// Returns `~/.config/hxv/config.toml` on Unix, appropriate path on other
/// platforms. Returns `None` if the config directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hxv").join("config.toml"))
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if the file doesn't exist (not an error - use
/// defaults).
///
/// # Errors
///
/// Returns error if the file exists but cannot be read or parsed, or if
/// it sets a value outside its valid range.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    // Page math divides by the page size; a zero from the file must be
    // rejected here, same as the env and CLI paths.
    if config.page_size == Some(0) {
        return Err(ConfigError::InvalidValue {
            field: "page_size",
            reason: "must be positive".to_string(),
        });
    }

    Ok(Some(config))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (like CLI `--config`)
/// 2. `HXV_CONFIG` environment variable
/// 3. Default path `~/.config/hxv/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("HXV_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise
/// use the default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        page_size: config.page_size.unwrap_or(defaults.page_size),
        near_end_margin: config.near_end_margin.unwrap_or(defaults.near_end_margin),
        fetch_timeout_ms: config.fetch_timeout_ms.unwrap_or(defaults.fetch_timeout_ms),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `HXV_PAGE_SIZE`: Override page size (parsed as a positive integer;
///   unparseable values are ignored)
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var("HXV_PAGE_SIZE") {
        if let Ok(size) = raw.parse::<usize>() {
            if size > 0 {
                config.page_size = size;
            }
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` for a zero page size.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    page_size_override: Option<usize>,
) -> Result<ResolvedConfig, ConfigError> {
    if let Some(page_size) = page_size_override {
        if page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "page_size",
                reason: "must be positive".to_string(),
            });
        }
        config.page_size = page_size;
    }

    Ok(config)
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
