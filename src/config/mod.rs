//! Configuration loading and key bindings.
//!
//! Precedence chain (highest wins):
//! CLI args → environment variables → config file → built-in defaults.

pub mod keybindings;
mod loader;

pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, ConfigError, ConfigFile,
    ResolvedConfig,
};
