//! hxv - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// hxv - paginated hex viewer for the terminal
#[derive(Parser, Debug)]
#[command(name = "hxv")]
#[command(version)]
#[command(about = "TUI hex viewer that loads large inputs one page at a time")]
pub struct Args {
    /// Path to the file to view (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Page size in bytes for demand-paged loading (must be positive)
    #[arg(short, long)]
    pub page_size: Option<usize>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = hxv::config::load_config_with_precedence(args.config.clone())?;
        let merged = hxv::config::merge_config(config_file);
        let with_env = hxv::config::apply_env_overrides(merged);
        hxv::config::apply_cli_overrides(with_env, args.page_size)?
    };

    hxv::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    // Detect input source (file or stdin)
    let source = hxv::source::detect_source(args.file.clone())?;

    hxv::view::run_with_source(source, &config)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["hxv", "--help"]);
        // Help returns Err with DisplayHelp, which is success
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["hxv", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["hxv"]);
        assert_eq!(args.file, None);
        assert_eq!(args.page_size, None);
        assert_eq!(args.config, None);
    }

    #[test]
    fn test_file_path_populates_file_field() {
        let args = Args::parse_from(["hxv", "firmware.bin"]);
        assert_eq!(args.file, Some(PathBuf::from("firmware.bin")));
    }

    #[test]
    fn test_page_size_short_flag() {
        let args = Args::parse_from(["hxv", "-p", "4096"]);
        assert_eq!(args.page_size, Some(4096));
    }

    #[test]
    fn test_page_size_long_flag() {
        let args = Args::parse_from(["hxv", "--page-size", "1024"]);
        assert_eq!(args.page_size, Some(1024));
    }

    #[test]
    fn test_page_size_rejects_garbage() {
        let result = Args::try_parse_from(["hxv", "-p", "lots"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_path() {
        let args = Args::parse_from(["hxv", "--config", "/custom/config.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_combined_flags() {
        let args = Args::parse_from(["hxv", "core.dump", "-p", "512", "--config", "c.toml"]);
        assert_eq!(args.file, Some(PathBuf::from("core.dump")));
        assert_eq!(args.page_size, Some(512));
        assert_eq!(args.config, Some(PathBuf::from("c.toml")));
    }

    #[test]
    fn test_page_size_flows_through_config_precedence_chain() {
        use hxv::config::{apply_cli_overrides, merge_config, ConfigFile};

        let config_file = ConfigFile {
            page_size: Some(1024),
            near_end_margin: None,
            fetch_timeout_ms: None,
            log_file_path: None,
        };

        let merged = merge_config(Some(config_file));
        assert_eq!(
            merged.page_size, 1024,
            "Config file should override default page size"
        );

        let with_cli = apply_cli_overrides(merged, Some(256)).unwrap();
        assert_eq!(
            with_cli.page_size, 256,
            "CLI page size should override all other sources"
        );
    }
}
