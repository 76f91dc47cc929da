//! Command-line configuration and the default on-disk locations.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".business-directory";
/// CSV file name stored inside the application data directory.
const DATA_FILE_NAME: &str = "businesses.csv";
/// Log file name stored next to the data.
const LOG_FILE_NAME: &str = "business-directory.log";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser, Debug, Default)]
#[command(
    name = "business-directory",
    about = "Search, browse, and maintain a directory of local businesses"
)]
pub struct CliArgs {
    /// CSV file holding the directory (created if missing)
    #[arg(short, long, env = "BUSINESS_DIRECTORY_FILE")]
    pub file: Option<PathBuf>,

    /// File receiving the application log
    #[arg(long, env = "BUSINESS_DIRECTORY_LOG")]
    pub log_file: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` (overrides RUST_LOG)
    #[arg(short, long)]
    pub log_level: Option<String>,
}

/// Fully resolved settings the binary runs with.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_file: PathBuf,
    pub log_file: PathBuf,
    pub log_filter: String,
}

impl Config {
    /// Fill in defaults for anything the command line left out. Relative
    /// paths are anchored to the current directory so later writes do not
    /// depend on where the process happens to be.
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let data_file = match args.file {
            Some(path) => absolutize(&path)?,
            None => data_dir()?.join(DATA_FILE_NAME),
        };

        let log_file = match args.log_file {
            Some(path) => absolutize(&path)?,
            None => data_file
                .parent()
                .map(|dir| dir.join(LOG_FILE_NAME))
                .unwrap_or_else(|| PathBuf::from(LOG_FILE_NAME)),
        };

        let log_filter = args
            .log_level
            .or_else(|| env::var("RUST_LOG").ok())
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            data_file,
            log_file,
            log_filter,
        })
    }
}

/// Resolve the application data directory inside the user's home.
fn data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = env::current_dir().context("failed to read current directory")?;
    Ok(cwd.join(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_paths_win() {
        let config = Config::from_args(CliArgs {
            file: Some(PathBuf::from("/tmp/dir/shops.csv")),
            log_file: Some(PathBuf::from("/tmp/dir/app.log")),
            log_level: Some("debug".into()),
        })
        .unwrap();

        assert_eq!(config.data_file, PathBuf::from("/tmp/dir/shops.csv"));
        assert_eq!(config.log_file, PathBuf::from("/tmp/dir/app.log"));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn log_defaults_next_to_data_file() {
        let config = Config::from_args(CliArgs {
            file: Some(PathBuf::from("/srv/directory/businesses.csv")),
            log_level: Some("warn".into()),
            ..CliArgs::default()
        })
        .unwrap();
        assert_eq!(
            config.log_file,
            PathBuf::from("/srv/directory/business-directory.log")
        );
    }

    #[test]
    fn relative_file_is_anchored_to_cwd() {
        let config = Config::from_args(CliArgs {
            file: Some(PathBuf::from("businesses.csv")),
            log_level: Some("info".into()),
            ..CliArgs::default()
        })
        .unwrap();
        assert!(config.data_file.is_absolute());
        assert!(config.data_file.ends_with("businesses.csv"));
    }

    #[test]
    fn cli_parses_flags() {
        let args = CliArgs::try_parse_from([
            "business-directory",
            "--file",
            "/data/b.csv",
            "--log-level",
            "trace",
        ])
        .unwrap();
        assert_eq!(args.file, Some(PathBuf::from("/data/b.csv")));
        assert_eq!(args.log_level.as_deref(), Some("trace"));
    }
}
