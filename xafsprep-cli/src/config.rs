//! TOML configuration for the interactive calculator.
//!
//! Every key is optional; command-line flags override the file and the
//! file overrides the built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use xafsprep::SessionSettings;

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "xafsprep.toml";

/// Compiled table written by `xafsprep-generate` with its default arguments.
pub const DEFAULT_TABLE: &str = "data/elam.bin.zst";

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Compiled `.bin.zst` table or raw Elam `.dat` file.
    pub table: Option<PathBuf>,
    pub samples_dir: Option<PathBuf>,
    pub cancel_word: Option<String>,
}

/// Overrides taken from the command line.
#[derive(Debug, Default)]
pub struct Overrides {
    pub table: Option<PathBuf>,
    pub samples_dir: Option<PathBuf>,
}

#[derive(Debug, PartialEq)]
pub struct Settings {
    pub table: PathBuf,
    pub session: SessionSettings,
}

pub fn load_config(path: &Path) -> Result<FileConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_config(&text).with_context(|| format!("invalid config {}", path.display()))
}

pub fn parse_config(text: &str) -> Result<FileConfig> {
    Ok(toml::from_str(text)?)
}

/// Read `explicit` if given, else the default file if present, else nothing.
pub fn discover(explicit: Option<&Path>) -> Result<FileConfig> {
    match explicit {
        Some(path) => load_config(path),
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if default.is_file() {
                load_config(default)
            } else {
                Ok(FileConfig::default())
            }
        }
    }
}

pub fn resolve(file: FileConfig, overrides: Overrides) -> Settings {
    let defaults = SessionSettings::default();
    Settings {
        table: overrides
            .table
            .or(file.table)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TABLE)),
        session: SessionSettings {
            samples_dir: overrides
                .samples_dir
                .or(file.samples_dir)
                .unwrap_or(defaults.samples_dir),
            cancel_word: file.cancel_word.unwrap_or(defaults.cancel_word),
        },
    }
}
