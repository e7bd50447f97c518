//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Default Joplin profile directory
    pub profile: Option<PathBuf>,

    /// Default destination vault directory
    pub dest: Option<PathBuf>,

    /// Subdirectory of assets/ to place attachments in
    pub assets_namespace: Option<String>,

    /// Stop at the first failed item
    #[serde(default)]
    pub fail_fast: bool,
}

impl Config {
    /// Load configuration from `path`, or from the default location.
    ///
    /// Returns default config if the default file doesn't exist. An
    /// explicitly given file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = Self::config_path();
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/vaultport/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vaultport")
            .join("config.toml")
    }

    /// Resolve the profile directory, with CLI argument taking precedence.
    pub fn profile(&self, cli_profile: Option<&PathBuf>) -> Option<PathBuf> {
        cli_profile.cloned().or_else(|| self.profile.clone())
    }

    /// Resolve the destination directory.
    ///
    /// Precedence order:
    /// 1. CLI `--dest` argument
    /// 2. Config file `dest` setting
    /// 3. `./vault`
    pub fn dest(&self, cli_dest: Option<&PathBuf>) -> PathBuf {
        cli_dest
            .cloned()
            .or_else(|| self.dest.clone())
            .unwrap_or_else(|| PathBuf::from("vault"))
    }

    /// Resolve the assets namespace, with CLI argument taking precedence.
    pub fn assets_namespace(&self, cli_namespace: Option<&String>) -> Option<String> {
        cli_namespace
            .cloned()
            .or_else(|| self.assets_namespace.clone())
    }
}
