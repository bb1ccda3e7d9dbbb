//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Name of the per-directory config file.
pub const CONFIG_FILE: &str = "mcqbank.toml";

/// Environment variable that overrides `data_file`.
pub const DATA_FILE_ENV: &str = "MCQBANK_DATA_FILE";

/// Top-level mcqbank configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McqConfig {
    /// Question store. Relative paths are resolved against the config file's directory.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Quiz length used when `--count` is not given. Unset means the
    /// built-in default of five.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_quiz_size: Option<usize>,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("questions.csv")
}

impl Default for McqConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            default_quiz_size: None,
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `mcqbank.toml` in the current directory
/// 2. `~/.config/mcqbank/config.toml`
///
/// `MCQBANK_DATA_FILE` overrides the configured data file.
pub fn load_config_from(path: Option<&Path>) -> Result<McqConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from(CONFIG_FILE);
        if local.exists() {
            Some(local)
        } else {
            global_config_path().filter(|p| p.exists())
        }
    };

    let mut config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let mut config = toml::from_str::<McqConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            if config.data_file.is_relative() {
                if let Some(dir) = path.parent() {
                    config.data_file = dir.join(&config.data_file);
                }
            }
            config
        }
        None => McqConfig::default(),
    };

    if let Ok(file) = std::env::var(DATA_FILE_ENV) {
        if !file.trim().is_empty() {
            config.data_file = PathBuf::from(file);
        }
    }

    anyhow::ensure!(
        config.default_quiz_size != Some(0),
        "default_quiz_size must be at least 1"
    );

    tracing::debug!(
        config = ?config_path,
        data_file = %config.data_file.display(),
        "configuration loaded"
    );
    Ok(config)
}

fn global_config_path() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(|h| {
        PathBuf::from(h)
            .join(".config")
            .join("mcqbank")
            .join("config.toml")
    })
}
