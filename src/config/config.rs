use std::fs;
use std::path::PathBuf;
use serde::{Deserialize, Serialize};

use crate::constants::CONFIG_FILE;
use crate::depgraph_error;
use crate::error::DepGraphResult;

/// Defaults persisted between runs. The password is never stored.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    pub base_url: Option<String>,
    pub username: Option<String>,
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE))
}

/// Load the config file, falling back to defaults when it is missing or unreadable.
pub fn load_config() -> Config {
    config_path()
        .filter(|path| path.exists())
        .and_then(|path| fs::read_to_string(path).ok())
        .and_then(|contents| serde_json::from_str(&contents).ok())
        .unwrap_or_default()
}

pub fn save_config(config: &Config) -> DepGraphResult<PathBuf> {
    let path = config_path()
        .ok_or_else(|| depgraph_error!(ConfigError, "Could not find home directory"))?;

    let contents = serde_json::to_string_pretty(config)?;
    fs::write(&path, contents)?;

    Ok(path)
}
