use std::{fs, path::Path};

use super::{Config, ConfigPaths};
use crate::{NowPlayError, Result};

impl Config {
    /// Load configuration from the default location.
    ///
    /// Falls back to the built-in defaults when no configuration file
    /// exists.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load() -> Result<Config> {
        let path = ConfigPaths::main_config()?;
        if !path.exists() {
            return Ok(Config::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load_from(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| NowPlayError::toml_parse(e, Some(path)))
    }
}
