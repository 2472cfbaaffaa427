use std::{
    env,
    io::{Error, ErrorKind},
    path::PathBuf,
};

/// Locates nowplay's directories following the XDG Base Directory
/// specification.
pub struct ConfigPaths;

impl ConfigPaths {
    /// Configuration directory: `$XDG_CONFIG_HOME/nowplay`, falling back
    /// to `$HOME/.config/nowplay`.
    ///
    /// # Errors
    /// Returns an error when neither `XDG_CONFIG_HOME` nor `HOME` is set
    pub fn config_dir() -> Result<PathBuf, Error> {
        Self::base_dir("XDG_CONFIG_HOME", ".config")
    }

    /// Data directory: `$XDG_DATA_HOME/nowplay`, falling back to
    /// `$HOME/.local/share/nowplay`. Created if missing.
    ///
    /// # Errors
    /// Returns an error when no base directory can be resolved or the
    /// directory cannot be created
    pub fn data_dir() -> Result<PathBuf, Error> {
        let dir = Self::base_dir("XDG_DATA_HOME", ".local/share")?;
        if !dir.exists() {
            std::fs::create_dir_all(&dir)?;
        }

        Ok(dir)
    }

    /// Log directory under the data directory. Created if missing.
    ///
    /// # Errors
    /// Returns an error when the directory cannot be resolved or created
    pub fn log_dir() -> Result<PathBuf, Error> {
        let log_dir = Self::data_dir()?.join("logs");
        if !log_dir.exists() {
            std::fs::create_dir_all(&log_dir)?;
        }

        Ok(log_dir)
    }

    /// Path of the main configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined
    pub fn main_config() -> Result<PathBuf, Error> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    fn base_dir(xdg_var: &str, home_fallback: &str) -> Result<PathBuf, Error> {
        // Empty XDG variables are treated as unset.
        if let Some(base) = env::var(xdg_var).ok().filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(base).join("nowplay"));
        }

        match env::var("HOME") {
            Ok(home) => Ok(PathBuf::from(home).join(home_fallback).join("nowplay")),
            Err(_) => Err(Error::new(
                ErrorKind::NotFound,
                format!("neither {xdg_var} nor HOME is set"),
            )),
        }
    }
}
