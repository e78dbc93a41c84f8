//! Settings, read once at startup.
//!
//! Layering is defaults → `config.toml` → CLI flags. Every key is optional
//! so a sparse file only overrides what it names.

use crate::APP_NAME;
use anyhow::{Context, Result};
use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

pub const DEFAULT_SEEK_STEP: u32 = 5;
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Scroll the track list to the current track after every skip.
    pub auto_scroll: bool,
    /// Seconds moved by the seek keys.
    pub seek_step: u32,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            auto_scroll: false,
            seek_step: DEFAULT_SEEK_STEP,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Settings {
    /// `$XDG_CONFIG_HOME/cadence/config.toml` or the platform equivalent.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_NAME).join("config.toml"))
    }

    /// Missing file means defaults. A file that exists but does not parse
    /// is an error.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Settings::default());
        }

        let file_str = std::fs::read_to_string(path)
            .with_context(|| format!("Unable to read config: \"{}\"", path.display()))?;
        let settings = Self::from_toml(&file_str)
            .with_context(|| format!("Malformed config: \"{}\"", path.display()))?;

        info!("Loaded config from {}", path.display());
        debug!("Config: {settings:?}");
        Ok(settings)
    }

    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from_file(path),
            None => {
                warn!("Could not determine config directory, using defaults");
                Ok(Settings::default())
            }
        }
    }

    pub fn from_toml(s: &str) -> Result<Self> {
        Ok(toml::from_str::<Settings>(s)?)
    }

    /// Unknown level names fall back to `info`.
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}
