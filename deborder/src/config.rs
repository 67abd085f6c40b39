use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::image::ImageFormat;

/// What to do when an image has no content pixels at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum EmptyImagePolicy {
    /// Report `NoContentFound` to the caller.
    #[default]
    Fail,
    /// Return the source image unchanged.
    KeepOriginal,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CropConfig {
    pub image_format: ImageFormat,
    pub empty_policy: EmptyImagePolicy,
    // Scan rows on the rayon pool; ignored when a border log is attached
    pub parallel: bool,
    pub log_border_only: bool,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            image_format: ImageFormat::default(),
            empty_policy: EmptyImagePolicy::Fail,
            parallel: false,
            log_border_only: false,
        }
    }
}

impl CropConfig {
    /// Load the user config from `~/.config/deborder/config.json`, if there is a readable one.
    pub fn load() -> Option<Self> {
        let config_path = Self::config_path()?;

        fs::read_to_string(&config_path)
            .ok()
            .and_then(|contents| serde_json::from_str(&contents).ok())
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn config_path() -> Option<PathBuf> {
        #[allow(deprecated)]
        let home = std::env::home_dir()?;
        Some(home.join(".config").join("deborder").join("config.json"))
    }
}
