use crate::error::AppError;
use photo_gallery::GalleryConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the optional config file inside the app directory
pub const CONFIG_FILE_NAME: &str = "snapgallery.toml";

/// Environment variable overriding the server URL
pub const SERVER_URL_ENV: &str = "SNAPGALLERY_SERVER_URL";

/// Settings read at startup
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the gallery service
    pub server_url: String,
    /// Path under which the service serves uploaded images
    pub asset_path: String,
    /// Directory holding the session database; defaults to the app directory
    pub data_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let gallery = GalleryConfig::default();
        Self {
            server_url: gallery.base_url,
            asset_path: gallery.asset_path,
            data_dir: None,
        }
    }
}

impl AppConfig {
    /// Load `snapgallery.toml` from `app_dir` if present, then apply the
    /// environment override
    pub fn load(app_dir: &Path) -> Result<Self, AppError> {
        let path = app_dir.join(CONFIG_FILE_NAME);
        let config = if path.exists() {
            log::info!("Reading configuration from {}", path.display());
            Self::from_toml_str(&std::fs::read_to_string(&path)?)?
        } else {
            log::debug!("No {} found, using defaults", path.display());
            Self::default()
        };
        Ok(config.with_server_override(std::env::var(SERVER_URL_ENV).ok()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(content)?)
    }

    /// Replace the server URL when a non-empty override is given
    pub fn with_server_override(mut self, server_url: Option<String>) -> Self {
        if let Some(url) = server_url.filter(|url| !url.trim().is_empty()) {
            log::info!("Server URL overridden to {}", url);
            self.server_url = url;
        }
        self
    }

    pub fn gallery_config(&self) -> GalleryConfig {
        GalleryConfig {
            base_url: self.server_url.clone(),
            asset_path: self.asset_path.clone(),
            ..GalleryConfig::default()
        }
    }

    /// Directory holding app data, falling back to `app_dir`
    pub fn data_dir_or(&self, app_dir: &Path) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| app_dir.to_path_buf())
    }
}
