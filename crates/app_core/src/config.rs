//! Application configuration

use crate::AppError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding `album.base_path`
pub const ALBUM_PATH_ENV: &str = "ALBUM_VIEWER_ALBUM";

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub album: AlbumConfig,
    pub viewer: ViewerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub theme: String,
    pub window_title: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            window_title: "Album Viewer".to_string(),
        }
    }
}

/// Where the numbered album images live and how they are named
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlbumConfig {
    pub base_path: PathBuf,
    /// Highest candidate file number; candidates are `1..=total_images`
    pub total_images: u32,
    pub extension: String,
    pub pad_width: usize,
}

impl Default for AlbumConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("./album"),
            total_images: 174,
            extension: "jpg".to_string(),
            pad_width: 3,
        }
    }
}

impl AlbumConfig {
    /// File name for a 1-based image number, e.g. `7 -> "007.jpg"`
    pub fn file_name(&self, number: u32) -> String {
        format!(
            "{:0width$}.{}",
            number,
            self.extension,
            width = self.pad_width
        )
    }

    /// Full path for a 1-based image number
    pub fn path_for(&self, number: u32) -> PathBuf {
        self.base_path.join(self.file_name(number))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Pointer idle time before the cursor is hidden over the lightbox
    pub cursor_idle_ms: u64,
    pub thumbnail_size: f32,
    pub min_delay_secs: u32,
    pub max_delay_secs: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            cursor_idle_ms: 3000,
            thumbnail_size: 160.0,
            min_delay_secs: 1,
            max_delay_secs: 30,
        }
    }
}

impl AppConfig {
    /// Load configuration from the platform config directory
    pub fn load() -> Result<Self, AppError> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_env();
        Ok(config)
    }

    /// Load configuration from a specific file, defaults when it is missing
    pub fn load_from(path: &Path) -> Result<Self, AppError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            tracing::info!("Configuration loaded from {:?}", path);
            Ok(config)
        } else {
            tracing::info!("Using default configuration");
            Ok(Self::default())
        }
    }

    fn apply_env(&mut self) {
        if let Some(path) = std::env::var_os(ALBUM_PATH_ENV) {
            tracing::info!("Album path overridden by {}: {:?}", ALBUM_PATH_ENV, path);
            self.album.base_path = PathBuf::from(path);
        }
    }

    /// Directory holding `config.toml` and the preference record
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "AlbumViewer", "AlbumViewer")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        Self::config_dir()
            .map(|dir| dir.join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("./config.toml"))
    }
}
