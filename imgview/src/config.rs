//! Viewer configuration.
//!
//! Every field has a default, so an empty file (or no file at all) yields the stock
//! viewer. Values are checked by [`ViewerConfig::validate`] before use.

use iv_display::{ScaleFilter, ViewportConfig, DEFAULT_MAX_INITIAL_SIZE, DEFAULT_MAX_ZOOM};
use iv_input::ShortcutsConfig;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while loading or validating the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Complete viewer configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Zoom and rendering settings.
    #[serde(default)]
    pub viewport: ViewportSection,
    /// Window and frame pacing settings.
    #[serde(default)]
    pub display: DisplaySection,
    /// Key bindings.
    #[serde(default)]
    pub input: InputSection,
}

/// Zoom and rendering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportSection {
    /// Largest zoom factor (power of two).
    #[serde(default = "default_max_zoom")]
    pub max_zoom: u32,
    /// Resampling filter: "nearest" or "linear".
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Color shown under transparent pixels, as RGB.
    #[serde(default)]
    pub background: [u8; 3],
}

fn default_max_zoom() -> u32 {
    DEFAULT_MAX_ZOOM
}

fn default_filter() -> String {
    "nearest".to_string()
}

impl Default for ViewportSection {
    fn default() -> Self {
        Self {
            max_zoom: default_max_zoom(),
            filter: default_filter(),
            background: [0, 0, 0],
        }
    }
}

/// Window and frame pacing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySection {
    /// Target frames per second.
    #[serde(default = "default_refresh_rate_hz")]
    pub refresh_rate_hz: u32,
    /// Largest initial window width.
    #[serde(default = "default_max_initial_width")]
    pub max_initial_width: u32,
    /// Largest initial window height.
    #[serde(default = "default_max_initial_height")]
    pub max_initial_height: u32,
    /// Text placed before the image path in the window title.
    #[serde(default = "default_title_prefix")]
    pub title_prefix: String,
}

fn default_refresh_rate_hz() -> u32 {
    60
}

fn default_max_initial_width() -> u32 {
    DEFAULT_MAX_INITIAL_SIZE.0
}

fn default_max_initial_height() -> u32 {
    DEFAULT_MAX_INITIAL_SIZE.1
}

fn default_title_prefix() -> String {
    "Image Viewer - ".to_string()
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            refresh_rate_hz: default_refresh_rate_hz(),
            max_initial_width: default_max_initial_width(),
            max_initial_height: default_max_initial_height(),
            title_prefix: default_title_prefix(),
        }
    }
}

/// Key binding configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSection {
    #[serde(default = "default_flip_key")]
    pub flip_key: String,
    #[serde(default = "default_fit_key")]
    pub fit_key: String,
    #[serde(default = "default_quit_key")]
    pub quit_key: String,
}

fn default_flip_key() -> String {
    "F".to_string()
}

fn default_fit_key() -> String {
    "S".to_string()
}

fn default_quit_key() -> String {
    "Q".to_string()
}

impl Default for InputSection {
    fn default() -> Self {
        Self {
            flip_key: default_flip_key(),
            fit_key: default_fit_key(),
            quit_key: default_quit_key(),
        }
    }
}

impl ViewerConfig {
    /// Location of the per-user configuration file, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "imgview")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load the configuration.
    ///
    /// An explicit path must exist. Without one, the per-user file is used when
    /// present and the defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or fails validation.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::load_file(&path),
            _ => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Read, parse and validate a configuration file.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.viewport_config()
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.display.refresh_rate_hz == 0 {
            return Err(ConfigError::Invalid(
                "refresh rate must be at least 1 Hz".to_string(),
            ));
        }

        if self.display.max_initial_width == 0 || self.display.max_initial_height == 0 {
            return Err(ConfigError::Invalid(
                "maximum initial window size cannot be 0".to_string(),
            ));
        }

        self.scale_filter()?;
        self.shortcuts()?;
        Ok(())
    }

    /// Viewport settings for the engine.
    #[must_use]
    pub fn viewport_config(&self) -> ViewportConfig {
        ViewportConfig {
            max_zoom: self.viewport.max_zoom,
        }
    }

    /// Parsed resampling filter.
    pub fn scale_filter(&self) -> Result<ScaleFilter, ConfigError> {
        self.viewport.filter.parse().map_err(ConfigError::Invalid)
    }

    /// Key bindings table.
    pub fn shortcuts(&self) -> Result<ShortcutsConfig, ConfigError> {
        ShortcutsConfig::from_key_names(
            &self.input.flip_key,
            &self.input.fit_key,
            &self.input.quit_key,
        )
        .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Target duration of one frame.
    #[must_use]
    pub fn frame_period(&self) -> Duration {
        Duration::from_secs(1) / self.display.refresh_rate_hz.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ViewerConfig::default();
        config.validate().unwrap();
        assert_eq!(config.viewport.max_zoom, 16);
        assert_eq!(config.scale_filter().unwrap(), ScaleFilter::Nearest);
        assert_eq!(config.display.title_prefix, "Image Viewer - ");
        assert_eq!(config.frame_period(), Duration::from_nanos(16_666_666));
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: ViewerConfig = toml::from_str("").unwrap();
        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config: ViewerConfig = toml::from_str(
            r#"
            [viewport]
            max_zoom = 8
            filter = "linear"

            [input]
            quit_key = "Escape"
            "#,
        )
        .unwrap();

        config.validate().unwrap();
        assert_eq!(config.viewport.max_zoom, 8);
        assert_eq!(config.viewport.background, [0, 0, 0]);
        assert_eq!(config.scale_filter().unwrap(), ScaleFilter::Linear);
        assert_eq!(config.input.flip_key, "F");
        assert_eq!(config.display.refresh_rate_hz, 60);
    }

    #[test]
    fn test_validation_failures() {
        let mut config = ViewerConfig::default();
        config.viewport.max_zoom = 12;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = ViewerConfig::default();
        config.viewport.max_zoom = 0;
        assert!(config.validate().is_err());

        let mut config = ViewerConfig::default();
        config.display.refresh_rate_hz = 0;
        assert!(config.validate().is_err());

        let mut config = ViewerConfig::default();
        config.viewport.filter = "cubic".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cubic"));

        let mut config = ViewerConfig::default();
        config.input.fit_key = "Hyper".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Hyper"));
    }
}
