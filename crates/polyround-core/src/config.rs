//! Configuration and settings management for Polyround
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats stored in the platform-specific config directory.
//!
//! Configuration is organized into logical sections:
//! - Shape defaults (size, vertex count, corner radius, vertex limit)
//! - Canvas settings (surface dimensions, initial zoom and pan)
//! - Placement of the shape on the canvas
//! - Stroke and fill style
//! - History depth

use crate::error::{ConfigError, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Zoom bounds, both exclusive.
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 50.0;

/// Whether `zoom` lies strictly between [`MIN_ZOOM`] and [`MAX_ZOOM`].
pub fn zoom_in_range(zoom: f64) -> bool {
    zoom > MIN_ZOOM && zoom < MAX_ZOOM
}

/// Default shape parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeSettings {
    /// Side of the square the polygon is inscribed in
    pub size: f64,
    /// Initial vertex count
    pub num_verts: u32,
    /// Initial corner radius
    pub corner_radius: f64,
    /// Largest vertex count the vertex-count handle can produce
    pub max_num_verts: u32,
}

impl Default for ShapeSettings {
    fn default() -> Self {
        Self {
            size: 200.0,
            num_verts: 3,
            corner_radius: 0.0,
            max_num_verts: 21,
        }
    }
}

/// Drawing surface settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Surface width in pixels
    pub width: f64,
    /// Surface height in pixels
    pub height: f64,
    /// Initial zoom (1.0 = 100%)
    pub zoom: f64,
    /// Initial horizontal pan in pixels
    pub pan_x: f64,
    /// Initial vertical pan in pixels
    pub pan_y: f64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 600.0,
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

/// Initial document-space placement of the shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementSettings {
    pub left: f64,
    pub top: f64,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            left: 100.0,
            top: 100.0,
        }
    }
}

/// Stroke and fill applied to the shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSettings {
    pub stroke: String,
    pub stroke_width: f64,
    /// Empty string means no fill
    pub fill: String,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            stroke: "green".to_string(),
            stroke_width: 1.0,
            fill: String::new(),
        }
    }
}

/// Undo history settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of snapshots kept, including the current one
    pub capacity: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { capacity: 50 }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub shape: ShapeSettings,
    pub canvas: CanvasSettings,
    pub placement: PlacementSettings,
    pub style: StyleSettings,
    pub history: HistorySettings,
}

impl Config {
    /// Create new default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Location of the config file in the platform config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("polyround").join("config.toml"))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Config = match Format::from_path(path)? {
            Format::Json => serde_json::from_str(&content)
                .map_err(|e| ConfigError::Corrupted(format!("{}: {}", path.display(), e)))?,
            Format::Toml => toml::from_str(&content)
                .map_err(|e| ConfigError::Corrupted(format!("{}: {}", path.display(), e)))?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load config from `path`, or from the default location when `path` is
    /// `None`. Falls back to defaults when the file does not exist.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        if path.exists() {
            Self::load_from_file(&path)
        } else {
            tracing::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let shape = &self.shape;
        if !(shape.size.is_finite() && shape.size > 0.0) {
            return Err(out_of_range("shape.size", shape.size));
        }
        if shape.max_num_verts < 3 {
            return Err(out_of_range("shape.max_num_verts", shape.max_num_verts));
        }
        if shape.num_verts < 3 || shape.num_verts > shape.max_num_verts {
            return Err(out_of_range("shape.num_verts", shape.num_verts));
        }
        if !(shape.corner_radius >= 0.0 && shape.corner_radius < shape.size / 2.0) {
            return Err(out_of_range("shape.corner_radius", shape.corner_radius));
        }

        if self.canvas.width <= 0.0 || self.canvas.height <= 0.0 {
            return Err(Error::other("Canvas dimensions must be > 0"));
        }
        if !zoom_in_range(self.canvas.zoom) {
            return Err(out_of_range("canvas.zoom", self.canvas.zoom));
        }

        if self.style.stroke_width < 0.0 {
            return Err(out_of_range("style.stroke_width", self.style.stroke_width));
        }

        if self.history.capacity == 0 {
            return Err(Error::other("History capacity must be > 0"));
        }

        Ok(())
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(format!(
                "Config file must be .json or .toml, got {:?}",
                other.unwrap_or("")
            ))
            .into()),
        }
    }
}

fn out_of_range(key: &str, value: impl ToString) -> Error {
    ConfigError::ValueOutOfRange {
        key: key.to_string(),
        value: value.to_string(),
    }
    .into()
}
