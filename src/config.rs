//! Configuration management for seisviz.
//!
//! Layered configuration with the following precedence:
//! 1. JSON config file (highest priority)
//! 2. Default values (lowest priority)
//!
//! Every per-call options struct can be seeded from a [`Config`], so a
//! project-wide look (map zoom, figure size, label layout) lives in one file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::error::{Result, SeisvizError};
use crate::figure::Rotation;
use crate::output::OutputFormat;
use crate::spectral::{Detrend, Window};

/// Map rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Initial zoom level (Leaflet/OSM convention, 0..=18)
    #[serde(default = "default_zoom")]
    pub zoom: u8,

    /// Marker colour for stations
    #[serde(default = "default_station_color")]
    pub station_color: String,

    /// Tile URL template for interactive maps
    #[serde(default = "default_tiles")]
    pub tiles: String,

    /// Pixel width of static map output
    #[serde(default = "default_map_width")]
    pub width: u32,

    /// Pixel height of static map output
    #[serde(default = "default_map_height")]
    pub height: u32,
}

/// Figure rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigureConfig {
    #[serde(default = "default_figure_width")]
    pub width: u32,

    #[serde(default = "default_figure_height")]
    pub height: u32,

    /// Extension used when a figure is displayed rather than saved
    #[serde(default = "default_extension")]
    pub default_extension: String,
}

/// Record section layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSectionConfig {
    /// Trace amplitude scale relative to the mean station spacing
    #[serde(default = "default_scale")]
    pub scale: f64,

    /// The two label heights above the plot, as fractions of the time span
    #[serde(default = "default_label_offsets")]
    pub label_offsets: [f64; 2],

    /// Label rotation in degrees, counter-clockwise; a multiple of 90
    #[serde(default = "default_label_rotation")]
    pub label_rotation: f64,
}

/// Periodogram estimation defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodogramConfig {
    #[serde(default = "default_window")]
    pub window: String,

    #[serde(default = "default_detrend")]
    pub detrend: String,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub map: MapConfig,

    #[serde(default)]
    pub figure: FigureConfig,

    #[serde(default)]
    pub record_section: RecordSectionConfig,

    #[serde(default)]
    pub periodogram: PeriodogramConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration: defaults, overlaid by the JSON file if one is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Config::default();

        if let Some(path) = path {
            let file_config = Self::load_from_file(path)?;
            config.merge(file_config);
        }

        Ok(config)
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        self.map = other.map;
        self.figure = other.figure;
        self.record_section = other.record_section;
        self.periodogram = other.periodogram;
        self.log_level = other.log_level;
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(SeisvizError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        if self.map.zoom > 18 {
            return Err(SeisvizError::Config {
                message: format!("Map zoom must be in 0..=18, got {}", self.map.zoom),
            });
        }

        if self.map.width == 0 || self.map.height == 0 {
            return Err(SeisvizError::Config {
                message: "Map width and height must be non-zero".to_string(),
            });
        }

        if self.figure.width == 0 || self.figure.height == 0 {
            return Err(SeisvizError::Config {
                message: "Figure width and height must be non-zero".to_string(),
            });
        }

        match OutputFormat::from_extension(&self.figure.default_extension) {
            Some(format) if format.is_figure_format() => {}
            _ => {
                return Err(SeisvizError::Config {
                    message: format!(
                        "Invalid default extension: {}. Must be one of: svg, png, json",
                        self.figure.default_extension
                    ),
                });
            }
        }

        if !(self.record_section.scale.is_finite() && self.record_section.scale > 0.0) {
            return Err(SeisvizError::Config {
                message: "Record section scale must be a positive number".to_string(),
            });
        }

        let [low, high] = self.record_section.label_offsets;
        if !(low.is_finite() && high.is_finite()) {
            return Err(SeisvizError::Config {
                message: "Record section label offsets must be finite".to_string(),
            });
        }

        Rotation::from_degrees(self.record_section.label_rotation).map_err(|e| {
            SeisvizError::Config {
                message: e.to_string(),
            }
        })?;

        Window::from_str(&self.periodogram.window).map_err(|e| SeisvizError::Config {
            message: e.to_string(),
        })?;
        Detrend::from_str(&self.periodogram.detrend).map_err(|e| SeisvizError::Config {
            message: e.to_string(),
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            map: MapConfig::default(),
            figure: FigureConfig::default(),
            record_section: RecordSectionConfig::default(),
            periodogram: PeriodogramConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            zoom: default_zoom(),
            station_color: default_station_color(),
            tiles: default_tiles(),
            width: default_map_width(),
            height: default_map_height(),
        }
    }
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: default_figure_width(),
            height: default_figure_height(),
            default_extension: default_extension(),
        }
    }
}

impl Default for RecordSectionConfig {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            label_offsets: default_label_offsets(),
            label_rotation: default_label_rotation(),
        }
    }
}

impl Default for PeriodogramConfig {
    fn default() -> Self {
        Self {
            window: default_window(),
            detrend: default_detrend(),
        }
    }
}

// Default value functions for serde
fn default_zoom() -> u8 {
    4
}

fn default_station_color() -> String {
    "#2c7fb8".to_string()
}

fn default_tiles() -> String {
    "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string()
}

fn default_map_width() -> u32 {
    1000
}

fn default_map_height() -> u32 {
    700
}

fn default_figure_width() -> u32 {
    1200
}

fn default_figure_height() -> u32 {
    800
}

fn default_extension() -> String {
    "svg".to_string()
}

fn default_scale() -> f64 {
    1.0
}

fn default_label_offsets() -> [f64; 2] {
    [0.02, 0.06]
}

fn default_label_rotation() -> f64 {
    90.0
}

fn default_window() -> String {
    "boxcar".to_string()
}

fn default_detrend() -> String {
    "constant".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
