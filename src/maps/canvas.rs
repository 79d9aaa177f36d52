//! The map scene shared by the station and event renderers.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::MapConfig;
use crate::error::{Result, SeisvizError};
use crate::geodesy::normalize_longitude;
use crate::model::station::validate_coordinates;
use crate::output::{announce_display, display_path, OutputFormat, Presentation};

/// Pixel size of one slippy-map tile
const TILE_SIZE: f64 = 256.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerShape {
    /// Upward triangle, used for stations
    Triangle,
    /// Filled circle, used for events
    Circle,
}

/// One marker on a map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub shape: MarkerShape,
    pub latitude: f64,
    pub longitude: f64,
    /// Radius in screen pixels
    pub radius: f64,
    /// CSS colour
    pub color: String,
    pub tooltip: String,
}

/// A map under construction. Markers are drawn in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapCanvas {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub zoom: u8,
    /// Tile URL template for the interactive page
    pub tiles: String,
    /// Pixel size of static renderings
    pub width: u32,
    pub height: u32,
    markers: Vec<MapMarker>,
}

impl MapCanvas {
    /// Empty canvas centred on `(latitude, longitude)` with default tiles and size
    pub fn new(latitude: f64, longitude: f64, zoom: u8) -> Result<Self> {
        let config = MapConfig {
            zoom,
            ..MapConfig::default()
        };
        Self::from_config(latitude, longitude, &config)
    }

    /// Empty canvas using zoom, tiles and size from `config`
    pub fn from_config(latitude: f64, longitude: f64, config: &MapConfig) -> Result<Self> {
        validate_coordinates(latitude, longitude).map_err(|message| {
            SeisvizError::InvalidCoordinates {
                message: format!("map centre: {}", message),
            }
        })?;

        Ok(Self {
            center_latitude: latitude,
            center_longitude: normalize_longitude(longitude),
            zoom: config.zoom,
            tiles: config.tiles.clone(),
            width: config.width,
            height: config.height,
            markers: Vec::new(),
        })
    }

    /// Append a marker after checking its coordinates
    pub fn push(&mut self, marker: MapMarker) -> Result<()> {
        validate_coordinates(marker.latitude, marker.longitude).map_err(|message| {
            SeisvizError::InvalidCoordinates {
                message: format!("marker '{}': {}", marker.tooltip, message),
            }
        })?;
        self.markers.push(marker);
        Ok(())
    }

    pub fn markers(&self) -> &[MapMarker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Visible `(min_lon, min_lat, max_lon, max_lat)` of a static rendering.
    ///
    /// Uses the slippy-map scale (256 px per tile, 2^zoom tiles around the
    /// globe). Longitudes are unwrapped around the centre and may leave
    /// [-180, 180].
    pub fn extent(&self) -> (f64, f64, f64, f64) {
        let degrees_per_pixel = 360.0 / (TILE_SIZE * 2f64.powi(self.zoom as i32));
        let lon_span = (self.width as f64 * degrees_per_pixel).min(360.0);
        let lat_span = (self.height as f64 * degrees_per_pixel).min(180.0);

        let min_lat = (self.center_latitude - lat_span / 2.0).max(-90.0);
        let max_lat = (self.center_latitude + lat_span / 2.0).min(90.0);

        (
            self.center_longitude - lon_span / 2.0,
            min_lat,
            self.center_longitude + lon_span / 2.0,
            max_lat,
        )
    }

    /// Longitude of a point unwrapped to within 180° of the centre
    pub fn unwrap_longitude(&self, longitude: f64) -> f64 {
        self.center_longitude + normalize_longitude(longitude - self.center_longitude)
    }

    /// Interactive Leaflet page
    pub fn to_html(&self) -> Result<String> {
        super::html::render_page(self)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Persist the canvas; the format follows the extension of `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        let format = OutputFormat::from_path(path)?;
        debug!(
            path = %path.display(),
            format = format.extension(),
            markers = self.markers.len(),
            "Saving map"
        );

        match format {
            OutputFormat::Html => std::fs::write(path, self.to_html()?)?,
            OutputFormat::Json => std::fs::write(path, self.to_json()?)?,
            OutputFormat::Svg | OutputFormat::Png => {
                format.ensure_available()?;
                self.save_static(path, format)?;
            }
        }

        info!(path = %path.display(), markers = self.markers.len(), "Map saved");
        Ok(())
    }

    #[cfg(feature = "figures")]
    fn save_static(&self, path: &Path, format: OutputFormat) -> Result<()> {
        crate::render::save_map(self, path, format)
    }

    #[cfg(not(feature = "figures"))]
    fn save_static(&self, _path: &Path, format: OutputFormat) -> Result<()> {
        format.ensure_available()
    }

    /// Apply the persist/display contract. Returns the path written, if any.
    pub fn present(&self, presentation: &Presentation) -> Result<Option<PathBuf>> {
        match presentation {
            Presentation::Return => Ok(None),
            Presentation::Save(path) => {
                self.save(path)?;
                Ok(Some(path.clone()))
            }
            Presentation::Display => {
                let path = display_path(OutputFormat::Html);
                self.save(&path)?;
                announce_display(&path);
                Ok(Some(path))
            }
        }
    }
}
