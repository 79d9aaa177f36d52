//! Station location maps.

use std::time::Instant;

use super::canvas::{MapCanvas, MapMarker, MarkerShape};
use crate::colors::parse_color;
use crate::config::Config;
use crate::error::Result;
use crate::logging::{log_error, log_operation_end, log_operation_start};
use crate::model::Station;
use crate::output::Presentation;

/// Screen radius of station triangles
const STATION_MARKER_RADIUS: f64 = 6.0;

/// Options for [`plot_stations`]
#[derive(Debug, Clone)]
pub struct StationMapOptions {
    /// Map centre `(latitude, longitude)`
    pub origin: (f64, f64),
    pub zoom: u8,
    /// CSS colour of the triangles
    pub color: String,
    pub presentation: Presentation,
    /// Tiles and static size come from here
    pub config: Config,
}

impl StationMapOptions {
    pub fn new(origin: (f64, f64)) -> Self {
        Self::from_config(origin, &Config::default())
    }

    /// Zoom and colour seeded from the configuration
    pub fn from_config(origin: (f64, f64), config: &Config) -> Self {
        Self {
            origin,
            zoom: config.map.zoom,
            color: config.map.station_color.clone(),
            presentation: Presentation::Return,
            config: config.clone(),
        }
    }

    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_presentation(mut self, presentation: Presentation) -> Self {
        self.presentation = presentation;
        self
    }
}

/// Draw one triangle per station, tooltip `NET.STA (lat, lon) elev m`.
///
/// The canvas is persisted or displayed according to the options and then
/// returned for further layering.
pub fn plot_stations(stations: &[Station], options: &StationMapOptions) -> Result<MapCanvas> {
    let start = Instant::now();
    log_operation_start(
        "plot_stations",
        Some(&format!("{} stations", stations.len())),
    );

    let result = build_station_map(stations, options);
    if let Err(ref e) = result {
        log_error(e, "plot_stations");
    }
    log_operation_end("plot_stations", start, result.is_ok());
    result
}

fn build_station_map(stations: &[Station], options: &StationMapOptions) -> Result<MapCanvas> {
    // Reject unusable colours before anything is written
    parse_color(&options.color)?;

    let mut map_config = options.config.map.clone();
    map_config.zoom = options.zoom;
    let mut canvas = MapCanvas::from_config(options.origin.0, options.origin.1, &map_config)?;

    for station in stations {
        station.validate()?;
        canvas.push(MapMarker {
            shape: MarkerShape::Triangle,
            latitude: station.latitude,
            longitude: station.longitude,
            radius: STATION_MARKER_RADIUS,
            color: options.color.clone(),
            tooltip: station.tooltip(),
        })?;
    }

    canvas.present(&options.presentation)?;
    Ok(canvas)
}
