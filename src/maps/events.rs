//! Event location maps, coloured by depth and sized by magnitude.

use std::time::Instant;
use tracing::debug;

use super::canvas::{MapCanvas, MapMarker, MarkerShape};
use crate::colors::depth_color;
use crate::config::Config;
use crate::error::Result;
use crate::logging::{log_error, log_operation_end, log_operation_start};
use crate::model::{Event, LocatedMagnitude};
use crate::output::Presentation;

/// Marker radius for a magnitude: `50 * 2^(mag - 10)`
pub fn magnitude_radius(mag: f64) -> f64 {
    50.0 * 2f64.powf(mag - 10.0)
}

/// Options for [`plot_events`]
#[derive(Debug, Clone)]
pub struct EventMapOptions {
    /// Centre of a new canvas; defaults to the first event's origin
    pub origin: Option<(f64, f64)>,
    pub zoom: u8,
    /// Free text added to every tooltip, e.g. the catalogue name
    pub comment: String,
    pub presentation: Presentation,
    pub config: Config,
}

impl Default for EventMapOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl EventMapOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            origin: None,
            zoom: config.map.zoom,
            comment: String::new(),
            presentation: Presentation::Return,
            config: config.clone(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn with_origin(mut self, origin: (f64, f64)) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_presentation(mut self, presentation: Presentation) -> Self {
        self.presentation = presentation;
        self
    }
}

fn event_tooltip(solution: &LocatedMagnitude<'_>, comment: &str) -> String {
    let origin = solution.origin;
    let depth = match origin.depth {
        Some(depth) => format!("{} m", depth),
        None => "unknown".to_string(),
    };
    let text = format!(
        "({}, {}) depth: {}, mag: {}",
        origin.latitude, origin.longitude, depth, solution.magnitude.mag
    );

    if comment.is_empty() {
        text
    } else {
        format!("{} {}", comment, text)
    }
}

/// Draw one circle per origin/magnitude pair of every event.
///
/// When `existing` is given the markers are layered on top of a copy of it, so
/// calling this twice with the first result as `existing` shows both
/// catalogues. The caller's canvas is never modified, and stays usable when
/// layering fails.
pub fn plot_events(
    events: &[Event],
    existing: Option<&MapCanvas>,
    options: &EventMapOptions,
) -> Result<MapCanvas> {
    let start = Instant::now();
    log_operation_start(
        "plot_events",
        Some(&format!(
            "{} events, layered: {}",
            events.len(),
            existing.is_some()
        )),
    );

    let result = build_event_map(events, existing, options);
    if let Err(ref e) = result {
        log_error(e, "plot_events");
    }
    log_operation_end("plot_events", start, result.is_ok());
    result
}

fn build_event_map(
    events: &[Event],
    existing: Option<&MapCanvas>,
    options: &EventMapOptions,
) -> Result<MapCanvas> {
    let mut solutions = Vec::new();
    for event in events {
        solutions.extend(event.located_magnitudes()?);
    }

    let mut canvas = match existing {
        Some(canvas) => canvas.clone(),
        None => {
            let (latitude, longitude) = options
                .origin
                .or_else(|| {
                    solutions
                        .first()
                        .map(|s| (s.origin.latitude, s.origin.longitude))
                })
                .unwrap_or((0.0, 0.0));
            let mut map_config = options.config.map.clone();
            map_config.zoom = options.zoom;
            MapCanvas::from_config(latitude, longitude, &map_config)?
        }
    };

    let layered_on = canvas.len();
    for solution in &solutions {
        canvas.push(MapMarker {
            shape: MarkerShape::Circle,
            latitude: solution.origin.latitude,
            longitude: solution.origin.longitude,
            radius: magnitude_radius(solution.magnitude.mag),
            color: depth_color(solution.origin.depth).to_string(),
            tooltip: event_tooltip(solution, &options.comment),
        })?;
    }

    debug!(
        existing_markers = layered_on,
        added_markers = solutions.len(),
        "Event markers placed"
    );

    canvas.present(&options.presentation)?;
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::depth_palette;
    use crate::error::SeisvizError;
    use crate::model::{Magnitude, Origin};

    fn event(lat: f64, lon: f64, depth: Option<f64>, mag: f64) -> Event {
        Event::new(
            Origin {
                latitude: lat,
                longitude: lon,
                depth,
            },
            Magnitude {
                mag,
                magnitude_type: None,
            },
        )
    }

    #[test]
    fn test_magnitude_radius() {
        assert_eq!(magnitude_radius(10.0), 50.0);
        assert!((magnitude_radius(0.0) - 0.048828125).abs() < 1e-12);
        assert!((magnitude_radius(11.0) - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_radius_strictly_increasing() {
        let mut previous = magnitude_radius(-2.0);
        for step in 1..120 {
            let radius = magnitude_radius(-2.0 + step as f64 * 0.1);
            assert!(radius > previous);
            previous = radius;
        }
    }

    #[test]
    fn test_markers_coloured_by_depth() {
        let events = vec![
            event(35.0, 139.0, Some(25000.0), 6.0),
            event(36.0, 140.0, None, 4.0),
        ];
        let canvas = plot_events(&events, None, &EventMapOptions::default()).unwrap();

        assert_eq!(canvas.len(), 2);
        assert_eq!(canvas.markers()[0].color, depth_palette()[0]);
        assert_eq!(canvas.markers()[1].color, depth_palette()[6]);
        assert_eq!(canvas.center_latitude, 35.0);
    }

    #[test]
    fn test_tooltip_contains_comment_and_values() {
        let events = vec![event(35.0, 139.0, Some(12000.0), 5.5)];
        let options = EventMapOptions::default().with_comment("JMA");
        let canvas = plot_events(&events, None, &options).unwrap();

        assert_eq!(
            canvas.markers()[0].tooltip,
            "JMA (35, 139) depth: 12000 m, mag: 5.5"
        );
    }

    #[test]
    fn test_layering_keeps_both_catalogues() {
        let first = plot_events(
            &[event(1.0, 1.0, Some(100.0), 3.0)],
            None,
            &EventMapOptions::default().with_comment("A"),
        )
        .unwrap();
        let both = plot_events(
            &[
                event(2.0, 2.0, Some(200.0), 4.0),
                event(3.0, 3.0, Some(300.0), 5.0),
            ],
            Some(&first),
            &EventMapOptions::default().with_comment("B"),
        )
        .unwrap();

        assert_eq!(both.len(), 3);
        assert!(both.markers()[0].tooltip.starts_with("A "));
        assert!(both.markers()[2].tooltip.starts_with("B "));
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn test_failed_layering_keeps_first_catalogue() {
        let first = plot_events(
            &[event(1.0, 1.0, Some(100.0), 3.0)],
            None,
            &EventMapOptions::default().with_comment("A"),
        )
        .unwrap();

        let result = plot_events(
            &[event(2.0, 2.0, Some(200.0), 4.0), event(95.0, 3.0, None, 5.0)],
            Some(&first),
            &EventMapOptions::default().with_comment("B"),
        );
        assert!(matches!(result, Err(SeisvizError::InvalidCoordinates { .. })));

        assert_eq!(first.len(), 1);
        assert!(first.markers()[0].tooltip.starts_with("A "));
        let retried = plot_events(
            &[event(2.0, 2.0, Some(200.0), 4.0)],
            Some(&first),
            &EventMapOptions::default().with_comment("B"),
        )
        .unwrap();
        assert_eq!(retried.len(), 2);
    }

    #[test]
    fn test_mismatched_event_is_an_error() {
        let mut bad = event(0.0, 0.0, None, 3.0);
        bad.magnitudes.clear();
        let result = plot_events(&[bad], None, &EventMapOptions::default());
        assert!(matches!(result, Err(SeisvizError::MismatchedEvent { .. })));
    }
}
