//! Backend-independent figure scenes.
//!
//! The plotting helpers describe what to draw as a [`Figure`]; the `render`
//! module turns that into SVG or PNG. Keeping the scene as data lets callers
//! inspect or tweak a figure before it is written anywhere.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::FigureConfig;
use crate::error::{Result, SeisvizError};
use crate::output::{announce_display, display_path, OutputFormat, Presentation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisScale {
    #[default]
    Linear,
    /// Base-10 logarithmic; non-positive values are not drawn
    Log,
}

/// How tick values are printed
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum TickFormat {
    #[default]
    Number,
    /// Values are seconds after `origin`, printed as wall-clock `%H:%M:%S`
    Clock { origin: DateTime<Utc> },
}

impl TickFormat {
    pub fn format(&self, value: f64) -> String {
        match self {
            TickFormat::Number => format_number(value),
            TickFormat::Clock { origin } => {
                let offset = chrono::Duration::milliseconds((value * 1000.0).round() as i64);
                (*origin + offset).format("%H:%M:%S").to_string()
            }
        }
    }
}

fn format_number(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-3..1e5).contains(&magnitude) {
        format!("{:.1e}", value)
    } else if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Text rotation in quarter turns, counter-clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    None,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Accepts multiples of 90 degrees (any sign)
    pub fn from_degrees(degrees: f64) -> Result<Self> {
        let turns = degrees / 90.0;
        if !turns.is_finite() || turns.fract() != 0.0 {
            return Err(SeisvizError::invalid_parameter(
                "rotation",
                format!("rotation must be a multiple of 90 degrees, got {}", degrees),
            ));
        }
        Ok(match (turns as i64).rem_euclid(4) {
            0 => Rotation::None,
            1 => Rotation::Deg90,
            2 => Rotation::Deg180,
            _ => Rotation::Deg270,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Axis {
    pub label: String,
    pub scale: AxisScale,
    /// Fixed `(min, max)`; derived from the data when absent
    pub range: Option<(f64, f64)>,
    pub ticks: TickFormat,
    pub tick_rotation: Rotation,
}

impl Axis {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn log(mut self) -> Self {
        self.scale = AxisScale::Log;
        self
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.range = Some((min, max));
        self
    }

    pub fn with_ticks(mut self, ticks: TickFormat) -> Self {
        self.ticks = ticks;
        self
    }

    pub fn with_tick_rotation(mut self, rotation: Rotation) -> Self {
        self.tick_rotation = rotation;
        self
    }

    fn accepts(&self, value: f64) -> bool {
        value.is_finite() && (self.scale == AxisScale::Linear || value > 0.0)
    }
}

/// A polyline in data coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: Option<String>,
    pub points: Vec<(f64, f64)>,
    /// CSS colour
    pub color: String,
}

impl Series {
    pub fn new(points: Vec<(f64, f64)>, color: impl Into<String>) -> Self {
        Self {
            label: None,
            points,
            color: color.into(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Free text anchored at a data coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub rotation: Rotation,
}

/// One set of axes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Panel {
    pub title: Option<String>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub series: Vec<Series>,
    pub annotations: Vec<Annotation>,
}

impl Panel {
    pub fn new(x_axis: Axis, y_axis: Axis) -> Self {
        Self {
            x_axis,
            y_axis,
            ..Self::default()
        }
    }

    /// `(x_min, x_max, y_min, y_max)` covering fixed ranges, drawable points
    /// and annotations; never empty or inverted
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let points = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().copied())
            .chain(self.annotations.iter().map(|a| (a.x, a.y)));

        let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for (x, y) in points {
            if self.x_axis.accepts(x) && self.y_axis.accepts(y) {
                x_min = x_min.min(x);
                x_max = x_max.max(x);
                y_min = y_min.min(y);
                y_max = y_max.max(y);
            }
        }

        let (x_min, x_max) = self
            .x_axis
            .range
            .unwrap_or_else(|| widen(x_min, x_max, self.x_axis.scale));
        let (y_min, y_max) = self
            .y_axis
            .range
            .unwrap_or_else(|| widen(y_min, y_max, self.y_axis.scale));
        (x_min, x_max, y_min, y_max)
    }

    /// Points of a series that can be placed on these axes
    pub fn drawable_points<'a>(&'a self, series: &'a Series) -> impl Iterator<Item = (f64, f64)> + 'a {
        series
            .points
            .iter()
            .copied()
            .filter(move |&(x, y)| self.x_axis.accepts(x) && self.y_axis.accepts(y))
    }
}

/// Turn a possibly empty or zero-width interval into a drawable one
fn widen(min: f64, max: f64, scale: AxisScale) -> (f64, f64) {
    if !(min.is_finite() && max.is_finite()) {
        return match scale {
            AxisScale::Linear => (0.0, 1.0),
            AxisScale::Log => (1.0, 10.0),
        };
    }
    if max > min {
        return (min, max);
    }
    match scale {
        AxisScale::Linear => {
            let pad = if min == 0.0 { 1.0 } else { min.abs() * 0.1 };
            (min - pad, max + pad)
        }
        AxisScale::Log => (min / 10.0, max * 10.0),
    }
}

/// A figure of vertically stacked panels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub title: Option<String>,
    pub width: u32,
    pub height: u32,
    pub panels: Vec<Panel>,
}

impl Figure {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            title: None,
            width,
            height,
            panels: Vec::new(),
        }
    }

    pub fn from_config(config: &FigureConfig) -> Self {
        Self::new(config.width, config.height)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn push_panel(&mut self, panel: Panel) {
        self.panels.push(panel);
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render as an SVG document
    #[cfg(feature = "figures")]
    pub fn to_svg(&self) -> Result<String> {
        crate::render::figure_to_svg(self)
    }

    /// Persist the figure; the format follows the extension of `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        let format = OutputFormat::from_path(path)?;
        if !format.is_figure_format() {
            return Err(SeisvizError::UnsupportedFormat {
                path: path.display().to_string(),
            });
        }
        debug!(
            path = %path.display(),
            format = format.extension(),
            panels = self.panels.len(),
            "Saving figure"
        );

        match format {
            OutputFormat::Json => std::fs::write(path, self.to_json()?)?,
            _ => {
                format.ensure_available()?;
                self.save_rendered(path, format)?;
            }
        }

        info!(path = %path.display(), "Figure saved");
        Ok(())
    }

    #[cfg(feature = "figures")]
    fn save_rendered(&self, path: &Path, format: OutputFormat) -> Result<()> {
        crate::render::save_figure(self, path, format)
    }

    #[cfg(not(feature = "figures"))]
    fn save_rendered(&self, _path: &Path, format: OutputFormat) -> Result<()> {
        format.ensure_available()
    }

    /// Apply the persist/display contract. Returns the path written, if any.
    ///
    /// `display_format` is used for [`Presentation::Display`].
    pub fn present(
        &self,
        presentation: &Presentation,
        display_format: OutputFormat,
    ) -> Result<Option<PathBuf>> {
        match presentation {
            Presentation::Return => Ok(None),
            Presentation::Save(path) => {
                self.save(path)?;
                Ok(Some(path.clone()))
            }
            Presentation::Display => {
                let path = display_path(display_format);
                self.save(&path)?;
                announce_display(&path);
                Ok(Some(path))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_clock_ticks() {
        let origin = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let ticks = TickFormat::Clock { origin };
        assert_eq!(ticks.format(0.0), "12:30:00");
        assert_eq!(ticks.format(75.0), "12:31:15");
    }

    #[test]
    fn test_number_ticks() {
        assert_eq!(TickFormat::Number.format(3.0), "3");
        assert_eq!(TickFormat::Number.format(0.25), "0.25");
        assert_eq!(TickFormat::Number.format(1.5e-6), "1.5e-6");
    }

    #[test]
    fn test_rotation_from_degrees() {
        assert_eq!(Rotation::from_degrees(0.0).unwrap(), Rotation::None);
        assert_eq!(Rotation::from_degrees(90.0).unwrap(), Rotation::Deg90);
        assert_eq!(Rotation::from_degrees(-90.0).unwrap(), Rotation::Deg270);
        assert_eq!(Rotation::from_degrees(450.0).unwrap(), Rotation::Deg90);
        assert!(Rotation::from_degrees(45.0).is_err());
    }

    #[test]
    fn test_bounds_skip_non_positive_on_log_axis() {
        let mut panel = Panel::new(Axis::new("f").log(), Axis::new("p"));
        panel
            .series
            .push(Series::new(vec![(0.0, 5.0), (1.0, 2.0), (10.0, 3.0)], "#000000"));

        let (x_min, x_max, y_min, y_max) = panel.bounds();
        assert_eq!((x_min, x_max), (1.0, 10.0));
        assert_eq!((y_min, y_max), (2.0, 3.0));
        assert_eq!(panel.drawable_points(&panel.series[0]).count(), 2);
    }

    #[test]
    fn test_bounds_of_empty_panel() {
        let panel = Panel::new(Axis::new("x"), Axis::new("y"));
        assert_eq!(panel.bounds(), (0.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn test_fixed_range_wins() {
        let mut panel = Panel::new(Axis::new("x").with_range(-5.0, 5.0), Axis::new("y"));
        panel.series.push(Series::new(vec![(0.0, 1.0), (1.0, 1.0)], "#000000"));
        let (x_min, x_max, y_min, y_max) = panel.bounds();
        assert_eq!((x_min, x_max), (-5.0, 5.0));
        assert!(y_min < 1.0 && y_max > 1.0);
    }

    #[test]
    fn test_save_json_and_reject_html() {
        let dir = tempfile::tempdir().unwrap();
        let figure = Figure::new(100, 80).with_title("empty");

        let json_path = dir.path().join("figure.json");
        figure.save(&json_path).unwrap();
        assert!(json_path.exists());

        let result = figure.save(&dir.path().join("figure.html"));
        assert!(matches!(result, Err(SeisvizError::UnsupportedFormat { .. })));
    }
}
