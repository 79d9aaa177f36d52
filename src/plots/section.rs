//! Record sections: waveforms laid out by their distance from a source.

use std::time::Instant;
use tracing::{debug, warn};

use super::{display_format, series_color};
use crate::config::Config;
use crate::error::Result;
use crate::figure::{Annotation, Axis, Figure, Panel, Rotation, Series};
use crate::geodesy::distance_azimuth;
use crate::logging::{log_error, log_operation_end, log_operation_start};
use crate::model::{Station, Stream, Trace, TraceCoordinates};
use crate::output::Presentation;

/// Options for [`plot_record_section`]
#[derive(Debug, Clone)]
pub struct RecordSectionOptions {
    /// Peak trace amplitude as a multiple of the mean station spacing
    pub scale: f64,
    /// Label heights above the latest sample, as fractions of the time span
    pub label_offsets: [f64; 2],
    pub label_rotation: Rotation,
    pub presentation: Presentation,
    pub config: Config,
}

impl Default for RecordSectionOptions {
    fn default() -> Self {
        let config = Config::default();
        Self {
            scale: config.record_section.scale,
            label_offsets: config.record_section.label_offsets,
            label_rotation: Rotation::Deg90,
            presentation: Presentation::Display,
            config,
        }
    }
}

impl RecordSectionOptions {
    /// Layout seeded from `config.record_section`; fails on a rotation that
    /// is not a quarter turn
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            scale: config.record_section.scale,
            label_offsets: config.record_section.label_offsets,
            label_rotation: Rotation::from_degrees(config.record_section.label_rotation)?,
            presentation: Presentation::Display,
            config: config.clone(),
        })
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_presentation(mut self, presentation: Presentation) -> Self {
        self.presentation = presentation;
        self
    }
}

/// A station label of a record section
#[derive(Debug, Clone, PartialEq)]
pub struct SectionLabel {
    pub distance_km: f64,
    pub station: String,
}

/// `(distance, station)` of every located trace, nearest first.
///
/// Several channels of one station produce a single label.
pub fn section_labels(stream: &Stream) -> Vec<SectionLabel> {
    let mut labels: Vec<SectionLabel> = stream
        .iter()
        .filter_map(|trace| {
            trace.coordinates.map(|coords| SectionLabel {
                distance_km: coords.distance / 1000.0,
                station: trace.stats.station.clone(),
            })
        })
        .collect();

    labels.sort_by(|a, b| {
        a.distance_km
            .total_cmp(&b.distance_km)
            .then_with(|| a.station.cmp(&b.station))
    });
    labels.dedup();
    labels
}

/// Draw the traces of `stream` that belong to `stations` at their distance
/// from `source` `(latitude, longitude)`.
///
/// Returns `Ok(None)` with a warning when either input is empty or fewer than
/// two traces can be located; that is not an error.
pub fn plot_record_section(
    stream: &Stream,
    stations: &[Station],
    source: (f64, f64),
    options: &RecordSectionOptions,
) -> Result<Option<Figure>> {
    let start = Instant::now();
    log_operation_start(
        "plot_record_section",
        Some(&format!(
            "{} traces, {} stations",
            stream.len(),
            stations.len()
        )),
    );

    let result = build_record_section(stream, stations, source, options);
    if let Err(ref e) = result {
        log_error(e, "plot_record_section");
    }
    log_operation_end("plot_record_section", start, result.is_ok());
    result
}

fn build_record_section(
    stream: &Stream,
    stations: &[Station],
    source: (f64, f64),
    options: &RecordSectionOptions,
) -> Result<Option<Figure>> {
    if stream.is_empty() || stations.is_empty() {
        warn!(
            traces = stream.len(),
            stations = stations.len(),
            "Record section needs traces and stations; nothing plotted"
        );
        return Ok(None);
    }

    let mut located = locate_traces(stream, stations, source)?;
    if located.len() < 2 {
        warn!(
            located = located.len(),
            "Record section needs at least two traces with station coordinates; nothing plotted"
        );
        return Ok(None);
    }

    located.align_to_earliest_start();

    let figure = draw_section(&located, source, options);
    figure.present(&options.presentation, display_format(&options.config))?;
    Ok(Some(figure))
}

/// Copies of the traces with a known station, annotated with coordinates and
/// source distance
fn locate_traces(stream: &Stream, stations: &[Station], source: (f64, f64)) -> Result<Stream> {
    let mut located = Vec::new();
    for trace in stream.iter() {
        let Some(station) = stations
            .iter()
            .find(|s| s.matches(&trace.stats.network, &trace.stats.station))
        else {
            debug!(trace = %trace.id(), "No station coordinates, skipping trace");
            continue;
        };

        let geodesic = distance_azimuth(
            station.latitude,
            station.longitude,
            source.0,
            source.1,
        )?;
        let mut trace = trace.clone();
        trace.coordinates = Some(TraceCoordinates {
            latitude: station.latitude,
            longitude: station.longitude,
            distance: geodesic.distance,
        });
        located.push(trace);
    }
    Ok(Stream::new(located))
}

fn trace_distance_km(trace: &Trace) -> f64 {
    trace.coordinates.map(|c| c.distance / 1000.0).unwrap_or(0.0)
}

fn draw_section(stream: &Stream, source: (f64, f64), options: &RecordSectionOptions) -> Figure {
    let distances: Vec<f64> = stream.iter().map(trace_distance_km).collect();
    let min_km = distances.iter().copied().fold(f64::INFINITY, f64::min);
    let max_km = distances.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mut spacing = (max_km - min_km) / stream.len() as f64;
    if !(spacing.is_finite() && spacing > 0.0) {
        spacing = 1.0;
    }
    let amplitude = options.scale * spacing;

    let mut panel = Panel::new(Axis::new("Distance (km)"), Axis::new("Time (s)"));
    let mut time_span = 0.0_f64;
    for (index, (trace, &distance_km)) in stream.iter().zip(&distances).enumerate() {
        let peak = trace.max_abs();
        let gain = if peak > 0.0 { amplitude / peak } else { 0.0 };
        time_span = time_span.max(trace.duration_secs());

        let points = trace
            .times()
            .iter()
            .zip(trace.data.iter())
            .map(|(&t, &v)| (distance_km + v * gain, t))
            .collect();
        panel
            .series
            .push(Series::new(points, series_color(index)));
    }

    if time_span <= 0.0 {
        time_span = 1.0;
    }
    for (position, label) in section_labels(stream).into_iter().enumerate() {
        let offset = options.label_offsets[position % 2];
        panel.annotations.push(Annotation {
            text: label.station,
            x: label.distance_km,
            y: time_span * (1.0 + offset),
            rotation: options.label_rotation,
        });
    }

    debug!(
        traces = stream.len(),
        min_km = min_km,
        max_km = max_km,
        spacing_km = spacing,
        "Record section laid out"
    );

    let mut figure = Figure::from_config(&options.config.figure).with_title(format!(
        "Record section, source ({}, {})",
        source.0, source.1
    ));
    figure.push_panel(panel);
    figure
}
