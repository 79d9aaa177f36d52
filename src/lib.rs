//! # seisviz
//!
//! Visualization helpers for seismological data.
//!
//! This library turns in-memory stations, events, waveforms and time series
//! into maps and figures, and estimates power spectra for plotting.
//!
//! ## Key Features
//!
//! - **Station and event maps**: Leaflet HTML pages, static SVG/PNG, or a JSON
//!   scene; event catalogues can be layered onto one canvas
//! - **Depth colouring**: a seven-band red-to-green palette for hypocentre depth
//! - **Waveform figures**: stacked trace panels and distance-ordered record sections
//! - **Periodograms**: one-sided PSD estimates, optionally in decibels
//!
//! ## Architecture
//!
//! - **Model**: stations, events, traces and streams
//! - **Scenes**: [`MapCanvas`] and [`Figure`] describe what to draw
//! - **Rendering**: `plotters` draws scenes to SVG or PNG (`figures` feature)
//! - **Presentation**: every builder returns its scene and optionally saves or
//!   displays it, see [`Presentation`]

pub mod colors;
pub mod config;
pub mod error;
pub mod figure;
pub mod geodesy;
pub mod logging;
pub mod maps;
pub mod model;
pub mod output;
pub mod plots;
#[cfg(feature = "figures")]
pub mod render;
pub mod spectral;

pub use colors::{depth_band, depth_color};
pub use config::Config;
pub use error::{Result, SeisvizError};
pub use figure::Figure;
pub use logging::{init_tracing, log_error, log_operation_end, log_operation_start, log_timed_operation};
pub use maps::{plot_events, plot_stations, EventMapOptions, MapCanvas, StationMapOptions};
pub use model::{Event, Magnitude, Origin, Station, Stream, Trace, TraceStats};
pub use output::{OutputFormat, Presentation};
pub use plots::{
    plot_periodogram, plot_record_section, plot_traces, PeriodogramPlotOptions,
    RecordSectionOptions, TraceGridOptions,
};
pub use spectral::{periodogram, to_decibels, DecibelReference, Periodogram, PeriodogramOptions};

/// Validate `config`, start logging and verify the configured output formats
/// are compiled in.
///
/// Call once before plotting. A missing capability is reported as a
/// configuration error here rather than on the first save.
pub fn init(config: &Config) -> Result<()> {
    config.validate()?;
    init_tracing(&config.log_level);
    output::check_capabilities(config)?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log_level = %config.log_level,
        "seisviz initialised"
    );
    Ok(())
}
