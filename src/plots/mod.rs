//! Figure builders for waveforms and spectra.
//!
//! Each builder returns a [`Figure`] scene and applies the
//! [`Presentation`](crate::output::Presentation) contract before returning.

mod periodogram;
mod section;
mod traces;

pub use periodogram::{plot_periodogram, PeriodogramPlotOptions};
pub use section::{plot_record_section, section_labels, RecordSectionOptions, SectionLabel};
pub use traces::{plot_traces, TraceGridOptions};

use crate::config::Config;
use crate::output::OutputFormat;

/// Line colours cycled across series
pub(crate) const SERIES_COLORS: [&str; 6] = [
    "#1f77b4", "#d62728", "#2ca02c", "#9467bd", "#ff7f0e", "#17becf",
];

pub(crate) fn series_color(index: usize) -> &'static str {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

/// Format used when a figure is displayed rather than saved
pub(crate) fn display_format(config: &Config) -> OutputFormat {
    OutputFormat::from_extension(&config.figure.default_extension)
        .filter(|format| format.is_figure_format())
        .unwrap_or(OutputFormat::Svg)
}
