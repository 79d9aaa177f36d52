//! Power spectral density plots.

use ndarray::ArrayView1;
use std::time::Instant;

use super::display_format;
use crate::config::Config;
use crate::error::Result;
use crate::figure::{Axis, Figure, Panel, Series};
use crate::logging::{log_error, log_operation_end, log_operation_start};
use crate::output::Presentation;
use crate::spectral::{periodogram, to_decibels, DecibelReference, Periodogram, PeriodogramOptions};

/// Options for [`plot_periodogram`]
#[derive(Debug, Clone)]
pub struct PeriodogramPlotOptions {
    pub estimate: PeriodogramOptions,
    /// Convert to decibels relative to this reference
    pub decibel: Option<DecibelReference>,
    /// Semilog-x instead of linear axes
    pub log_frequency: bool,
    pub presentation: Presentation,
    pub config: Config,
}

impl Default for PeriodogramPlotOptions {
    fn default() -> Self {
        Self {
            estimate: PeriodogramOptions::default(),
            decibel: None,
            log_frequency: false,
            presentation: Presentation::Display,
            config: Config::default(),
        }
    }
}

impl PeriodogramPlotOptions {
    /// Window and detrend taken from `config.periodogram`
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            estimate: PeriodogramOptions::from_config(config)?,
            config: config.clone(),
            ..Self::default()
        })
    }

    pub fn with_decibel(mut self, reference: DecibelReference) -> Self {
        self.decibel = Some(reference);
        self
    }

    pub fn with_log_frequency(mut self, log_frequency: bool) -> Self {
        self.log_frequency = log_frequency;
        self
    }

    pub fn with_presentation(mut self, presentation: Presentation) -> Self {
        self.presentation = presentation;
        self
    }
}

/// Estimate the spectrum of `data` sampled at `fs` Hz and plot it.
///
/// The returned periodogram holds exactly the plotted values: decibels when
/// a reference is set, the raw estimate otherwise.
pub fn plot_periodogram(
    data: ArrayView1<f64>,
    fs: f64,
    options: &PeriodogramPlotOptions,
) -> Result<(Periodogram, Figure)> {
    let start = Instant::now();
    log_operation_start(
        "plot_periodogram",
        Some(&format!("{} samples at {} Hz", data.len(), fs)),
    );

    let result = build_periodogram_plot(data, fs, options);
    if let Err(ref e) = result {
        log_error(e, "plot_periodogram");
    }
    log_operation_end("plot_periodogram", start, result.is_ok());
    result
}

fn build_periodogram_plot(
    data: ArrayView1<f64>,
    fs: f64,
    options: &PeriodogramPlotOptions,
) -> Result<(Periodogram, Figure)> {
    let mut estimate = periodogram(data, fs, &options.estimate)?;
    let y_label = match options.decibel {
        Some(reference) => {
            estimate = to_decibels(&estimate, reference)?;
            "Power (dB)"
        }
        None => "Power",
    };

    let x_axis = if options.log_frequency {
        Axis::new("Frequency (Hz)").log()
    } else {
        Axis::new("Frequency (Hz)")
    };
    let mut panel = Panel::new(x_axis, Axis::new(y_label));
    let points = estimate
        .frequencies
        .iter()
        .copied()
        .zip(estimate.power.iter().copied())
        .collect();
    panel.series.push(Series::new(points, super::series_color(0)));

    let mut figure = Figure::from_config(&options.config.figure);
    figure.push_panel(panel);
    figure.present(&options.presentation, display_format(&options.config))?;

    Ok((estimate, figure))
}
