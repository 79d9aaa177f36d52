//! Stacked waveform panels.

use std::time::Instant;
use tracing::debug;

use super::{display_format, series_color};
use crate::config::Config;
use crate::error::{Result, SeisvizError};
use crate::figure::{Axis, Figure, Panel, Rotation, Series, TickFormat};
use crate::logging::{log_error, log_operation_end, log_operation_start};
use crate::model::Trace;
use crate::output::Presentation;

/// Options for [`plot_traces`]
#[derive(Debug, Clone)]
pub struct TraceGridOptions {
    /// Rotation of the wall-clock tick labels
    pub tick_rotation: Rotation,
    pub presentation: Presentation,
    pub config: Config,
}

impl Default for TraceGridOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl TraceGridOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            tick_rotation: Rotation::Deg90,
            presentation: Presentation::Display,
            config: config.clone(),
        }
    }

    pub fn with_presentation(mut self, presentation: Presentation) -> Self {
        self.presentation = presentation;
        self
    }

    pub fn with_tick_rotation(mut self, rotation: Rotation) -> Self {
        self.tick_rotation = rotation;
        self
    }
}

/// One panel per trace, stacked top to bottom, with `%H:%M:%S` time ticks
pub fn plot_traces(traces: &[Trace], options: &TraceGridOptions) -> Result<Figure> {
    let start = Instant::now();
    log_operation_start("plot_traces", Some(&format!("{} traces", traces.len())));

    let result = build_trace_grid(traces, options);
    if let Err(ref e) = result {
        log_error(e, "plot_traces");
    }
    log_operation_end("plot_traces", start, result.is_ok());
    result
}

fn build_trace_grid(traces: &[Trace], options: &TraceGridOptions) -> Result<Figure> {
    if traces.is_empty() {
        return Err(SeisvizError::invalid_parameter(
            "traces",
            "at least one trace is required",
        ));
    }

    let mut figure = Figure::from_config(&options.config.figure);
    for (index, trace) in traces.iter().enumerate() {
        let x_axis = Axis::new("Time (UTC)")
            .with_ticks(TickFormat::Clock {
                origin: trace.stats.starttime,
            })
            .with_tick_rotation(options.tick_rotation);
        let mut panel = Panel::new(x_axis, Axis::new("Amplitude"));
        panel.title = Some(trace.id());

        let points = trace
            .times()
            .iter()
            .zip(trace.data.iter())
            .map(|(&t, &v)| (t, v))
            .collect();
        panel.series.push(Series::new(points, series_color(index)));

        debug!(trace = %trace.id(), npts = trace.npts(), "Trace panel added");
        figure.push_panel(panel);
    }

    figure.present(&options.presentation, display_format(&options.config))?;
    Ok(figure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TraceStats;
    use chrono::{TimeZone, Utc};
    use ndarray::Array1;

    fn trace(station: &str, npts: usize) -> Trace {
        let stats = TraceStats {
            network: "IU".to_string(),
            station: station.to_string(),
            location: "00".to_string(),
            channel: "BHZ".to_string(),
            starttime: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            sampling_rate: 20.0,
        };
        Trace::new(stats, Array1::from_iter((0..npts).map(|i| i as f64))).unwrap()
    }

    fn returning() -> TraceGridOptions {
        TraceGridOptions::default().with_presentation(Presentation::Return)
    }

    #[test]
    fn test_one_panel_per_trace() {
        let traces = vec![trace("ANMO", 10), trace("COLA", 5), trace("KONO", 3)];
        let figure = plot_traces(&traces, &returning()).unwrap();

        assert_eq!(figure.panels.len(), 3);
        assert_eq!(figure.panels[1].title.as_deref(), Some("IU.COLA.00.BHZ"));
        assert_eq!(figure.panels[0].series[0].points.len(), 10);
        assert_eq!(figure.panels[0].series[0].points[2], (0.1, 2.0));
    }

    #[test]
    fn test_clock_ticks_and_rotation() {
        let figure = plot_traces(&[trace("ANMO", 4)], &returning()).unwrap();
        let axis = &figure.panels[0].x_axis;

        assert_eq!(axis.tick_rotation, Rotation::Deg90);
        assert_eq!(axis.ticks.format(61.0), "00:01:01");
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let result = plot_traces(&[], &returning());
        assert!(matches!(
            result,
            Err(SeisvizError::InvalidParameter { .. })
        ));
    }
}
