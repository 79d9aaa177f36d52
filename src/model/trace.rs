//! Waveform traces and streams.

use chrono::{DateTime, Duration, Utc};
use ndarray::{s, Array1};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SeisvizError};

/// Header information of a trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceStats {
    pub network: String,
    pub station: String,
    #[serde(default)]
    pub location: String,
    pub channel: String,
    pub starttime: DateTime<Utc>,
    /// Samples per second
    pub sampling_rate: f64,
}

/// Station position and source distance attached while plotting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceCoordinates {
    pub latitude: f64,
    pub longitude: f64,
    /// Great-circle distance to the source in metres
    pub distance: f64,
}

/// A uniformly sampled waveform
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub stats: TraceStats,
    pub data: Array1<f64>,
    pub coordinates: Option<TraceCoordinates>,
}

/// Signed seconds from `from` to `to`
pub fn seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let delta = to - from;
    delta.num_seconds() as f64 + delta.subsec_nanos() as f64 * 1e-9
}

fn seconds_to_duration(seconds: f64) -> Duration {
    Duration::microseconds((seconds * 1e6).round() as i64)
}

impl Trace {
    pub fn new(stats: TraceStats, data: Array1<f64>) -> Result<Self> {
        if !(stats.sampling_rate.is_finite() && stats.sampling_rate > 0.0) {
            return Err(SeisvizError::invalid_parameter(
                "sampling_rate",
                format!(
                    "sampling rate must be positive, got {}",
                    stats.sampling_rate
                ),
            ));
        }
        Ok(Self {
            stats,
            data,
            coordinates: None,
        })
    }

    /// `NET.STA.LOC.CHA`
    pub fn id(&self) -> String {
        format!(
            "{}.{}.{}.{}",
            self.stats.network, self.stats.station, self.stats.location, self.stats.channel
        )
    }

    pub fn npts(&self) -> usize {
        self.data.len()
    }

    /// Sample interval in seconds
    pub fn delta(&self) -> f64 {
        1.0 / self.stats.sampling_rate
    }

    /// Seconds between the first and the last sample
    pub fn duration_secs(&self) -> f64 {
        self.npts().saturating_sub(1) as f64 * self.delta()
    }

    /// Time of the last sample
    pub fn endtime(&self) -> DateTime<Utc> {
        self.stats.starttime + seconds_to_duration(self.duration_secs())
    }

    /// Sample times in seconds relative to `starttime`
    pub fn times(&self) -> Array1<f64> {
        let delta = self.delta();
        Array1::from_iter((0..self.npts()).map(|i| i as f64 * delta))
    }

    /// Largest absolute sample value (0 for an empty trace)
    pub fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
    }

    /// Insert `before` zeros at the front and `after` zeros at the back.
    ///
    /// The start time moves back by `before` samples.
    pub fn pad(&mut self, before: usize, after: usize) {
        if before == 0 && after == 0 {
            return;
        }

        let npts = self.npts();
        let mut padded = Array1::<f64>::zeros(before + npts + after);
        padded
            .slice_mut(s![before..before + npts])
            .assign(&self.data);

        self.stats.starttime =
            self.stats.starttime - seconds_to_duration(before as f64 * self.delta());
        self.data = padded;
    }
}

/// An ordered collection of traces
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stream {
    pub traces: Vec<Trace>,
}

impl Stream {
    pub fn new(traces: Vec<Trace>) -> Self {
        Self { traces }
    }

    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Trace> {
        self.traces.iter()
    }

    pub fn earliest_start(&self) -> Option<DateTime<Utc>> {
        self.traces.iter().map(|tr| tr.stats.starttime).min()
    }

    pub fn latest_end(&self) -> Option<DateTime<Utc>> {
        self.traces.iter().map(|tr| tr.endtime()).max()
    }

    /// Zero-pad every trace so all of them start at the earliest start time
    /// and run to the latest end time.
    ///
    /// Returns the common start time, or `None` for an empty stream.
    pub fn align_to_earliest_start(&mut self) -> Option<DateTime<Utc>> {
        let start = self.earliest_start()?;
        let end = self.latest_end()?;

        for trace in &mut self.traces {
            let sr = trace.stats.sampling_rate;
            let lead = seconds_between(start, trace.stats.starttime);
            let before = (lead * sr).round().max(0.0) as usize;
            let tail = seconds_between(trace.endtime(), end);
            let after = (tail * sr).round().max(0.0) as usize;

            trace.pad(before, after);
            trace.stats.starttime = start;

            debug!(
                trace = %trace.id(),
                padded_before = before,
                padded_after = after,
                "Aligned trace to common start"
            );
        }

        Some(start)
    }
}

impl IntoIterator for Stream {
    type Item = Trace;
    type IntoIter = std::vec::IntoIter<Trace>;

    fn into_iter(self) -> Self::IntoIter {
        self.traces.into_iter()
    }
}

impl FromIterator<Trace> for Stream {
    fn from_iter<I: IntoIterator<Item = Trace>>(iter: I) -> Self {
        Self {
            traces: iter.into_iter().collect(),
        }
    }
}
