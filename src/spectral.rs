//! Periodogram power spectral density estimation.
//!
//! One-sided, density-scaled estimates (signal² / Hz) computed with `rustfft`,
//! after optional detrending and windowing.

use ndarray::{Array1, ArrayView1};
use rustfft::num_complex::Complex64;
use rustfft::FftPlanner;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::str::FromStr;
use tracing::debug;

use crate::config::Config;
use crate::error::{Result, SeisvizError};

/// Taper applied before the transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Window {
    /// Rectangular, i.e. no taper
    #[default]
    Boxcar,
    /// Periodic Hann window
    Hann,
}

impl Window {
    /// Window coefficients for `size` samples
    pub fn coefficients(&self, size: usize) -> Array1<f64> {
        match self {
            Window::Boxcar => Array1::ones(size),
            Window::Hann => Array1::from_iter(
                (0..size).map(|i| 0.5 * (1.0 - (2.0 * PI * i as f64 / size as f64).cos())),
            ),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Window::Boxcar => "boxcar",
            Window::Hann => "hann",
        }
    }
}

impl FromStr for Window {
    type Err = SeisvizError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "boxcar" | "rectangular" | "none" => Ok(Window::Boxcar),
            "hann" | "hanning" => Ok(Window::Hann),
            _ => Err(SeisvizError::invalid_parameter(
                "window",
                format!("Unknown window: {}. Must be one of: boxcar, hann", s),
            )),
        }
    }
}

/// Trend removed before the transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Detrend {
    /// Subtract the mean
    #[default]
    Constant,
    /// Subtract the least-squares line
    Linear,
    None,
}

impl Detrend {
    pub fn apply(&self, data: ArrayView1<f64>) -> Array1<f64> {
        match self {
            Detrend::None => data.to_owned(),
            Detrend::Constant => {
                let mean = data.mean().unwrap_or(0.0);
                data.mapv(|v| v - mean)
            }
            Detrend::Linear => {
                let n = data.len();
                if n < 2 {
                    return Detrend::Constant.apply(data);
                }
                let x_mean = (n - 1) as f64 / 2.0;
                let y_mean = data.mean().unwrap_or(0.0);
                let (mut sxy, mut sxx) = (0.0, 0.0);
                for (i, &y) in data.iter().enumerate() {
                    let dx = i as f64 - x_mean;
                    sxy += dx * (y - y_mean);
                    sxx += dx * dx;
                }
                let slope = sxy / sxx;
                Array1::from_iter(
                    data.iter()
                        .enumerate()
                        .map(|(i, &y)| y - (y_mean + slope * (i as f64 - x_mean))),
                )
            }
        }
    }
}

impl FromStr for Detrend {
    type Err = SeisvizError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "constant" | "mean" => Ok(Detrend::Constant),
            "linear" => Ok(Detrend::Linear),
            "none" | "false" => Ok(Detrend::None),
            _ => Err(SeisvizError::invalid_parameter(
                "detrend",
                format!(
                    "Unknown detrend: {}. Must be one of: constant, linear, none",
                    s
                ),
            )),
        }
    }
}

/// Options for [`periodogram`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PeriodogramOptions {
    pub window: Window,
    pub detrend: Detrend,
}

impl PeriodogramOptions {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            window: config.periodogram.window.parse()?,
            detrend: config.periodogram.detrend.parse()?,
        })
    }
}

/// Frequencies (Hz) and the power estimated at each
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Periodogram {
    pub frequencies: Vec<f64>,
    pub power: Vec<f64>,
}

impl Periodogram {
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

/// One-sided, density-scaled periodogram of `data` sampled at `fs` Hz.
///
/// Bins are `k * fs / n` for `k = 0..=n/2`. Every bin except DC and (for even
/// `n`) Nyquist is doubled to fold in the negative frequencies.
pub fn periodogram(
    data: ArrayView1<f64>,
    fs: f64,
    options: &PeriodogramOptions,
) -> Result<Periodogram> {
    let n = data.len();
    if n == 0 {
        return Err(SeisvizError::invalid_parameter(
            "data",
            "cannot estimate the spectrum of an empty series",
        ));
    }
    if !(fs.is_finite() && fs > 0.0) {
        return Err(SeisvizError::invalid_parameter(
            "fs",
            format!("sampling frequency must be positive, got {}", fs),
        ));
    }

    let detrended = options.detrend.apply(data);
    let window = options.window.coefficients(n);
    let window_power: f64 = window.iter().map(|w| w * w).sum();

    let mut buffer: Vec<Complex64> = detrended
        .iter()
        .zip(window.iter())
        .map(|(&x, &w)| Complex64::new(x * w, 0.0))
        .collect();

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut buffer);

    let scale = 1.0 / (fs * window_power);
    let bins = n / 2 + 1;
    let mut power: Vec<f64> = buffer[..bins]
        .iter()
        .map(|c| c.norm_sqr() * scale)
        .collect();

    let last_doubled = if n % 2 == 0 { bins - 1 } else { bins };
    for p in power.iter_mut().take(last_doubled).skip(1) {
        *p *= 2.0;
    }

    let frequencies = (0..bins).map(|k| k as f64 * fs / n as f64).collect();

    debug!(
        samples = n,
        fs = fs,
        bins = bins,
        window = options.window.name(),
        "Periodogram estimated"
    );

    Ok(Periodogram { frequencies, power })
}

/// Which power value maps to 0 dB
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DecibelReference {
    /// The zero-frequency bin
    #[default]
    FirstBin,
    /// A specific bin
    Bin(usize),
    /// The largest power in the estimate
    Max,
    /// A fixed power value
    Absolute(f64),
}

/// Bin-based references this far below the peak are rounding residue, e.g.
/// the DC bin after constant detrending.
pub const MIN_REFERENCE_RATIO: f64 = 1e-12;

/// Rescale every bin to `10 * log10(power / reference)`.
///
/// The reference must be a positive, finite power; anything else is an
/// [`SeisvizError::InvalidParameter`]. A [`DecibelReference::FirstBin`] or
/// [`DecibelReference::Bin`] reference must also be at least
/// [`MIN_REFERENCE_RATIO`] of the largest bin, otherwise the detrended DC
/// residue would push every bin to around +300 dB. Use
/// [`DecibelReference::Max`] for detrended data. Bins with zero power become
/// negative infinity.
pub fn to_decibels(estimate: &Periodogram, reference: DecibelReference) -> Result<Periodogram> {
    let ref_power = match reference {
        DecibelReference::FirstBin => estimate.power.first().copied(),
        DecibelReference::Bin(i) => estimate.power.get(i).copied(),
        DecibelReference::Max => estimate
            .power
            .iter()
            .copied()
            .filter(|p| p.is_finite())
            .reduce(f64::max),
        DecibelReference::Absolute(p) => Some(p),
    };

    let ref_power = match ref_power {
        Some(p) if p.is_finite() && p > 0.0 => p,
        Some(p) => {
            return Err(SeisvizError::invalid_parameter(
                "reference",
                format!(
                    "decibel reference power must be positive and finite, got {}",
                    p
                ),
            ))
        }
        None => {
            return Err(SeisvizError::invalid_parameter(
                "reference",
                format!("no reference bin {:?} in a {}-bin estimate", reference, estimate.len()),
            ))
        }
    };

    if matches!(reference, DecibelReference::FirstBin | DecibelReference::Bin(_)) {
        let peak = estimate
            .power
            .iter()
            .copied()
            .filter(|p| p.is_finite())
            .fold(0.0, f64::max);
        if ref_power < peak * MIN_REFERENCE_RATIO {
            return Err(SeisvizError::invalid_parameter(
                "reference",
                format!(
                    "reference bin {:?} holds only residual power ({:e} against a peak of {:e}); \
                     use DecibelReference::Max for detrended data",
                    reference, ref_power, peak
                ),
            ));
        }
    }

    Ok(Periodogram {
        frequencies: estimate.frequencies.clone(),
        power: estimate
            .power
            .iter()
            .map(|&p| 10.0 * (p / ref_power).log10())
            .collect(),
    })
}
