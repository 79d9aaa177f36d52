//! Seismic events: origins and magnitudes.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SeisvizError};

/// A hypothesised source location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Origin {
    pub latitude: f64,
    pub longitude: f64,
    /// Depth in metres, if known
    #[serde(default)]
    pub depth: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Magnitude {
    pub mag: f64,
    #[serde(default)]
    pub magnitude_type: Option<String>,
}

/// An origin together with the magnitude estimated for it
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedMagnitude<'a> {
    pub origin: &'a Origin,
    pub magnitude: &'a Magnitude,
}

/// A catalogue event.
///
/// `origins[i]` and `magnitudes[i]` describe the same solution; use
/// [`Event::located_magnitudes`] rather than zipping them by hand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub origins: Vec<Origin>,
    #[serde(default)]
    pub magnitudes: Vec<Magnitude>,
}

impl Event {
    /// An event with a single origin/magnitude solution
    pub fn new(origin: Origin, magnitude: Magnitude) -> Self {
        Self {
            origins: vec![origin],
            magnitudes: vec![magnitude],
        }
    }

    /// Pair origins with magnitudes by index.
    ///
    /// Fails with [`SeisvizError::MismatchedEvent`] when the two lists differ
    /// in length.
    pub fn located_magnitudes(&self) -> Result<Vec<LocatedMagnitude<'_>>> {
        if self.origins.len() != self.magnitudes.len() {
            return Err(SeisvizError::MismatchedEvent {
                origins: self.origins.len(),
                magnitudes: self.magnitudes.len(),
            });
        }

        Ok(self
            .origins
            .iter()
            .zip(self.magnitudes.iter())
            .map(|(origin, magnitude)| LocatedMagnitude { origin, magnitude })
            .collect())
    }

    /// The first (preferred) solution, if any
    pub fn preferred(&self) -> Result<Option<LocatedMagnitude<'_>>> {
        Ok(self.located_magnitudes()?.into_iter().next())
    }
}
