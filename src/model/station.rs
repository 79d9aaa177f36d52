//! Seismic station records.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SeisvizError};

/// A recording station. Identity is the `(network, station)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub network: String,
    pub station: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Elevation in metres
    pub elevation: f64,
}

impl Station {
    pub fn new(
        network: impl Into<String>,
        station: impl Into<String>,
        latitude: f64,
        longitude: f64,
        elevation: f64,
    ) -> Self {
        Self {
            network: network.into(),
            station: station.into(),
            latitude,
            longitude,
            elevation,
        }
    }

    /// Whether this station is the one identified by `network`/`station`
    pub fn matches(&self, network: &str, station: &str) -> bool {
        self.network == network && self.station == station
    }

    /// `NET.STA`
    pub fn code(&self) -> String {
        format!("{}.{}", self.network, self.station)
    }

    /// Map tooltip: `NET.STA (lat, lon) elev m`
    pub fn tooltip(&self) -> String {
        format!(
            "{} ({}, {}) {} m",
            self.code(),
            self.latitude,
            self.longitude,
            self.elevation
        )
    }

    /// Reject coordinates no map can place
    pub fn validate(&self) -> Result<()> {
        validate_coordinates(self.latitude, self.longitude)
            .map_err(|message| SeisvizError::InvalidCoordinates {
                message: format!("station {}: {}", self.code(), message),
            })
    }
}

/// Latitude must lie in [-90, 90]; both values must be finite
pub(crate) fn validate_coordinates(
    latitude: f64,
    longitude: f64,
) -> std::result::Result<(), String> {
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err(format!(
            "non-finite coordinates ({}, {})",
            latitude, longitude
        ));
    }
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(format!("latitude {} outside [-90, 90]", latitude));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tooltip_format() {
        let sta = Station::new("IU", "ANMO", 34.9459, -106.4572, 1850.0);
        assert_eq!(sta.tooltip(), "IU.ANMO (34.9459, -106.4572) 1850 m");
    }

    #[test]
    fn test_matches_identity() {
        let sta = Station::new("IU", "ANMO", 34.9, -106.4, 1850.0);
        assert!(sta.matches("IU", "ANMO"));
        assert!(!sta.matches("II", "ANMO"));
        assert!(!sta.matches("IU", "COLA"));
    }

    #[test]
    fn test_validate() {
        assert!(Station::new("XX", "A", 45.0, 370.0, 0.0).validate().is_ok());
        assert!(Station::new("XX", "A", 91.0, 0.0, 0.0).validate().is_err());
        assert!(Station::new("XX", "A", f64::NAN, 0.0, 0.0)
            .validate()
            .is_err());
    }
}
