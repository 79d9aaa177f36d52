//! Geographic utility functions.
//!
//! Source-to-station distances are computed on the WGS84 ellipsoid with the
//! `geo` crate's geodesic (Karney) solver.

use geo::{GeodesicBearing, Point};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SeisvizError};
use crate::model::station::validate_coordinates;

/// Distance and azimuths between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceAzimuth {
    /// Ellipsoidal distance in metres
    pub distance: f64,
    /// Azimuth from the first point to the second, degrees in [0, 360)
    pub azimuth: f64,
    /// Azimuth from the second point back to the first, degrees in [0, 360)
    pub back_azimuth: f64,
}

/// Geodesic distance and azimuths between `(lat1, lon1)` and `(lat2, lon2)`
pub fn distance_azimuth(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Result<DistanceAzimuth> {
    for (lat, lon) in [(lat1, lon1), (lat2, lon2)] {
        validate_coordinates(lat, lon)
            .map_err(|message| SeisvizError::InvalidCoordinates { message })?;
    }

    let p1 = Point::new(lon1, lat1);
    let p2 = Point::new(lon2, lat2);

    let (bearing, distance) = p1.geodesic_bearing_distance(p2);
    let back_bearing = p2.geodesic_bearing(p1);

    Ok(DistanceAzimuth {
        distance,
        azimuth: normalize_azimuth(bearing),
        back_azimuth: normalize_azimuth(back_bearing),
    })
}

/// Distance in metres only
pub fn distance_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Result<f64> {
    Ok(distance_azimuth(lat1, lon1, lat2, lon2)?.distance)
}

/// Normalize a longitude value to the range [-180, 180)
pub fn normalize_longitude(lon: f64) -> f64 {
    let mut normalized = ((lon + 180.0) % 360.0 + 360.0) % 360.0 - 180.0;

    // Exactly 180.0 folds onto -180.0
    if normalized == 180.0 {
        normalized = -180.0;
    }

    normalized
}

/// Fold a bearing into [0, 360)
fn normalize_azimuth(bearing: f64) -> f64 {
    let az = bearing.rem_euclid(360.0);
    if az >= 360.0 {
        0.0
    } else {
        az
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_longitude() {
        assert_eq!(normalize_longitude(0.0), 0.0);
        assert_eq!(normalize_longitude(180.0), -180.0);
        assert_eq!(normalize_longitude(-180.0), -180.0);
        assert_eq!(normalize_longitude(190.0), -170.0);
        assert_eq!(normalize_longitude(-190.0), 170.0);
        assert_eq!(normalize_longitude(370.0), 10.0);
        assert_eq!(normalize_longitude(-370.0), -10.0);
    }

    #[test]
    fn test_one_degree_along_equator() {
        let result = distance_azimuth(0.0, 0.0, 0.0, 1.0).unwrap();
        // WGS84 equatorial degree
        assert!((result.distance - 111_319.49).abs() < 1.0);
        assert!((result.azimuth - 90.0).abs() < 1e-6);
        assert!((result.back_azimuth - 270.0).abs() < 1e-6);
    }

    #[test]
    fn test_due_north() {
        let result = distance_azimuth(10.0, 20.0, 11.0, 20.0).unwrap();
        assert!(result.azimuth.abs() < 1e-6 || (result.azimuth - 360.0).abs() < 1e-6);
        assert!((result.back_azimuth - 180.0).abs() < 1e-6);
        assert!(result.distance > 110_000.0 && result.distance < 112_000.0);
    }

    #[test]
    fn test_same_point() {
        assert!(distance_m(45.0, 7.0, 45.0, 7.0).unwrap().abs() < 1e-6);
    }

    #[test]
    fn test_invalid_latitude() {
        assert!(distance_azimuth(95.0, 0.0, 0.0, 0.0).is_err());
        assert!(distance_azimuth(0.0, f64::INFINITY, 0.0, 0.0).is_err());
    }

    #[test]
    fn test_normalize_azimuth() {
        assert_eq!(normalize_azimuth(-90.0), 270.0);
        assert_eq!(normalize_azimuth(180.0), 180.0);
        assert_eq!(normalize_azimuth(360.0), 0.0);
    }
}
