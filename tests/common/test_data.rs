//! Test data generation utilities.
//!
//! Small synthetic networks, catalogues and waveforms with known geometry,
//! so distances and orderings in the plots can be predicted.

use chrono::{DateTime, Duration, TimeZone, Utc};
use ndarray::Array1;
use std::f64::consts::PI;

use seisviz::{Event, Magnitude, Origin, Station, Stream, Trace, TraceStats};

/// Reference time all synthetic traces are offset from
pub fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, 2, 23, 58, 11).unwrap()
}

/// Stations on the equator at 1°, 2°, 4° and 8° east of the origin,
/// listed out of distance order
pub fn equator_stations() -> Vec<Station> {
    vec![
        Station::new("SY", "EQ04", 0.0, 4.0, 120.0),
        Station::new("SY", "EQ01", 0.0, 1.0, 15.0),
        Station::new("SY", "EQ08", 0.0, 8.0, 300.0),
        Station::new("SY", "EQ02", 0.0, 2.0, 40.0),
    ]
}

/// A few real broadband stations
pub fn global_stations() -> Vec<Station> {
    vec![
        Station::new("IU", "ANMO", 34.9459, -106.4572, 1850.0),
        Station::new("IU", "COLA", 64.8736, -147.8616, 200.0),
        Station::new("II", "BFO", 48.3311, 8.3303, 589.0),
    ]
}

/// A single-solution event
pub fn event(latitude: f64, longitude: f64, depth: Option<f64>, mag: f64) -> Event {
    Event::new(
        Origin {
            latitude,
            longitude,
            depth,
        },
        Magnitude {
            mag,
            magnitude_type: Some("Mw".to_string()),
        },
    )
}

/// A catalogue spanning every depth band
pub fn depth_catalogue() -> Vec<Event> {
    vec![
        event(38.3, 142.4, Some(29000.0), 9.1),
        event(35.7, 139.7, Some(15000.0), 6.2),
        event(36.1, 140.1, Some(5000.0), 5.4),
        event(34.9, 138.2, Some(800.0), 4.0),
        event(35.2, 139.0, None, 3.1),
    ]
}

/// A decaying sine with an onset `delay_secs` after the reference time
pub fn wavelet_trace(
    network: &str,
    station: &str,
    delay_secs: i64,
    npts: usize,
    sampling_rate: f64,
) -> Trace {
    let stats = TraceStats {
        network: network.to_string(),
        station: station.to_string(),
        location: "00".to_string(),
        channel: "BHZ".to_string(),
        starttime: reference_time() + Duration::seconds(delay_secs),
        sampling_rate,
    };
    let data = Array1::from_iter((0..npts).map(|i| {
        let t = i as f64 / sampling_rate;
        (-t / 5.0).exp() * (2.0 * PI * 0.5 * t).sin()
    }));
    Trace::new(stats, data).unwrap()
}

/// One trace per equator station, later onsets further away
pub fn equator_stream() -> Stream {
    equator_stations()
        .iter()
        .map(|s| {
            let delay = s.longitude as i64 * 10;
            wavelet_trace(&s.network, &s.station, delay, 200, 4.0)
        })
        .collect()
}

/// `n` samples of `offset + sin(2π f t)` at `fs` Hz
pub fn sine(frequency: f64, fs: f64, n: usize, offset: f64) -> Array1<f64> {
    Array1::from_iter((0..n).map(|i| offset + (2.0 * PI * frequency * i as f64 / fs).sin()))
}
