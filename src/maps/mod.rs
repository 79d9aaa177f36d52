//! Station and event maps.
//!
//! Maps are built as a [`MapCanvas`] scene that can be written as an
//! interactive Leaflet page, a JSON dump, or a static SVG/PNG image.

pub mod canvas;
pub mod events;
mod html;
pub mod stations;

pub use canvas::{MapCanvas, MapMarker, MarkerShape};
pub use events::{magnitude_radius, plot_events, EventMapOptions};
pub use stations::{plot_stations, StationMapOptions};
