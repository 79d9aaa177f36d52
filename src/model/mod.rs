//! In-memory seismological records consumed by the renderers.
//!
//! These are plain data carriers; acquisition and parsing happen elsewhere.

pub mod event;
pub mod station;
pub mod trace;

pub use event::{Event, LocatedMagnitude, Magnitude, Origin};
pub use station::Station;
pub use trace::{Stream, Trace, TraceCoordinates, TraceStats};
