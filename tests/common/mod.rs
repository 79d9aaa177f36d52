//! Common test utilities for seisviz.
//!
//! Synthetic stations, events and waveforms plus helpers for checking the
//! files the plotting functions write.

#![allow(dead_code)]

pub mod assertions;
pub mod image_utils;
pub mod test_data;
