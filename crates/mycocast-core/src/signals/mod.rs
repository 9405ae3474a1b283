//! Environmental signal providers.
//!
//! Each provider is a pure function of coordinates, guild configuration and
//! cached inputs, returning a multiplicative factor for the scoring engine.
//! A provider that cannot answer (missing data, unconfigured guild) returns
//! [`NEUTRAL`] rather than an error; the pipeline never fails on a signal.

pub mod aspect;
pub mod habitat;
pub mod hosts;
pub mod season;
pub mod weather;

/// Factor value meaning "no evidence either way".
pub const NEUTRAL: f64 = 1.0;

pub use aspect::{AspectProvider, PseudoAspect};
pub use habitat::{HabitatProvider, OpenHabitat};
pub use hosts::HostTreeIndex;
pub use weather::{WeatherSample, WeatherSignal, WeatherSource};
