//! Geteilte Konfiguration für alle Spline-Instanzen.

pub mod options;

pub use options::SplineOptions;
pub use options::{ARC_LENGTH_RESOLUTION, DEFAULT_AXIS, DEFAULT_POINT_SPACING, MAX_EVEN_SAMPLES};
