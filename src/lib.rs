//! Bézier-Spline-Bibliothek.
//! Kubische Segmente, Gelenk-Modi (Free/Aligned/Mirrored), Closed-Loop und
//! Abfragen nach Bogenlänge.

pub mod core;
pub mod shared;

pub use core::{
    evaluate_position, evaluate_tangent, inverse_lerp, ArcLengthTable, BezierSpline,
    IdentityTransform, JointMode, LocalToWorld, SegmentPoints,
};
pub use shared::SplineOptions;
