//! Core-Domänentypen: Bézier-Mathematik, Gelenke, Spline, Arc-Length-Tabelle.

pub mod arc_length;
pub mod bezier;
pub mod joint;
/// Spline-Datenmodell
///
/// - BezierSpline: Kontrollpunkt-Kette + Gelenk-Modi + Closed-Loop
/// - Strukturelle Änderungen (Segmente anhängen/entfernen, Punkte verschieben)
/// - Stetigkeits-Erzwingung und lazy Arc-Length-Cache
pub mod spline;
pub mod transform;

pub use arc_length::{inverse_lerp, ArcLengthTable};
pub use bezier::{evaluate_position, evaluate_tangent, SegmentPoints};
pub use joint::{joint_of_point, JointMode};
pub use spline::BezierSpline;
pub use transform::{IdentityTransform, LocalToWorld};
