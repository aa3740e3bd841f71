//! Reine Bézier-Mathematik für ein einzelnes kubisches Segment.
//!
//! Zustandslos: Position und erste Ableitung hängen nur von den vier
//! Kontrollpunkten und `t` ab.

use anyhow::bail;
use glam::Vec3;

/// B(t) = (1-t)³·P0 + 3(1-t)²t·P1 + 3(1-t)t²·P2 + t³·P3
///
/// `t` wird stillschweigend auf [0, 1] begrenzt.
pub fn evaluate_position(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t = t.clamp(0.0, 1.0);
    let inv = 1.0 - t;
    let inv2 = inv * inv;
    let t2 = t * t;
    inv2 * inv * p0 + 3.0 * inv2 * t * p1 + 3.0 * inv * t2 * p2 + t2 * t * p3
}

/// B'(t) = 3(1-t)²·(P1-P0) + 6(1-t)t·(P2-P1) + 3t²·(P3-P2)
///
/// Nicht normalisiert. `t` wird wie bei [`evaluate_position`] begrenzt.
pub fn evaluate_tangent(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t = t.clamp(0.0, 1.0);
    let inv = 1.0 - t;
    3.0 * inv * inv * (p1 - p0) + 6.0 * inv * t * (p2 - p1) + 3.0 * t * t * (p3 - p2)
}

/// Die vier Kontrollpunkte eines Segments.
///
/// `p0`/`p3` liegen auf der Kurve, `p1`/`p2` sind Tangenten-Handles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentPoints {
    pub p0: Vec3,
    pub p1: Vec3,
    pub p2: Vec3,
    pub p3: Vec3,
}

impl SegmentPoints {
    /// Erstellt ein Segment aus vier Kontrollpunkten.
    pub fn new(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Erstellt ein Segment aus einem Slice mit genau vier Punkten.
    pub(crate) fn from_slice(points: &[Vec3]) -> Self {
        Self::new(points[0], points[1], points[2], points[3])
    }

    /// Liefert den Kontrollpunkt mit Index 0..=3.
    pub fn get(&self, index: usize) -> anyhow::Result<Vec3> {
        match index {
            0 => Ok(self.p0),
            1 => Ok(self.p1),
            2 => Ok(self.p2),
            3 => Ok(self.p3),
            _ => bail!("Segment-Index {} außerhalb 0..=3", index),
        }
    }

    /// Überschreibt den Kontrollpunkt mit Index 0..=3.
    pub fn set(&mut self, index: usize, value: Vec3) -> anyhow::Result<()> {
        let slot = match index {
            0 => &mut self.p0,
            1 => &mut self.p1,
            2 => &mut self.p2,
            3 => &mut self.p3,
            _ => bail!("Segment-Index {} außerhalb 0..=3", index),
        };
        *slot = value;
        Ok(())
    }

    /// Position auf dem Segment (lokaler Kurvenraum).
    pub fn position(&self, t: f32) -> Vec3 {
        evaluate_position(self.p0, self.p1, self.p2, self.p3, t)
    }

    /// Erste Ableitung auf dem Segment (lokaler Kurvenraum).
    pub fn tangent(&self, t: f32) -> Vec3 {
        evaluate_tangent(self.p0, self.p1, self.p2, self.p3, t)
    }
}
