//! Arc-Length-Tabelle für Abfragen nach zurückgelegter Distanz.
//!
//! Jedes Segment wird in `resolution` gleichen Parameter-Schritten abgetastet
//! (Standard: [`ARC_LENGTH_RESOLUTION`](crate::shared::options::ARC_LENGTH_RESOLUTION)).
//! Pro Schritt wird die kumulierte Distanz am Schritt-*Anfang* zusammen mit
//! dem Abtastpunkt gespeichert, als letzter Eintrag folgt die Gesamtlänge mit
//! dem Kurvenende. Größe: `segment_count · resolution + 1`.
//!
//! Alle Distanzen liegen im lokalen Kurvenraum.

use super::bezier::SegmentPoints;
use glam::Vec3;

/// Lineare Rückprojektion: wo liegt `value` zwischen `a` und `b`?
///
/// Liefert 0.0 wenn `a == b`.
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        return 0.0;
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}

/// Vorberechnete kumulierte Distanzen entlang der Kurve.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcLengthTable {
    /// Kumulierte Distanz je Eintrag (monoton nicht fallend)
    distances: Vec<f32>,
    /// Abtastpunkt je Eintrag (lokaler Kurvenraum)
    points: Vec<Vec3>,
}

impl ArcLengthTable {
    /// Baut die Tabelle aus einer Kontrollpunkt-Kette (`3·n + 1` Punkte).
    pub fn from_control_points(control_points: &[Vec3], resolution: usize) -> Self {
        let resolution = resolution.max(1);
        let segment_count = control_points.len().saturating_sub(1) / 3;
        let capacity = segment_count * resolution + 1;
        let mut distances = Vec::with_capacity(capacity);
        let mut points = Vec::with_capacity(capacity);

        let mut cumulative = 0.0f32;
        let mut last = control_points.first().copied().unwrap_or(Vec3::ZERO);
        for chunk in control_points.windows(4).step_by(3) {
            let segment = SegmentPoints::from_slice(chunk);
            let mut prev = segment.position(0.0);
            for step in 1..=resolution {
                let next = segment.position(step as f32 / resolution as f32);
                distances.push(cumulative);
                points.push(prev);
                cumulative += prev.distance(next);
                prev = next;
            }
            last = prev;
        }
        distances.push(cumulative);
        points.push(last);

        Self { distances, points }
    }

    /// Anzahl der Einträge.
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// True wenn die Tabelle keine Einträge hat.
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Kumulierte Distanzen.
    pub fn distances(&self) -> &[f32] {
        &self.distances
    }

    /// Abtastpunkte im Kurvenraum.
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Gesamtlänge (letzter Eintrag).
    pub fn total_length(&self) -> f32 {
        self.distances.last().copied().unwrap_or(0.0)
    }

    /// Punkt im Kurvenraum bei Distanz `distance` ∈ [0, total].
    ///
    /// Linearer Scan nach dem letzten Eintrag `i` mit `distances[i] <= distance`,
    /// dann lineare Interpolation zu `i + 1`. Werte außerhalb werden auf die
    /// Kurvenenden begrenzt; Extrapolation übernimmt die Spline.
    pub fn point_at(&self, distance: f32) -> Vec3 {
        let Some(&first) = self.points.first() else {
            return Vec3::ZERO;
        };
        let mut index = 0;
        while index + 1 < self.distances.len() && self.distances[index + 1] <= distance {
            index += 1;
        }
        if index + 1 >= self.distances.len() {
            return self.points.last().copied().unwrap_or(first);
        }
        let blend = inverse_lerp(self.distances[index], self.distances[index + 1], distance);
        self.points[index].lerp(self.points[index + 1], blend)
    }
}
