//! Erzwingt den Stetigkeits-Modus an einem Gelenk nach einer Änderung.
//!
//! Das zuletzt bearbeitete Handle bleibt fix, das gegenüberliegende wird
//! nachgeführt:
//! - `Mirrored`: Punktspiegelung des fixen Handles am Gelenk
//! - `Aligned`: gleiche Richtung, Länge des nachgeführten Handles bleibt
//!
//! Die Aligned-Länge wird bei jedem Aufruf aus dem *aktuellen* Zustand
//! gelesen, nicht aus einer gespeicherten Ursprungslänge.

use super::BezierSpline;
use crate::core::joint::{handle_neighbors, joint_of_point, point_of_joint, JointMode};
use crate::core::transform::LocalToWorld;

impl<T: LocalToWorld> BezierSpline<T> {
    /// Stabilisiert das Gelenk, das dem Kontrollpunkt `index` am nächsten liegt.
    ///
    /// No-op bei `Free` und an offenen Kurvenenden.
    pub(crate) fn enforce_mode(&mut self, index: usize) {
        let joint = joint_of_point(index);
        let mode = self.modes[joint];
        let last_joint = self.modes.len() - 1;
        if mode == JointMode::Free || (!self.closed_loop && (joint == 0 || joint == last_joint)) {
            return;
        }

        let (Some(incoming), Some(outgoing)) =
            handle_neighbors(joint, self.segment_count(), self.closed_loop)
        else {
            return;
        };

        // Gelenkpunkt selbst zählt als Änderung auf der eingehenden Seite
        let middle_index = point_of_joint(joint);
        let (fixed_index, enforced_index) = if index <= middle_index {
            (incoming, outgoing)
        } else {
            (outgoing, incoming)
        };

        let middle = self.points[middle_index];
        let mut tangent = middle - self.points[fixed_index];
        if mode == JointMode::Aligned {
            let length = middle.distance(self.points[enforced_index]);
            tangent = tangent.normalize_or_zero() * length;
        }
        self.points[enforced_index] = middle + tangent;
    }
}
