//! Gelenk-Modi und die zentrale Index-Arithmetik zwischen Kontrollpunkten und Gelenken.
//!
//! Ein Gelenk `j` liegt auf Kontrollpunkt `3·j`. Die beiden Handles daneben
//! sind `3·j - 1` (eingehend) und `3·j + 1` (ausgehend). Im Closed-Loop wird
//! über einen Ring aus `3·segment_count` Punkten gerechnet, der letzte Punkt
//! ist dort mit Punkt 0 identisch.

/// Stetigkeits-Modus an einem Gelenk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JointMode {
    /// Handles unabhängig voneinander
    #[default]
    Free,
    /// Handles kollinear, Längen unabhängig
    Aligned,
    /// Handles kollinear und gleich lang (Punktspiegelung am Gelenk)
    Mirrored,
}

/// Gelenk, das dem Kontrollpunkt `point_index` am nächsten liegt.
///
/// Handles `3j-1` und `3j+1` gehören zu Gelenk `j`.
pub fn joint_of_point(point_index: usize) -> usize {
    (point_index + 1) / 3
}

/// Kontrollpunkt-Index des Gelenks selbst.
pub fn point_of_joint(joint: usize) -> usize {
    joint * 3
}

/// True wenn `point_index` auf einem Gelenk (Kurvenpunkt) liegt.
pub fn is_joint_point(point_index: usize) -> bool {
    point_index % 3 == 0
}

/// Handle-Nachbarn eines Gelenks: (eingehend, ausgehend).
///
/// Offen: `None` an den Kurvenenden. Closed-Loop: Indizes laufen modulo
/// `3·segment_count` um, d.h. Gelenk 0 bekommt `3n-1` als eingehendes und
/// das letzte Gelenk `1` als ausgehendes Handle.
pub fn handle_neighbors(
    joint: usize,
    segment_count: usize,
    closed_loop: bool,
) -> (Option<usize>, Option<usize>) {
    let middle = point_of_joint(joint);
    if closed_loop {
        let ring = point_of_joint(segment_count);
        let incoming = (middle + ring - 1) % ring;
        let outgoing = (middle + 1) % ring;
        return (Some(incoming), Some(outgoing));
    }
    let incoming = middle.checked_sub(1);
    let outgoing = (joint < segment_count).then_some(middle + 1);
    (incoming, outgoing)
}
