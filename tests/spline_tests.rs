//! Integrationstests für die Spline-API:
//! - Auswertung an den Segment-Enden
//! - Stetigkeit (Aligned/Mirrored) und Closed-Loop nach beliebigen Edits
//! - Arc-Length-Tabelle, Distanz-Abfragen, Extrapolation
//! - Cache-Invalidierung

use approx::assert_relative_eq;
use bezier_spline_editor::{
    evaluate_position, evaluate_tangent, BezierSpline, IdentityTransform, JointMode,
    LocalToWorld, SplineOptions,
};
use bezier_spline_editor::shared::MAX_EVEN_SAMPLES;
use glam::{Affine3A, Quat, Vec3};

fn x(v: f32) -> Vec3 {
    Vec3::new(v, 0.0, 0.0)
}

/// Gerades Segment (0,0,0) → (3,0,0) mit gleichmäßig verteilten Handles.
fn straight_line() -> BezierSpline<IdentityTransform> {
    BezierSpline::from_control_points(
        vec![x(0.0), x(1.0), x(2.0), x(3.0)],
        SplineOptions::default(),
        IdentityTransform,
    )
    .expect("gültige Kontrollpunkte")
}

/// Deterministischer Pseudo-Zufall (LCG), damit Fehlerfälle reproduzierbar sind.
struct Lcg(u64);

impl Lcg {
    fn next_u32(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }

    fn below(&mut self, n: usize) -> usize {
        self.next_u32() as usize % n
    }

    fn coord(&mut self) -> f32 {
        (self.next_u32() % 2001) as f32 / 100.0 - 10.0
    }

    fn point(&mut self) -> Vec3 {
        Vec3::new(self.coord(), self.coord(), self.coord())
    }

    fn mode(&mut self) -> JointMode {
        match self.below(3) {
            0 => JointMode::Free,
            1 => JointMode::Aligned,
            _ => JointMode::Mirrored,
        }
    }
}

/// Prüft Closed-Loop-Gleichheit und Kollinearität an allen erzwungenen Gelenken.
fn assert_invariants<T: LocalToWorld>(spline: &BezierSpline<T>, context: &str) {
    let points = spline.control_points();
    let modes = spline.joint_modes();
    let segment_count = spline.segment_count();
    assert_eq!(points.len(), 3 * segment_count + 1, "{}", context);
    assert_eq!(modes.len(), segment_count + 1, "{}", context);

    if spline.is_closed_loop() {
        assert_eq!(points[0], points[points.len() - 1], "{}", context);
        assert_eq!(modes[0], modes[modes.len() - 1], "{}", context);
    }

    let ring = 3 * segment_count;
    for (joint, mode) in modes.iter().enumerate() {
        let is_end = joint == 0 || joint == segment_count;
        if *mode == JointMode::Free || (is_end && !spline.is_closed_loop()) {
            continue;
        }
        let middle_index = 3 * joint;
        let incoming = points[(middle_index + ring - 1) % ring];
        let outgoing = points[(middle_index + 1) % ring];
        let middle = points[middle_index];
        let a = incoming - middle;
        let b = outgoing - middle;

        match mode {
            JointMode::Mirrored => {
                assert!(
                    (a + b).length() < 1e-3,
                    "{}: Gelenk {} nicht gespiegelt ({:?} / {:?})",
                    context,
                    joint,
                    a,
                    b
                );
            }
            JointMode::Aligned => {
                if a.length() > 1e-3 && b.length() > 1e-3 {
                    let dot = a.normalize().dot(b.normalize());
                    assert!(
                        dot < -0.999,
                        "{}: Gelenk {} nicht kollinear (dot = {})",
                        context,
                        joint,
                        dot
                    );
                }
            }
            JointMode::Free => unreachable!(),
        }
    }
}

// ─── Auswertung ──────────────────────────────────────────────────────────────

#[test]
fn test_evaluation_hits_endpoints_exactly() {
    let mut rng = Lcg(7);
    for _ in 0..200 {
        let (p0, p1, p2, p3) = (rng.point(), rng.point(), rng.point(), rng.point());
        assert_eq!(evaluate_position(p0, p1, p2, p3, 0.0), p0);
        assert_eq!(evaluate_position(p0, p1, p2, p3, 1.0), p3);
        assert_eq!(evaluate_tangent(p0, p1, p2, p3, 0.0), 3.0 * (p1 - p0));
    }
}

#[test]
fn test_whole_curve_query_joins_segments() {
    let mut spline = BezierSpline::new();
    spline.add_segment();
    spline.set_control_point(4, Vec3::new(5.0, 2.0, 0.0)).unwrap();

    // t = 0.5 liegt genau auf dem gemeinsamen Gelenk
    assert_eq!(spline.point(0.5), x(4.0));
    assert_eq!(spline.point(1.0), x(7.0));
    assert_eq!(spline.point(5.0), x(7.0));
    assert_eq!(spline.point(-1.0), x(1.0));
}

#[test]
fn test_tangent_removes_translation_and_applies_rotation() {
    let transform = Affine3A::from_rotation_translation(
        Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
        Vec3::new(100.0, 0.0, 0.0),
    );
    let spline = BezierSpline::with_transform(transform);

    let tangent = spline.tangent(0.0);
    assert_relative_eq!(tangent.x, 0.0, epsilon = 1e-5);
    assert_relative_eq!(tangent.y, 3.0, epsilon = 1e-5);

    let start = spline.point(0.0);
    assert_relative_eq!(start.x, 100.0, epsilon = 1e-5);
    assert_relative_eq!(start.y, 1.0, epsilon = 1e-5);
}

// ─── Stetigkeit ──────────────────────────────────────────────────────────────

#[test]
fn test_mirrored_joint_reflects_after_handle_edit() {
    let mut spline = BezierSpline::new();
    spline.add_segment();
    spline.set_joint_mode(3, JointMode::Mirrored).unwrap();
    spline.set_control_point(2, Vec3::new(3.0, 1.0, 2.0)).unwrap();

    let points = spline.control_points();
    assert_eq!(points[4] - points[3], -(points[2] - points[3]));
    assert_eq!(points[4], Vec3::new(5.0, -1.0, -2.0));
}

#[test]
fn test_aligned_joint_keeps_opposite_length() {
    let mut spline = BezierSpline::new();
    spline.add_segment();
    spline.set_control_point(4, Vec3::new(6.0, 0.0, 0.0)).unwrap();
    spline.set_joint_mode(3, JointMode::Aligned).unwrap();
    spline.set_control_point(2, Vec3::new(4.0, 1.0, 0.0)).unwrap();

    let points = spline.control_points();
    let offset = points[4] - points[3];
    // Länge 2 bleibt erhalten, Richtung zeigt von Handle 2 weg (0, -1)
    assert_relative_eq!(offset.length(), 2.0, epsilon = 1e-5);
    assert_relative_eq!(offset.x, 0.0, epsilon = 1e-5);
    assert_relative_eq!(offset.y, -2.0, epsilon = 1e-5);
}

#[test]
fn test_moving_joint_translates_handles_rigidly() {
    let mut spline = BezierSpline::new();
    spline.add_segment();
    spline.set_joint_mode(3, JointMode::Mirrored).unwrap();
    spline.set_control_point(2, Vec3::new(3.0, 1.0, 0.0)).unwrap();
    let before = spline.control_points().to_vec();

    let delta = Vec3::new(0.5, 2.0, -1.0);
    spline.set_control_point(3, before[3] + delta).unwrap();

    let after = spline.control_points();
    assert_relative_eq!((after[2] - before[2] - delta).length(), 0.0, epsilon = 1e-5);
    assert_relative_eq!((after[4] - before[4] - delta).length(), 0.0, epsilon = 1e-5);
    assert_invariants(&spline, "nach Gelenk-Verschiebung");
}

#[test]
fn test_invariants_hold_after_random_edit_sequences() {
    for seed in 1..=24u64 {
        let mut rng = Lcg(seed);
        let mut spline = BezierSpline::new();
        for step in 0..120 {
            match rng.below(8) {
                0 => spline.add_segment(),
                1 => {
                    spline.remove_segment();
                }
                2 => spline.set_closed_loop(rng.below(4) != 0),
                3 | 4 => {
                    let index = rng.below(spline.control_point_count());
                    let mode = rng.mode();
                    spline.set_joint_mode(index, mode).unwrap();
                }
                _ => {
                    let index = rng.below(spline.control_point_count());
                    let point = rng.point();
                    spline.set_control_point(index, point).unwrap();
                }
            }
            assert_invariants(&spline, &format!("Seed {} Schritt {}", seed, step));
        }
    }
}

// ─── Closed-Loop ─────────────────────────────────────────────────────────────

#[test]
fn test_closed_loop_keeps_ends_identical_through_edits() {
    let mut spline = BezierSpline::new();
    spline.add_segment();
    spline.add_segment();
    spline.set_closed_loop(true);
    assert_invariants(&spline, "geschlossen");

    spline.set_joint_mode(0, JointMode::Mirrored).unwrap();
    assert_invariants(&spline, "Modus Gelenk 0");

    spline.set_control_point(1, Vec3::new(1.0, 3.0, 0.0)).unwrap();
    assert_invariants(&spline, "Handle 1");

    let last = spline.control_point_count() - 1;
    spline.set_control_point(last, Vec3::new(0.0, 0.0, 4.0)).unwrap();
    assert_invariants(&spline, "Schluss-Gelenk");

    spline.add_segment();
    assert_invariants(&spline, "Segment angehängt");

    spline.remove_segment();
    assert_invariants(&spline, "Segment entfernt");
}

#[test]
fn test_closed_loop_parameter_wraps() {
    let mut spline = BezierSpline::new();
    spline.set_control_point(1, Vec3::new(2.0, 3.0, 0.0)).unwrap();
    spline.set_closed_loop(true);

    assert_eq!(spline.point(1.25), spline.point(0.25));
    assert_eq!(spline.point(-0.75), spline.point(0.25));
    assert_eq!(spline.point(1.0), spline.point(0.0));
}

// ─── Arc-Length ──────────────────────────────────────────────────────────────

#[test]
fn test_arc_length_table_is_monotonic_and_sums_up() {
    let mut spline = BezierSpline::new();
    spline.add_segment();
    spline.add_segment();
    spline.set_control_point(2, Vec3::new(3.0, 4.0, 0.0)).unwrap();
    spline.set_control_point(5, Vec3::new(6.0, -3.0, 1.0)).unwrap();

    let table = spline.arc_length_table();
    assert_eq!(table.len(), 3 * 16 + 1);
    let distances = table.distances();
    assert!(distances.windows(2).all(|w| w[0] <= w[1]));

    let sum: f32 = table.points().windows(2).map(|w| w[0].distance(w[1])).sum();
    assert_relative_eq!(table.total_length(), sum, epsilon = 1e-4);
}

#[test]
fn test_straight_line_distance_roundtrip() {
    let mut spline = straight_line();
    assert_relative_eq!(spline.total_length(), 3.0, epsilon = 1e-5);

    let mid = spline.point_at_distance(1.5);
    assert_relative_eq!(mid.x, 1.5, epsilon = 1e-5);
    assert_relative_eq!(mid.y, 0.0);
    assert_relative_eq!(mid.z, 0.0);

    assert_eq!(spline.point_at_distance(0.0), x(0.0));
}

#[test]
fn test_distance_outside_curve_extrapolates_along_end_tangents() {
    let mut spline = straight_line();

    let before = spline.point_at_distance(-1.0);
    assert_relative_eq!(before.x, -1.0, epsilon = 1e-5);
    assert_relative_eq!(before.y, 0.0);

    let after = spline.point_at_distance(4.0);
    assert_relative_eq!(after.x, 4.0, epsilon = 1e-5);
    assert_relative_eq!(after.y, 0.0);
}

#[test]
fn test_distance_query_uses_world_transform() {
    let mut spline = BezierSpline::from_control_points(
        vec![x(0.0), x(1.0), x(2.0), x(3.0)],
        SplineOptions::default(),
        Affine3A::from_translation(Vec3::new(0.0, 5.0, 0.0)),
    )
    .unwrap();

    let mid = spline.point_at_distance(1.5);
    assert_relative_eq!(mid.x, 1.5, epsilon = 1e-5);
    assert_relative_eq!(mid.y, 5.0, epsilon = 1e-5);
}

#[test]
fn test_structural_scenario_from_default() {
    let mut spline = BezierSpline::new();
    spline.add_segment();
    spline.add_segment();

    assert_eq!(spline.segment_count(), 3);
    assert_eq!(spline.control_point_count(), 10);
    assert_eq!(spline.joint_modes().len(), 4);
}

#[test]
fn test_edits_after_distance_query_are_visible() {
    let mut spline = straight_line();
    let old = spline.point_at_distance(1.5);
    assert_relative_eq!(old.x, 1.5, epsilon = 1e-5);

    // Kurve auf die doppelte Länge strecken (Endpunkt zieht Handle 2 mit)
    spline.set_control_point(3, x(6.0)).unwrap();
    spline.set_control_point(1, x(2.0)).unwrap();
    spline.set_control_point(2, x(4.0)).unwrap();

    assert_relative_eq!(spline.total_length(), 6.0, epsilon = 1e-4);
    let new = spline.point_at_distance(1.5);
    assert_relative_eq!(new.x, 1.5, epsilon = 1e-4);
    let far = spline.point_at_distance(4.5);
    assert_relative_eq!(far.x, 4.5, epsilon = 1e-4);
}

#[test]
fn test_sample_evenly_spaces_points_by_distance() {
    let mut spline = BezierSpline::new();
    spline.set_control_point(1, Vec3::new(1.0, 3.0, 0.0)).unwrap();
    spline.set_control_point(2, Vec3::new(4.0, 3.0, 0.0)).unwrap();

    let total = spline.total_length();
    let samples = spline.sample_evenly(0.5).unwrap();
    let expected_count = (total / 0.5).ceil() as usize + 1;
    assert_eq!(samples.len(), expected_count);
    assert_eq!(samples[0], spline.point(0.0));
    assert_eq!(*samples.last().unwrap(), spline.point(1.0));

    for pair in samples.windows(2) {
        assert!(pair[0].distance(pair[1]) <= 0.5 + 1e-3);
    }
}

#[test]
fn test_sample_evenly_with_invalid_spacing_returns_ends() {
    let mut spline = straight_line();
    assert_eq!(spline.sample_evenly(0.0).unwrap(), vec![x(0.0), x(3.0)]);
    assert_eq!(spline.sample_evenly(f32::NAN).unwrap(), vec![x(0.0), x(3.0)]);
}

#[test]
fn test_sample_evenly_rejects_too_fine_spacing() {
    let mut spline = BezierSpline::new();
    assert!(spline.sample_evenly(1e-30).is_err());
    assert!(spline.sample_evenly(3.0 / (MAX_EVEN_SAMPLES as f32 * 4.0)).is_err());

    // Die Spline bleibt danach normal nutzbar
    let samples = spline.sample_evenly(0.7).unwrap();
    assert_eq!(samples[0], spline.point(0.0));
    assert_eq!(*samples.last().unwrap(), spline.point(1.0));
}

#[test]
fn test_sample_evenly_closed_loop_ends_at_start() {
    let mut spline = BezierSpline::new();
    spline.add_segment();
    spline.set_control_point(3, Vec3::new(4.0, 3.0, 0.0)).unwrap();
    spline.set_closed_loop(true);
    assert!(spline.total_length() > 0.0);

    let samples = spline.sample_evenly(0.25).unwrap();
    assert!(samples.len() > 2);
    assert_eq!(samples[0], spline.point(0.0));
    assert_eq!(samples.first(), samples.last());
}
