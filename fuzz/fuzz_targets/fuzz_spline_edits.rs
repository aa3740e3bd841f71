#![no_main]

use bezier_spline_editor::{BezierSpline, JointMode};
use glam::Vec3;
use libfuzzer_sys::fuzz_target;

fn coord(byte: u8) -> f32 {
    byte as f32 / 8.0 - 16.0
}

fuzz_target!(|data: &[u8]| {
    let mut spline = BezierSpline::new();

    for chunk in data.chunks_exact(5) {
        let index = chunk[1] as usize % spline.control_point_count();
        match chunk[0] % 6 {
            0 => spline.add_segment(),
            1 => {
                spline.remove_segment();
            }
            2 => spline.set_closed_loop(chunk[1] % 2 == 0),
            3 => {
                let mode = match chunk[2] % 3 {
                    0 => JointMode::Free,
                    1 => JointMode::Aligned,
                    _ => JointMode::Mirrored,
                };
                let _ = spline.set_joint_mode(index, mode);
            }
            4 => {
                let point = Vec3::new(coord(chunk[2]), coord(chunk[3]), coord(chunk[4]));
                let _ = spline.set_control_point(index, point);
            }
            _ => {
                let distance = coord(chunk[2]) * 4.0;
                let p = spline.point_at_distance(distance);
                assert!(p.is_finite(), "Distanz {} liefert {:?}", distance, p);
            }
        }

        let points = spline.control_points();
        assert_eq!(points.len(), 3 * spline.segment_count() + 1);
        assert_eq!(spline.joint_modes().len(), spline.segment_count() + 1);
        if spline.is_closed_loop() {
            assert_eq!(points[0], points[points.len() - 1]);
        }
    }
});
