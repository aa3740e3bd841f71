//! Läuft mit konstanter Geschwindigkeit über eine geschlossene Spline.
//!
//! `RUST_LOG=debug cargo run --example spline_walker` zeigt zusätzlich die
//! Cache-Rebuilds der Spline.

use bezier_spline_editor::{BezierSpline, JointMode, SplineOptions};
use glam::{Affine3A, Vec3};

/// Konsument der Spline: akkumuliert `dt · speed` und fragt pro Schritt ab.
struct SplineWalker {
    progress: f32,
    speed: f32,
    position: Vec3,
}

impl SplineWalker {
    fn update(&mut self, spline: &mut BezierSpline, dt: f32) {
        self.progress += dt * self.speed;
        self.position = spline.point_at_distance(self.progress);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let options = SplineOptions::load_from_file(std::path::Path::new("spline.toml"));
    let mut spline = BezierSpline::with_options(
        options,
        Affine3A::from_translation(Vec3::new(0.0, 0.0, 10.0)),
    );

    // Grobes Quadrat aus vier Segmenten mit gespiegelten Gelenken
    spline.add_segment();
    spline.add_segment();
    spline.add_segment();
    let corners = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(8.0, 0.0, 0.0),
        Vec3::new(8.0, 8.0, 0.0),
        Vec3::new(0.0, 8.0, 0.0),
    ];
    for (joint, corner) in corners.iter().enumerate() {
        spline.set_control_point(joint * 3, *corner)?;
    }
    spline.set_closed_loop(true);
    for joint in 0..corners.len() {
        spline.set_joint_mode(joint * 3, JointMode::Mirrored)?;
    }

    let total = spline.total_length();
    log::info!(
        "Spline mit {} Segmenten, Länge {:.2}",
        spline.segment_count(),
        total
    );

    let mut walker = SplineWalker {
        progress: 0.0,
        speed: 3.0,
        position: spline.point(0.0),
    };
    let dt = 1.0 / 4.0;
    for step in 0..24 {
        walker.update(&mut spline, dt);
        println!(
            "t={:5.2}s  s={:6.2}  pos=({:6.2}, {:6.2}, {:6.2})",
            step as f32 * dt,
            walker.progress,
            walker.position.x,
            walker.position.y,
            walker.position.z
        );
    }
    Ok(())
}
