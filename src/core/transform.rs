//! Lokal→Welt-Transformation als injizierte Fähigkeit der Spline.
//!
//! Die Spline rechnet im lokalen Kurvenraum und übergibt jedes
//! Abfrage-Ergebnis an einen [`LocalToWorld`]-Kollaborateur.

use glam::{Affine3A, Mat4, Vec3};

/// Bildet Punkte und Vektoren aus dem Kurvenraum in den Weltraum ab.
pub trait LocalToWorld {
    /// Transformiert einen Punkt (inkl. Translation).
    fn transform_point(&self, local: Vec3) -> Vec3;

    /// Transformiert einen Richtungsvektor (ohne Translation).
    ///
    /// Standard: Vektor als Punkt transformieren und den transformierten
    /// Ursprung abziehen.
    fn transform_vector(&self, local: Vec3) -> Vec3 {
        self.transform_point(local) - self.transform_point(Vec3::ZERO)
    }
}

/// Kurvenraum == Weltraum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentityTransform;

impl LocalToWorld for IdentityTransform {
    fn transform_point(&self, local: Vec3) -> Vec3 {
        local
    }

    fn transform_vector(&self, local: Vec3) -> Vec3 {
        local
    }
}

impl LocalToWorld for Affine3A {
    fn transform_point(&self, local: Vec3) -> Vec3 {
        self.transform_point3(local)
    }

    fn transform_vector(&self, local: Vec3) -> Vec3 {
        self.transform_vector3(local)
    }
}

// Mat4 nutzt die Standard-Vektor-Ableitung über den Ursprung.
impl LocalToWorld for Mat4 {
    fn transform_point(&self, local: Vec3) -> Vec3 {
        self.transform_point3(local)
    }
}

impl<T: LocalToWorld + ?Sized> LocalToWorld for &T {
    fn transform_point(&self, local: Vec3) -> Vec3 {
        (**self).transform_point(local)
    }

    fn transform_vector(&self, local: Vec3) -> Vec3 {
        (**self).transform_vector(local)
    }
}
