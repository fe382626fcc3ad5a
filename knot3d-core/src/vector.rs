/// Vector math on top of nalgebra's `Vector3<f64>`
use nalgebra::{Rotation3, Vector3};

/// The vector type used throughout the pipeline
pub type Vec3 = Vector3<f64>;

/// Default distance from the eye to the projection plane
pub const DEFAULT_PROJECTION_DISTANCE: f64 = 12.0;

/// Value-returning vector operations used by the mesh and render pipeline.
///
/// Every method takes `self` by value and returns a new vector.
pub trait VectorOps: Sized {
    fn rotate_x(self, angle: f64) -> Self;
    fn rotate_y(self, angle: f64) -> Self;
    fn rotate_z(self, angle: f64) -> Self;
    fn translate(self, offset: Self) -> Self;
    fn subtract(self, other: Self) -> Self;

    /// Unit vector in the same direction, or the zero vector for a zero input
    fn normalize_or_zero(self) -> Self;

    /// Perspective divide: scales x and y by `distance * zoom / (distance + z)`.
    ///
    /// z is passed through untouched so it can still be used for depth.
    /// The result is unbounded as `distance + z` approaches zero; callers
    /// must keep geometry in front of the eye.
    fn project_with_zoom(self, distance: f64, zoom: f64) -> Self;

    fn project(self, distance: f64) -> Self {
        self.project_with_zoom(distance, 1.0)
    }
}

impl VectorOps for Vec3 {
    fn rotate_x(self, angle: f64) -> Self {
        Rotation3::from_axis_angle(&Vector3::x_axis(), angle) * self
    }

    fn rotate_y(self, angle: f64) -> Self {
        Rotation3::from_axis_angle(&Vector3::y_axis(), angle) * self
    }

    fn rotate_z(self, angle: f64) -> Self {
        Rotation3::from_axis_angle(&Vector3::z_axis(), angle) * self
    }

    fn translate(self, offset: Self) -> Self {
        self + offset
    }

    fn subtract(self, other: Self) -> Self {
        self - other
    }

    fn normalize_or_zero(self) -> Self {
        // try_normalize only fails when the norm is <= the threshold
        self.try_normalize(0.0).unwrap_or_else(Vec3::zeros)
    }

    fn project_with_zoom(self, distance: f64, zoom: f64) -> Self {
        let factor = distance * zoom / (distance + self.z);
        Vec3::new(self.x * factor, self.y * factor, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, TAU};

    fn approx_eq(a: &Vec3, b: &Vec3, eps: f64) -> bool {
        (a - b).norm() < eps
    }

    #[test]
    fn test_normalize_unit_length() {
        let samples = [
            Vec3::new(3.0, 4.0, 0.0),
            Vec3::new(-1.0, 2.0, -7.5),
            Vec3::new(1e-8, 0.0, 0.0),
            Vec3::new(1e8, -1e8, 3.0),
        ];
        for v in samples {
            assert!((v.normalize_or_zero().norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_normalize_zero_vector() {
        assert_eq!(Vec3::zeros().normalize_or_zero(), Vec3::zeros());
    }

    #[test]
    fn test_cross_anticommutative() {
        let a = Vec3::new(1.0, -2.0, 0.5);
        let b = Vec3::new(0.3, 4.0, -1.0);
        assert!(approx_eq(&a.cross(&b), &-b.cross(&a), 1e-12));
    }

    #[test]
    fn test_full_turn_is_identity() {
        let v = Vec3::new(0.7, -1.3, 2.2);
        assert!(approx_eq(&v.rotate_x(TAU), &v, 1e-12));
        assert!(approx_eq(&v.rotate_y(TAU), &v, 1e-12));
        assert!(approx_eq(&v.rotate_z(TAU), &v, 1e-12));
    }

    #[test]
    fn test_right_handed_quarter_turns() {
        let x = Vec3::x();
        let y = Vec3::y();
        let z = Vec3::z();
        assert!(approx_eq(&y.rotate_x(FRAC_PI_2), &z, 1e-12));
        assert!(approx_eq(&z.rotate_y(FRAC_PI_2), &x, 1e-12));
        assert!(approx_eq(&x.rotate_z(FRAC_PI_2), &y, 1e-12));
    }

    #[test]
    fn test_rotation_order_matters() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let xyz = v.rotate_x(0.4).rotate_y(0.9).rotate_z(-0.3);
        let zyx = v.rotate_z(-0.3).rotate_y(0.9).rotate_x(0.4);
        assert!(!approx_eq(&xyz, &zyx, 1e-6));
    }

    #[test]
    fn test_projection_keeps_depth() {
        let v = Vec3::new(2.0, -1.0, 4.0);
        let p = v.project_with_zoom(12.0, 2.0);
        assert!((p.x - 2.0 * 24.0 / 16.0).abs() < 1e-12);
        assert!((p.y + 24.0 / 16.0).abs() < 1e-12);
        assert_eq!(p.z, 4.0);
        assert_eq!(v.project(12.0), v.project_with_zoom(12.0, 1.0));
    }

    #[test]
    fn test_translate_and_subtract() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(-0.5, 0.5, 1.0);
        assert_eq!(a.translate(b), Vec3::new(0.5, 2.5, 4.0));
        assert_eq!(a.translate(b).subtract(b), a);
    }
}
