/// Per-frame rigid transforms, depth ordering and back-face culling
use nalgebra::{Rotation3, Vector3};

use crate::geometry::{Mesh, Triangle};
use crate::vector::{Vec3, VectorOps};

/// Rotation state around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationState {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Moves model-space geometry into camera-relative space
pub struct Transform;

impl Transform {
    /// Combined rotation applying X first, then Y, then Z
    pub fn rotation(rotation: &RotationState) -> Rotation3<f64> {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), rotation.x);
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), rotation.y);
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), rotation.z);

        rz * ry * rx
    }

    /// Rotate, translate by `position`, then express relative to `camera`.
    ///
    /// Triangles are rebuilt from the moved vertices so their normals are
    /// recomputed rather than rotated. That only holds for rigid motion; a
    /// non-uniform scale would need the inverse-transpose instead.
    ///
    /// The result is ordered farthest first by average depth.
    pub fn to_camera_space(
        mesh: &Mesh,
        rotation: &RotationState,
        position: Vec3,
        camera: Vec3,
    ) -> Vec<Triangle> {
        let rotation = Self::rotation(rotation);

        let mut triangles: Vec<Triangle> = mesh
            .triangles
            .iter()
            .map(|tri| tri.map_vertices(|v| (rotation * v).translate(position).subtract(camera)))
            .collect();

        sort_far_to_near(&mut triangles);
        triangles
    }
}

/// Painter's order: descending average depth. Stable, so equal depths keep
/// mesh order.
pub fn sort_far_to_near(triangles: &mut [Triangle]) {
    triangles.sort_by(|a, b| b.average_depth().total_cmp(&a.average_depth()));
}

/// The eye looks down +z, so a face is visible when its normal does not point
/// away along z.
pub fn is_front_facing(triangle: &Triangle) -> bool {
    triangle.normal().z <= 0.0
}
