/// Perspective projection and projection-plane to grid mapping
use crate::vector::{Vec3, VectorOps, DEFAULT_PROJECTION_DISTANCE};

/// Vertices closer to the eye plane than this are not projected
pub const EYE_PLANE_EPSILON: f64 = 1e-6;

/// Perspective projection with the eye at `z = -distance` looking down +z
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub distance: f64,
    pub zoom: f64,
}

impl Projection {
    pub fn new(zoom: f64) -> Self {
        Self {
            distance: DEFAULT_PROJECTION_DISTANCE,
            zoom,
        }
    }

    /// Project a camera-space point, keeping its z.
    ///
    /// Returns `None` for points on or behind the eye plane, where the
    /// perspective divide blows up or flips the image.
    pub fn project(&self, point: Vec3) -> Option<Vec3> {
        if self.distance + point.z <= EYE_PLANE_EPSILON {
            return None;
        }
        Some(point.project_with_zoom(self.distance, self.zoom))
    }

    pub fn project_triangle(&self, vertices: &[Vec3; 3]) -> Option<[Vec3; 3]> {
        Some([
            self.project(vertices[0])?,
            self.project(vertices[1])?,
            self.project(vertices[2])?,
        ])
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// The window of the projection plane that is mapped onto the framebuffer.
///
/// Grid row 0 is the window's minimum y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub min_x: f64,
    pub min_y: f64,
    pub span_x: f64,
    pub span_y: f64,
}

impl Viewport {
    /// Continuous grid coordinates of a projection-plane point
    pub fn to_grid(&self, x: f64, y: f64, width: usize, height: usize) -> (f64, f64) {
        (
            (x - self.min_x) * width as f64 / self.span_x,
            (y - self.min_y) * height as f64 / self.span_y,
        )
    }

    /// Projection-plane point sampled by grid cell `(column, row)`
    pub fn to_plane(&self, column: usize, row: usize, width: usize, height: usize) -> (f64, f64) {
        (
            column as f64 * self.span_x / width as f64 + self.min_x,
            row as f64 * self.span_y / height as f64 + self.min_y,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            min_x: -6.0,
            min_y: -3.0,
            span_x: 12.0,
            span_y: 8.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_creation() {
        let projection = Projection::new(1.5);
        assert_eq!(projection.distance, 12.0);
        assert!((projection.zoom - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_projection_scales_with_depth() {
        let projection = Projection::default();
        let near = projection.project(Vec3::new(1.0, 1.0, -6.0)).unwrap();
        let far = projection.project(Vec3::new(1.0, 1.0, 12.0)).unwrap();
        assert!((near.x - 2.0).abs() < 1e-12);
        assert!((far.x - 0.5).abs() < 1e-12);
        assert_eq!(near.z, -6.0);
    }

    #[test]
    fn test_eye_plane_is_rejected() {
        let projection = Projection::default();
        assert!(projection.project(Vec3::new(0.0, 0.0, -12.0)).is_none());
        assert!(projection.project(Vec3::new(0.0, 0.0, -20.0)).is_none());

        let tri = [Vec3::zeros(), Vec3::x(), Vec3::new(0.0, 1.0, -13.0)];
        assert!(projection.project_triangle(&tri).is_none());
    }

    #[test]
    fn test_viewport_round_trip_on_cells() {
        let viewport = Viewport::default();
        let (width, height) = (120, 60);
        for (column, row) in [(0, 0), (60, 22), (119, 59)] {
            let (x, y) = viewport.to_plane(column, row, width, height);
            let (gx, gy) = viewport.to_grid(x, y, width, height);
            assert!((gx - column as f64).abs() < 1e-9);
            assert!((gy - row as f64).abs() < 1e-9);
        }
    }

    #[test]
    fn test_viewport_window_edges() {
        let viewport = Viewport::default();
        assert_eq!(viewport.to_plane(0, 0, 120, 60), (-6.0, -3.0));
        assert_eq!(viewport.to_grid(6.0, 5.0, 120, 60), (120.0, 60.0));
    }
}
