/// Torus-knot tube mesh generation
use std::f64::consts::TAU;

use crate::geometry::{Mesh, Triangle};
use crate::vector::{Vec3, VectorOps};

/// Radius drift tolerated before the mesh is rebuilt
pub const RADIUS_TOLERANCE: f64 = 0.05;
/// Tube radius drift tolerated before the mesh is rebuilt
pub const TUBE_RADIUS_TOLERANCE: f64 = 0.02;

/// Shape parameters of a torus knot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnotParams {
    /// Windings around the torus' rotational axis
    pub p: u32,
    /// Windings through the torus' hole
    pub q: u32,
    /// Radius of the torus the centerline lies on
    pub radius: f64,
    /// Radius of the swept circular cross-section
    pub tube_radius: f64,
}

impl KnotParams {
    pub fn new(p: u32, q: u32, radius: f64, tube_radius: f64) -> Self {
        Self {
            p,
            q,
            radius,
            tube_radius,
        }
    }

    /// Whether `other` is far enough from `self` to warrant a rebuild.
    ///
    /// Winding numbers must match exactly, radii within their tolerances.
    pub fn differs_from(&self, other: &KnotParams) -> bool {
        self.p != other.p
            || self.q != other.q
            || (self.radius - other.radius).abs() > RADIUS_TOLERANCE
            || (self.tube_radius - other.tube_radius).abs() > TUBE_RADIUS_TOLERANCE
    }
}

impl Default for KnotParams {
    fn default() -> Self {
        Self::new(3, 2, 2.0, 0.4)
    }
}

/// Sampling density of the tube surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnotResolution {
    /// Samples along the centerline
    pub u_steps: usize,
    /// Samples around each cross-section ring
    pub v_steps: usize,
}

impl Default for KnotResolution {
    fn default() -> Self {
        Self {
            u_steps: 60,
            v_steps: 12,
        }
    }
}

/// A generated torus-knot mesh together with the parameters it was built from
#[derive(Debug, Clone)]
pub struct TorusKnot {
    params: KnotParams,
    resolution: KnotResolution,
    mesh: Mesh,
}

impl TorusKnot {
    pub fn new(params: KnotParams) -> Self {
        Self::with_resolution(params, KnotResolution::default())
    }

    pub fn with_resolution(params: KnotParams, resolution: KnotResolution) -> Self {
        let mesh = generate_mesh(&params, resolution);
        Self {
            params,
            resolution,
            mesh,
        }
    }

    pub fn params(&self) -> KnotParams {
        self.params
    }

    pub fn resolution(&self) -> KnotResolution {
        self.resolution
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// A freshly generated knot if `params` moved past the rebuild tolerances,
    /// `None` if the current mesh is still good.
    pub fn regenerated(&self, params: KnotParams) -> Option<TorusKnot> {
        if self.params.differs_from(&params) {
            Some(Self::with_resolution(params, self.resolution))
        } else {
            None
        }
    }
}

/// Build the knot on first use, afterwards rebuild only when `params` drifted
/// past the tolerances.
pub fn generate_or_update_mesh(previous: Option<TorusKnot>, params: KnotParams) -> TorusKnot {
    match previous {
        Some(knot) => knot.regenerated(params).unwrap_or(knot),
        None => TorusKnot::new(params),
    }
}

/// Orthonormal frame travelling along the knot's centerline
struct CenterlineFrame {
    center: Vec3,
    normal: Vec3,
    binormal: Vec3,
}

fn centerline_frame(params: &KnotParams, u: f64) -> CenterlineFrame {
    let p = params.p as f64;
    let q = params.q as f64;
    let (sin_pu, cos_pu) = (p * u).sin_cos();
    let (sin_qu, cos_qu) = (q * u).sin_cos();
    let ring = params.radius + cos_qu;

    let center = Vec3::new(ring * cos_pu, ring * sin_pu, sin_qu);

    let tangent = Vec3::new(
        -ring * p * sin_pu - q * sin_qu * cos_pu,
        ring * p * cos_pu - q * sin_qu * sin_pu,
        q * cos_qu,
    )
    .normalize_or_zero();

    // Seeded from the inward radial direction, then re-orthogonalized
    let seed = Vec3::new(-cos_pu, -sin_pu, 0.0);
    let normal = tangent.cross(&seed).normalize_or_zero();
    let binormal = normal.cross(&tangent).normalize_or_zero();

    CenterlineFrame {
        center,
        normal,
        binormal,
    }
}

/// Grid cell triangulation as `(i, j)` vertex indices, wrapping in both
/// directions so the surface is closed.
pub fn grid_faces(u_steps: usize, v_steps: usize) -> Vec<[(usize, usize); 3]> {
    let mut faces = Vec::with_capacity(2 * u_steps * v_steps);
    for i in 0..u_steps {
        let next_i = (i + 1) % u_steps;
        for j in 0..v_steps {
            let next_j = (j + 1) % v_steps;
            faces.push([(i, j), (next_i, j), (i, next_j)]);
            faces.push([(next_i, j), (next_i, next_j), (i, next_j)]);
        }
    }
    faces
}

fn generate_mesh(params: &KnotParams, resolution: KnotResolution) -> Mesh {
    let KnotResolution { u_steps, v_steps } = resolution;

    let mut grid = Vec::with_capacity(u_steps * v_steps);
    for i in 0..u_steps {
        let u = TAU * i as f64 / u_steps as f64;
        let frame = centerline_frame(params, u);
        for j in 0..v_steps {
            let (sin_v, cos_v) = (TAU * j as f64 / v_steps as f64).sin_cos();
            let offset = frame.normal * cos_v + frame.binormal * sin_v;
            grid.push(frame.center + offset * params.tube_radius);
        }
    }

    let faces = grid_faces(u_steps, v_steps);
    let mut mesh = Mesh::with_capacity(faces.len());
    for face in faces {
        mesh.add_triangle(Triangle::new(face.map(|(i, j)| grid[i * v_steps + j])));
    }
    mesh
}
