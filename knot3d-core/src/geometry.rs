/// Geometry primitives for 3D rendering
use crate::vector::{Vec3, VectorOps};

/// A triangle face defined by three vertices.
///
/// The vertex order fixes the winding, and with it the direction of the face
/// normal. The normal is derived once in [`Triangle::new`]; there is no way to
/// change it without building a new triangle from new vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    vertices: [Vec3; 3],
    normal: Vec3,
}

impl Triangle {
    pub fn new(vertices: [Vec3; 3]) -> Self {
        let normal = Self::calculate_normal(&vertices);
        Self { vertices, normal }
    }

    /// Calculate the face normal from the vertex winding
    fn calculate_normal(vertices: &[Vec3; 3]) -> Vec3 {
        let edge1 = vertices[1] - vertices[0];
        let edge2 = vertices[2] - vertices[0];

        edge1.cross(&edge2).normalize_or_zero()
    }

    pub fn vertices(&self) -> &[Vec3; 3] {
        &self.vertices
    }

    /// Unit face normal, or zero for a degenerate triangle
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Mean z of the three vertices. This is a sort key, not a per-pixel depth.
    pub fn average_depth(&self) -> f64 {
        (self.vertices[0].z + self.vertices[1].z + self.vertices[2].z) / 3.0
    }

    /// Build a new triangle by mapping every vertex, re-deriving the normal
    pub fn map_vertices(&self, f: impl Fn(Vec3) -> Vec3) -> Self {
        Self::new(self.vertices.map(f))
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Axis-aligned cube centred on the origin, wound so that normals point outward
    pub fn cube(size: f64) -> Self {
        let h = size / 2.0;
        let corner = |x: f64, y: f64, z: f64| Vec3::new(x * h, y * h, z * h);

        // Each face as a counter-clockwise quad seen from outside
        let faces = [
            [corner(-1.0, -1.0, 1.0), corner(1.0, -1.0, 1.0), corner(1.0, 1.0, 1.0), corner(-1.0, 1.0, 1.0)],
            [corner(1.0, -1.0, -1.0), corner(-1.0, -1.0, -1.0), corner(-1.0, 1.0, -1.0), corner(1.0, 1.0, -1.0)],
            [corner(-1.0, 1.0, 1.0), corner(1.0, 1.0, 1.0), corner(1.0, 1.0, -1.0), corner(-1.0, 1.0, -1.0)],
            [corner(-1.0, -1.0, -1.0), corner(1.0, -1.0, -1.0), corner(1.0, -1.0, 1.0), corner(-1.0, -1.0, 1.0)],
            [corner(1.0, -1.0, 1.0), corner(1.0, -1.0, -1.0), corner(1.0, 1.0, -1.0), corner(1.0, 1.0, 1.0)],
            [corner(-1.0, -1.0, -1.0), corner(-1.0, -1.0, 1.0), corner(-1.0, 1.0, 1.0), corner(-1.0, 1.0, -1.0)],
        ];

        let mut mesh = Self::with_capacity(12);
        for [a, b, c, d] in faces {
            mesh.add_triangle(Triangle::new([a, b, c]));
            mesh.add_triangle(Triangle::new([a, c, d]));
        }
        mesh
    }
}
