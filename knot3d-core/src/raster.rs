/// Software rasterizer: color and depth buffers, triangle fill, frame rendering
use crate::frame::FrameParams;
use crate::geometry::{Mesh, Triangle};
use crate::projection::{Projection, Viewport};
use crate::shading::{shade, Rgb};
use crate::transform::{is_front_facing, Transform};
use crate::vector::Vec3;

/// Barycentric denominators below this mark a zero-area triangle
const DEGENERATE_EPSILON: f64 = 1e-10;

/// Co-indexed, row-major color and depth grids
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    colors: Vec<Rgb>,
    depths: Vec<f64>,
}

impl Framebuffer {
    pub const BACKGROUND: Rgb = Rgb::BLACK;

    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            colors: vec![Self::BACKGROUND; size],
            depths: vec![f64::INFINITY; size],
        }
    }

    /// Reset every cell to the background color and infinite depth
    pub fn clear(&mut self) {
        self.colors.fill(Self::BACKGROUND);
        self.depths.fill(f64::INFINITY);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn depths(&self) -> &[f64] {
        &self.depths
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        self.index(x, y).map(|idx| self.colors[idx])
    }

    pub fn depth(&self, x: usize, y: usize) -> Option<f64> {
        self.index(x, y).map(|idx| self.depths[idx])
    }

    /// Color rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Rgb]> {
        self.colors.chunks(self.width.max(1))
    }

    /// Write `color` if `depth` is strictly nearer than the stored depth.
    /// Returns whether the cell was written.
    pub fn set_pixel_with_depth(&mut self, x: usize, y: usize, depth: f64, color: Rgb) -> bool {
        match self.index(x, y) {
            Some(idx) if depth < self.depths[idx] => {
                self.depths[idx] = depth;
                self.colors[idx] = color;
                true
            }
            _ => false,
        }
    }

    /// The color grid as RGBA bytes with opaque alpha
    pub fn to_rgba(&self) -> Vec<u8> {
        self.colors
            .iter()
            .flat_map(|c| [c.r, c.g, c.b, u8::MAX])
            .collect()
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }
}

/// Calculate barycentric coordinates of `p` in the 2D triangle `(v0, v1, v2)`.
///
/// Returns `None` when the triangle has (numerically) zero area.
pub fn barycentric(v0: (f64, f64), v1: (f64, f64), v2: (f64, f64), p: (f64, f64)) -> Option<(f64, f64, f64)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < DEGENERATE_EPSILON {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

/// Inside test on the xy components of a projected triangle, edges included
pub fn contains(projected: &[Vec3; 3], p: (f64, f64)) -> bool {
    let [a, b, c] = projected;
    matches!(
        barycentric((a.x, a.y), (b.x, b.y), (c.x, c.y), p),
        Some((w0, w1, w2)) if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
    )
}

/// What happened to a single triangle handed to the rasterizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    /// A vertex sits on or behind the eye plane
    BehindEye,
    /// Brightness fell below the visibility cut-off. Never happens with the
    /// current ambient floor, which keeps every face at or above
    /// `MIN_INTENSITY`.
    TooDark,
    /// Zero projected area
    Degenerate,
    /// Filled; `pixels` cells passed the depth test
    Drawn { pixels: usize },
}

/// Per-frame counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub transformed: usize,
    pub back_facing: usize,
    pub behind_eye: usize,
    pub too_dark: usize,
    pub degenerate: usize,
    pub drawn: usize,
    pub pixels_written: usize,
}

impl FrameStats {
    fn record(&mut self, outcome: DrawOutcome) {
        match outcome {
            DrawOutcome::BehindEye => self.behind_eye += 1,
            DrawOutcome::TooDark => self.too_dark += 1,
            DrawOutcome::Degenerate => self.degenerate += 1,
            DrawOutcome::Drawn { pixels } => {
                self.drawn += 1;
                self.pixels_written += pixels;
            }
        }
    }
}

/// Owns a framebuffer and draws transformed meshes into it.
///
/// Depth testing uses one depth per triangle (its average z), not a per-pixel
/// interpolated depth. Triangles that intersect each other can therefore
/// resolve to the wrong face near the intersection.
pub struct Rasterizer {
    framebuffer: Framebuffer,
    viewport: Viewport,
}

impl Rasterizer {
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_viewport(width, height, Viewport::default())
    }

    pub fn with_viewport(width: usize, height: usize, viewport: Viewport) -> Self {
        Self {
            framebuffer: Framebuffer::new(width, height),
            viewport,
        }
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn into_framebuffer(self) -> Framebuffer {
        self.framebuffer
    }

    pub fn clear(&mut self) {
        self.framebuffer.clear();
    }

    /// Clear, then transform, order, cull and draw `mesh` for one frame
    pub fn render(&mut self, mesh: &Mesh, frame: &FrameParams) -> FrameStats {
        self.clear();

        let triangles = Transform::to_camera_space(mesh, &frame.rotation, frame.position, frame.camera);
        let mut stats = FrameStats {
            transformed: triangles.len(),
            ..FrameStats::default()
        };

        for triangle in &triangles {
            if !is_front_facing(triangle) {
                stats.back_facing += 1;
                continue;
            }
            stats.record(self.draw_triangle(triangle, frame));
        }

        stats
    }

    /// Project, shade and fill one camera-space triangle
    pub fn draw_triangle(&mut self, triangle: &Triangle, frame: &FrameParams) -> DrawOutcome {
        let projection = Projection::new(frame.zoom);
        let Some(projected) = projection.project_triangle(triangle.vertices()) else {
            return DrawOutcome::BehindEye;
        };

        let Some(color) = shade(&triangle.normal(), &frame.light_direction, frame.color_shift) else {
            return DrawOutcome::TooDark;
        };

        self.fill_triangle(&projected, triangle.average_depth(), color)
    }

    /// Fill a projected triangle with a flat color at a single depth
    pub fn fill_triangle(&mut self, projected: &[Vec3; 3], depth: f64, color: Rgb) -> DrawOutcome {
        let [a, b, c] = projected;
        let (v0, v1, v2) = ((a.x, a.y), (b.x, b.y), (c.x, c.y));
        if barycentric(v0, v1, v2, v0).is_none() {
            return DrawOutcome::Degenerate;
        }

        let width = self.framebuffer.width;
        let height = self.framebuffer.height;

        let min_x = a.x.min(b.x).min(c.x);
        let max_x = a.x.max(b.x).max(c.x);
        let min_y = a.y.min(b.y).min(c.y);
        let max_y = a.y.max(b.y).max(c.y);

        // Truncate toward zero, then clip to the grid
        let (grid_min_x, grid_min_y) = self.viewport.to_grid(min_x, min_y, width, height);
        let (grid_max_x, grid_max_y) = self.viewport.to_grid(max_x, max_y, width, height);
        let start_x = (grid_min_x as i64).max(0);
        let end_x = (grid_max_x as i64).min(width as i64 - 1);
        let start_y = (grid_min_y as i64).max(0);
        let end_y = (grid_max_y as i64).min(height as i64 - 1);

        let mut pixels = 0;
        for y in start_y..=end_y {
            for x in start_x..=end_x {
                let (x, y) = (x as usize, y as usize);
                let sample = self.viewport.to_plane(x, y, width, height);
                if contains(projected, sample) && self.framebuffer.set_pixel_with_depth(x, y, depth, color) {
                    pixels += 1;
                }
            }
        }

        DrawOutcome::Drawn { pixels }
    }
}

/// Render one frame of `mesh` into a fresh `width × height` framebuffer
pub fn render_frame(mesh: &Mesh, frame: &FrameParams, width: usize, height: usize) -> Framebuffer {
    let mut rasterizer = Rasterizer::new(width, height);
    rasterizer.render(mesh, frame);
    rasterizer.into_framebuffer()
}
