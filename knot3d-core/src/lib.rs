/// knot3d Core Library - Torus-knot generation and software rasterization
///
/// This library provides the stateless core of the renderer: vector math,
/// parametric mesh generation, per-frame transforms with depth ordering and
/// back-face culling, flat shading and a z-buffered triangle rasterizer.
/// Frame timing and display are left to the frontends.

pub mod animation;
pub mod frame;
pub mod geometry;
pub mod knot;
pub mod projection;
pub mod raster;
pub mod shading;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use animation::{AnimationFrame, Animator};
pub use frame::FrameParams;
pub use geometry::{Mesh, Triangle};
pub use knot::{generate_or_update_mesh, KnotParams, KnotResolution, TorusKnot};
pub use projection::{Projection, Viewport};
pub use raster::{render_frame, DrawOutcome, FrameStats, Framebuffer, Rasterizer};
pub use shading::Rgb;
pub use transform::{RotationState, Transform};
pub use vector::{Vec3, VectorOps};
