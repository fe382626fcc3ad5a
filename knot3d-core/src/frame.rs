/// Per-frame inputs to the render pipeline
use crate::transform::RotationState;
use crate::vector::Vec3;

/// Everything the pipeline needs to know about one frame.
///
/// The pipeline keeps no animation state of its own; the driver builds a new
/// `FrameParams` for every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    pub rotation: RotationState,
    /// Object translation applied after rotation
    pub position: Vec3,
    /// Camera position subtracted from every vertex
    pub camera: Vec3,
    /// Unit direction used for the Lambert term
    pub light_direction: Vec3,
    pub zoom: f64,
    /// Hue offset in turns, added to every face's hue
    pub color_shift: f64,
}

impl Default for FrameParams {
    fn default() -> Self {
        Self {
            rotation: RotationState::zero(),
            position: Vec3::zeros(),
            camera: Vec3::zeros(),
            light_direction: Vec3::new(0.0, 0.0, -1.0),
            zoom: 1.0,
            color_shift: 0.0,
        }
    }
}
