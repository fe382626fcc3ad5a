/// Deterministic animation paths driving the knot demo
use crate::frame::FrameParams;
use crate::knot::KnotParams;
use crate::transform::RotationState;
use crate::vector::{Vec3, VectorOps};

/// Knot parameter updates are only offered every this many frames
pub const REGENERATE_INTERVAL: u64 = 10;

/// Rotation added after every frame while auto-rotate is on
pub const AUTO_ROTATION: (f64, f64, f64) = (0.02, 0.03, 0.015);

/// Inputs for one frame as produced by [`Animator::next_frame`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    pub index: u64,
    /// Where the knot shape should be at this frame
    pub knot: KnotParams,
    /// Whether the driver should offer `knot` to the mesh generator this frame
    pub regenerate_due: bool,
    pub params: FrameParams,
}

/// Time-driven camera, light, zoom, color and shape animation.
///
/// Everything except the light angle and rotation is a closed-form function of
/// the frame index; those two accumulate.
#[derive(Debug, Clone)]
pub struct Animator {
    frame: u64,
    rotation: RotationState,
    light_angle: f64,
    auto_rotate: bool,
}

impl Animator {
    pub fn new() -> Self {
        Self {
            frame: 0,
            rotation: RotationState::zero(),
            light_angle: 0.0,
            auto_rotate: true,
        }
    }

    /// Index of the next frame to be produced
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.auto_rotate = enabled;
    }

    pub fn toggle_auto_rotate(&mut self) {
        self.auto_rotate = !self.auto_rotate;
    }

    /// Manual rotation on top of the automatic one
    pub fn nudge(&mut self, dx: f64, dy: f64, dz: f64) {
        self.rotation.rotate(dx, dy, dz);
    }

    /// Produce the inputs for the current frame and advance to the next one
    pub fn next_frame(&mut self) -> AnimationFrame {
        let index = self.frame;
        let f = index as f64;
        let time = f * 0.01;

        let zoom = 1.0 + 0.5 * (time * 0.3).sin();

        let camera_time = f * 0.005;
        let camera = Vec3::new(
            camera_time.cos() * (2.0 + (time * 0.15).sin()),
            (camera_time * 0.7).sin() * (1.0 + 0.5 * (time * 0.12).cos()),
            (camera_time * 0.3).sin() * (1.0 + 0.3 * (time * 0.18).sin()),
        );

        let light_radius = 3.0 + (time * 0.4).sin() * 1.5;
        self.light_angle += 0.04 + 0.02 * (time * 0.08).sin();
        let angle = self.light_angle;
        let light_direction = Vec3::new(
            angle.cos() * light_radius,
            (angle * 0.7).sin() * (2.0 + (time * 0.3).cos()),
            (angle * 1.3).sin() * 2.0 - (5.0 + (time * 0.2).sin()),
        )
        .normalize_or_zero();

        let position = Vec3::new(
            (f * 0.02).sin() * 0.5,
            (f * 0.015).cos() * 0.3,
            (f * 0.01).sin() * 0.2,
        );

        let params = FrameParams {
            rotation: self.rotation,
            position,
            camera,
            light_direction,
            zoom,
            color_shift: (time * 0.2).rem_euclid(1.0),
        };

        let frame = AnimationFrame {
            index,
            knot: knot_at(time),
            regenerate_due: index % REGENERATE_INTERVAL == 0,
            params,
        };

        if self.auto_rotate {
            let (dx, dy, dz) = AUTO_ROTATION;
            self.rotation.rotate(dx, dy, dz);
        }
        self.frame += 1;

        frame
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new()
    }
}

/// Slowly drifting knot shape; winding numbers step between small integers
pub fn knot_at(time: f64) -> KnotParams {
    // Casts truncate toward zero
    let p = 3 + ((time * 0.05).sin() * 1.5) as i32;
    let q = 2 + (time * 0.03).cos() as i32;

    KnotParams {
        p: p.max(1) as u32,
        q: q.max(1) as u32,
        radius: 1.5 + 0.3 * (time * 0.08).sin(),
        tube_radius: 0.3 + 0.1 * (time * 0.06).cos(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame() {
        let mut animator = Animator::new();
        let frame = animator.next_frame();
        assert_eq!(frame.index, 0);
        assert!(frame.regenerate_due);
        assert_eq!(frame.params.rotation, RotationState::zero());
        assert_eq!(frame.params.zoom, 1.0);
        assert_eq!(frame.params.color_shift, 0.0);
        // cos(0) == 1 truncates to 1
        assert_eq!(frame.knot, KnotParams::new(3, 3, 1.5, 0.4));
        assert_eq!(frame.params.camera, Vec3::new(2.0, 0.0, 0.0));
        assert!((frame.params.light_direction.norm() - 1.0).abs() < 1e-12);
        assert_eq!(animator.frame(), 1);
    }

    #[test]
    fn test_regeneration_interval() {
        let mut animator = Animator::new();
        let due: Vec<u64> = (0..35)
            .map(|_| animator.next_frame())
            .filter(|frame| frame.regenerate_due)
            .map(|frame| frame.index)
            .collect();
        assert_eq!(due, vec![0, 10, 20, 30]);
    }

    #[test]
    fn test_auto_rotation_accumulates() {
        let mut animator = Animator::new();
        animator.next_frame();
        let second = animator.next_frame();
        assert!((second.params.rotation.x - 0.02).abs() < 1e-12);
        assert!((second.params.rotation.y - 0.03).abs() < 1e-12);
        assert!((second.params.rotation.z - 0.015).abs() < 1e-12);
    }

    #[test]
    fn test_paused_rotation_still_accepts_nudges() {
        let mut animator = Animator::new();
        animator.toggle_auto_rotate();
        animator.next_frame();
        animator.nudge(0.1, 0.0, -0.1);
        let frame = animator.next_frame();
        assert_eq!(frame.params.rotation, RotationState::new(0.1, 0.0, -0.1));
    }

    #[test]
    fn test_knot_params_stay_in_range() {
        for step in 0..20_000 {
            let knot = knot_at(step as f64 * 0.37);
            assert!((2..=4).contains(&knot.p));
            assert!((1..=3).contains(&knot.q));
            assert!(knot.radius >= 1.2 - 1e-12 && knot.radius <= 1.8 + 1e-12);
            assert!(knot.tube_radius >= 0.2 - 1e-12 && knot.tube_radius <= 0.4 + 1e-12);
        }
    }

    #[test]
    fn test_zoom_and_color_shift_ranges() {
        let mut animator = Animator::new();
        for _ in 0..3000 {
            let frame = animator.next_frame();
            assert!((0.5..=1.5).contains(&frame.params.zoom));
            assert!((0.0..1.0).contains(&frame.params.color_shift));
        }
    }
}
