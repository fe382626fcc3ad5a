/// knot3d Web - WASM wrapper around the software renderer
///
/// The animation is rasterized on the CPU exactly as in the terminal frontend;
/// each call to `render` hands back the frame as RGBA bytes ready for an
/// `ImageData` on a canvas.

use knot3d_core::{animation::knot_at, Animator, FrameStats, Rasterizer, TorusKnot};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WebRenderer {
    animator: Animator,
    knot: TorusKnot,
    rasterizer: Rasterizer,
    stats: FrameStats,
}

#[wasm_bindgen]
impl WebRenderer {
    #[wasm_bindgen(constructor)]
    pub fn new(width: usize, height: usize) -> WebRenderer {
        WebRenderer {
            animator: Animator::new(),
            knot: TorusKnot::new(knot_at(0.0)),
            rasterizer: Rasterizer::new(width, height),
            stats: FrameStats::default(),
        }
    }

    pub fn width(&self) -> usize {
        self.rasterizer.framebuffer().width()
    }

    pub fn height(&self) -> usize {
        self.rasterizer.framebuffer().height()
    }

    /// Index of the next frame `render` will produce
    pub fn frame(&self) -> u64 {
        self.animator.frame()
    }

    /// Triangles that reached the framebuffer in the last frame
    pub fn drawn(&self) -> usize {
        self.stats.drawn
    }

    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.animator.set_auto_rotate(enabled);
    }

    /// Rotate the knot by the given angles (radians)
    pub fn rotate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.animator.nudge(dx, dy, dz);
    }

    /// Advance one frame and return it as row-major RGBA
    pub fn render(&mut self) -> Vec<u8> {
        let frame = self.animator.next_frame();
        if frame.regenerate_due {
            if let Some(knot) = self.knot.regenerated(frame.knot) {
                self.knot = knot;
            }
        }

        self.stats = self.rasterizer.render(self.knot.mesh(), &frame.params);
        self.rasterizer.framebuffer().to_rgba()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_returns_rgba_frame() {
        let mut renderer = WebRenderer::new(32, 16);
        let pixels = renderer.render();
        assert_eq!(pixels.len(), 32 * 16 * 4);
        assert!(pixels.chunks(4).all(|px| px[3] == 255));
        assert!(pixels.chunks(4).any(|px| px[..3] != [0, 0, 0]));
        assert_eq!(renderer.frame(), 1);
        assert!(renderer.drawn() > 0);
    }

    #[test]
    fn test_rotate_changes_image() {
        let mut still = WebRenderer::new(32, 16);
        still.set_auto_rotate(false);
        let mut turned = WebRenderer::new(32, 16);
        turned.set_auto_rotate(false);
        turned.rotate(0.0, 1.0, 0.0);

        assert_ne!(still.render(), turned.render());
    }
}
