/// Half-block color output of the rasterized frame
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use knot3d_core::{FrameParams, FrameStats, Framebuffer, Mesh, Rasterizer, Rgb};

/// Upper half block: foreground paints the top pixel, background the bottom one
const HALF_BLOCK: char = '▀';

/// Rasterizes meshes and writes the color grid to a terminal, two pixel rows
/// per text line
pub struct TerminalRenderer {
    rasterizer: Rasterizer,
}

impl TerminalRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            rasterizer: Rasterizer::new(width, height),
        }
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        self.rasterizer.framebuffer()
    }

    /// Number of text lines the image occupies
    pub fn text_lines(&self) -> usize {
        self.framebuffer().height().div_ceil(2)
    }

    pub fn render_mesh(&mut self, mesh: &Mesh, frame: &FrameParams) -> FrameStats {
        self.rasterizer.render(mesh, frame)
    }

    /// Draw the image with its top-left corner at text row `top`. Lines that
    /// would land past the last addressable terminal row are skipped.
    pub fn draw<W: Write>(&self, writer: &mut W, top: u16) -> std::io::Result<()> {
        // MoveTo converts to a 1-based row, so u16::MAX itself is unusable
        for (line, row) in (0..self.text_lines()).zip(top..u16::MAX) {
            writer.queue(cursor::MoveTo(0, row))?;
            self.draw_line(writer, line)?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }

    /// Print the image as plain lines, for output that is not a full-screen UI
    pub fn print<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for line in 0..self.text_lines() {
            self.draw_line(writer, line)?;
            writer.queue(ResetColor)?;
            writer.queue(Print('\n'))?;
        }
        Ok(())
    }

    fn draw_line<W: Write>(&self, writer: &mut W, line: usize) -> std::io::Result<()> {
        let fb = self.framebuffer();
        let mut current: Option<(Rgb, Rgb)> = None;

        for x in 0..fb.width() {
            let top = fb.pixel(x, line * 2).unwrap_or(Framebuffer::BACKGROUND);
            let bottom = fb.pixel(x, line * 2 + 1).unwrap_or(Framebuffer::BACKGROUND);

            // Only emit color changes
            if current != Some((top, bottom)) {
                writer.queue(SetForegroundColor(to_color(top)))?;
                writer.queue(SetBackgroundColor(to_color(bottom)))?;
                current = Some((top, bottom));
            }
            writer.queue(Print(HALF_BLOCK))?;
        }
        Ok(())
    }
}

pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use knot3d_core::{KnotParams, TorusKnot};

    #[test]
    fn test_odd_height_rounds_up() {
        assert_eq!(TerminalRenderer::new(10, 7).text_lines(), 4);
        assert_eq!(TerminalRenderer::new(10, 60).text_lines(), 30);
    }

    #[test]
    fn test_print_emits_one_line_per_row_pair() {
        let knot = TorusKnot::new(KnotParams::new(3, 2, 1.5, 0.3));
        let mut renderer = TerminalRenderer::new(24, 12);
        let stats = renderer.render_mesh(knot.mesh(), &FrameParams::default());
        assert!(stats.drawn > 0);

        let mut out = Vec::new();
        renderer.print(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches('\n').count(), 6);
        assert_eq!(text.matches(HALF_BLOCK).count(), 24 * 6);
    }

    #[test]
    fn test_draw_stops_at_last_terminal_row() {
        let renderer = TerminalRenderer::new(1, 131_072);
        assert_eq!(renderer.text_lines(), 65_536);

        let mut out = Vec::new();
        renderer.draw(&mut out, 1).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches(HALF_BLOCK).count(), u16::MAX as usize - 1);
    }

    #[test]
    fn test_to_color() {
        assert_eq!(
            to_color(Rgb::new(1, 2, 3)),
            Color::Rgb { r: 1, g: 2, b: 3 }
        );
    }
}
