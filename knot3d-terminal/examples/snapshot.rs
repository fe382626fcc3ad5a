/// Example: Print a single animation frame to stdout
///
/// Usage: cargo run --example snapshot -- [frame] [width] [height]

use std::env;
use std::io::{self, Write};
use knot3d_core::{generate_or_update_mesh, Animator};
use knot3d_terminal::TerminalRenderer;

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();
    let arg = |index: usize, default: usize| -> io::Result<usize> {
        match args.get(index) {
            Some(value) => value.parse().map_err(|e| {
                io::Error::new(io::ErrorKind::InvalidInput, format!("Invalid argument '{}': {}", value, e))
            }),
            None => Ok(default),
        }
    };

    let target = arg(1, 0)? as u64;
    let width = arg(2, 120)?;
    let height = arg(3, 60)?;

    // Replay the animation so accumulated state (light, rotation, mesh) matches
    let mut animator = Animator::new();
    // Frame 0 is always due for a rebuild, so the first step builds the mesh
    let mut frame = animator.next_frame();
    let mut knot = generate_or_update_mesh(None, frame.knot);
    while frame.index < target {
        frame = animator.next_frame();
        if frame.regenerate_due {
            knot = generate_or_update_mesh(Some(knot), frame.knot);
        }
    }

    let mut renderer = TerminalRenderer::new(width, height);
    let stats = renderer.render_mesh(knot.mesh(), &frame.params);

    let mut stdout = io::stdout();
    renderer.print(&mut stdout)?;
    writeln!(
        stdout,
        "frame {} | knot ({},{}) | drawn {}/{} triangles, {} pixels",
        frame.index,
        knot.params().p,
        knot.params().q,
        stats.drawn,
        stats.transformed,
        stats.pixels_written
    )?;
    stdout.flush()
}
