/// knot3d Terminal Demo - Animated Torus Knot
///
/// Renders the procedurally animated torus knot in the terminal.
/// Controls:
///   - Space: Pause / resume auto-rotation
///   - WASD / Arrow Keys: Rotate the knot
///   - E/R: Roll rotation
///   - Q/ESC/Ctrl+C: Quit

use std::env;
use std::process::ExitCode;
use knot3d_terminal::{AppError, Command, Config, TerminalApp, USAGE};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::Config(e)) => {
            eprintln!("error: {}\n\n{}", e, USAGE);
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), AppError> {
    let config = match Config::from_args(env::args().skip(1))? {
        Command::Run(config) => config,
        Command::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
    };

    println!("knot3d Terminal Renderer - Loading...");
    let mut app = TerminalApp::new(config)?;
    let knot = app.knot_params();
    println!(
        "Starting torus knot ({},{}) R={:.2} r={:.2} (press Q to quit)...",
        knot.p, knot.q, knot.radius, knot.tube_radius
    );
    std::thread::sleep(std::time::Duration::from_secs(1));

    app.run()?;

    println!(
        "Thanks for watching the 3D torus knot! ({} frames)",
        app.frames_rendered()
    );
    Ok(())
}
