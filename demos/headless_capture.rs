//! Render a scripted stroke without opening a window
//!
//! Run with: cargo run --example headless_capture [output.png]
//!
//! Drags across the canvas with each built-in effect in turn, then saves the
//! last frame as a PNG.

use sparkfx::prelude::*;
use tracing_subscriber::EnvFilter;

const WIDTH: u32 = 960;
const HEIGHT: u32 = 540;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "captures/headless.png".to_string());

    let mut sandbox = Sandbox::new(SandboxConfig {
        width: WIDTH,
        height: HEIGHT,
        seed: Some(2024),
        ..Default::default()
    })?;
    let mut frame = Framebuffer::new(WIDTH, HEIGHT);
    let mut input = Input::new();

    // One horizontal stroke per effect, stacked top to bottom
    let effects = sandbox.effect_names().count();
    for lane in 0..effects {
        let y = HEIGHT as f32 * (lane as f32 + 0.75) / (effects as f32 + 0.5);
        input.move_cursor(Vec2::new(100.0, y));
        input.press(MouseButton::Left);

        for step in 0..60 {
            let x = 100.0 + (WIDTH as f32 - 200.0) * step as f32 / 59.0;
            input.move_cursor(Vec2::new(x, y));
            sandbox.frame(&input, &mut frame);
            input.end_frame();
        }

        // Releasing is a click, which moves on to the next effect
        input.release(MouseButton::Left);
        sandbox.frame(&input, &mut frame);
        input.end_frame();
    }

    // Let the last strokes settle a little
    for _ in 0..10 {
        sandbox.frame(&input, &mut frame);
    }

    frame.save_png(&output)?;
    println!(
        "Saved {} ({} particles on screen)",
        output,
        sandbox.system().particle_count()
    );
    Ok(())
}
