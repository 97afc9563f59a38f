//! Paint fire, sparks and water with the mouse
//!
//! Run with: cargo run --example playground [config.json]
//!
//! Press and drag to paint, click to switch effect, `1`-`9` to pick one,
//! `Space` to pause, `C` to clear, `S` to save a screenshot.
//! Set `RUST_LOG=sparkfx=debug` to watch effects come and go.

use sparkfx::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => SandboxConfig::load(path)?,
        None => SandboxConfig::default(),
    };

    Sandbox::new(config)?.run()?;
    Ok(())
}
