//! # sparkfx - mouse-driven 2D particle effects
//!
//! Fire, sparks and water painted with the mouse, built from three pieces:
//!
//! - [`Particle`]: a dot that moves, shrinks and fades every frame.
//! - [`ParticleGroup`]: spawns particles from randomized parameters at a set
//!   density and retires them when they vanish.
//! - [`ParticleSystem`]: a named tree of groups and systems, each with its own
//!   offset and lifespan, driven as one.
//!
//! ## Quick Start
//!
//! ```ignore
//! use sparkfx::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sandbox = Sandbox::new(SandboxConfig::default())?;
//!     sandbox.run()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Composing Effects
//!
//! Effects are plain values. Adding one to a system clones it, so a preset can
//! be stamped down any number of times:
//!
//! ```ignore
//! let mut scene = ParticleSystem::new();
//! let fire: Effect = presets::fire().into();
//!
//! scene.add("left", &fire, Placement::at(Vec2::new(200.0, 400.0)));
//! scene.add("right", &fire, Placement::at(Vec2::new(600.0, 400.0)).lasting(60).scaled(50.0));
//!
//! let mut rng = rand::thread_rng();
//! let mut frame = Framebuffer::new(800, 600);
//! loop {
//!     scene.generate(Vec2::ZERO, &mut rng);
//!     scene.update();
//!     frame.fill(Color::BLACK);
//!     scene.draw(&mut frame);
//! }
//! ```
//!
//! ## Headless Rendering
//!
//! [`Sandbox::frame`] takes an [`Input`] and any [`Canvas`], so the whole
//! interactive loop runs without a window. Feed it synthetic input and save
//! the result with [`Framebuffer::save_png`].
//!
//! ## Configuration
//!
//! [`SandboxConfig`] and [`LibraryConfig`] load from JSON; see the
//! [`config`] module for the format.

pub mod canvas;
pub mod color;
pub mod config;
pub mod error;
pub mod gpu;
pub mod group;
pub mod input;
pub mod particle;
pub mod presets;
pub mod sampling;
mod sandbox;
pub mod system;
pub mod time;
mod window;

pub use canvas::{Canvas, Framebuffer};
pub use color::Color;
pub use config::{EffectConfig, LibraryConfig, SandboxConfig};
pub use error::{CaptureError, ConfigError, GpuError, RunError};
pub use glam::Vec2;
pub use group::{GroupParams, Lifespan, ParticleGroup};
pub use input::{Input, KeyCode, MouseButton};
pub use particle::{Falloff, Particle, ParticleShape};
pub use sandbox::Sandbox;
pub use sampling::{Span, Span2};
pub use system::{Effect, ParticleSystem, Placement};
pub use time::FrameClock;

/// Convenient imports for building and driving effects.
///
/// ```ignore
/// use sparkfx::prelude::*;
/// ```
pub mod prelude {
    pub use crate::canvas::{Canvas, Framebuffer};
    pub use crate::color::Color;
    pub use crate::config::{EffectConfig, LibraryConfig, SandboxConfig};
    pub use crate::group::{FalloffSpan, GroupParams, Lifespan, ParticleGroup};
    pub use crate::input::{Input, KeyCode, MouseButton};
    pub use crate::particle::{Falloff, Particle, ParticleShape};
    pub use crate::presets;
    pub use crate::sampling::{Span, Span2};
    pub use crate::system::{Effect, ParticleSystem, Placement};
    pub use crate::time::FrameClock;
    pub use crate::Sandbox;
    pub use crate::Vec2;
}
