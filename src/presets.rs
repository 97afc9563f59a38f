//! Ready-made effects.
//!
//! | Effect | Kind | Look |
//! |--------|------|------|
//! | [`fire`] | system | Rising flames with grey smoke growing above them |
//! | [`sparks`] | group | Pink sparks bursting in every direction |
//! | [`water`] | group | Blue droplets falling and spreading |
//!
//! [`library`] returns all three in the order the sandbox cycles through them.
//!
//! ```ignore
//! let mut scene = ParticleSystem::new();
//! scene.add("campfire", &presets::fire().into(), Placement::at(Vec2::new(400.0, 500.0)));
//! ```

use crate::color::Color;
use crate::group::{FalloffSpan, GroupParams, ParticleGroup};
use crate::particle::ParticleShape;
use crate::sampling::{Span, Span2};
use crate::system::{Effect, ParticleSystem};
use glam::Vec2;

pub const FLAMES_COLORS: [Color; 5] = [
    Color::rgb(255, 0, 0),
    Color::rgb(255, 100, 50),
    Color::rgb(184, 15, 10),
    Color::rgb(255, 100, 100),
    Color::rgb(255, 50, 50),
];

pub const SMOKE_COLORS: [Color; 4] = [
    Color::rgb(100, 100, 100),
    Color::rgb(150, 150, 150),
    Color::rgb(50, 50, 50),
    Color::rgb(0, 0, 0),
];

pub const WATER_COLORS: [Color; 4] = [
    Color::rgb(0, 0, 255),
    Color::rgb(0, 100, 255),
    Color::rgb(50, 0, 255),
    Color::rgb(50, 50, 255),
];

pub const SPARKS_COLORS: [Color; 5] = [
    Color::rgb(255, 0, 100),
    Color::rgb(255, 100, 150),
    Color::rgb(184, 15, 110),
    Color::rgb(255, 100, 200),
    Color::rgb(255, 50, 150),
];

/// Shorthand for a `(x, y)` pair of spans.
fn span2(x: [f32; 2], y: [f32; 2]) -> Span2 {
    Span2::new(x.into(), y.into())
}

/// Red and orange tongues that drift upward and shrink away.
pub fn flames() -> ParticleGroup {
    ParticleGroup::new(GroupParams {
        position: span2([-10.0, 10.0], [2.0, 7.0]),
        size: Span::new(5.0, 15.0),
        velocity: span2([-0.5, 0.5], [-3.0, -1.0]),
        colors: FLAMES_COLORS.to_vec(),
        alpha: Span::new(50.0, 80.0),
        size_decay: FalloffSpan::new(Span::fixed(0.0), Span::new(0.5, 1.0)),
        alpha_decay: FalloffSpan::new(Span::fixed(0.0), Span::fixed(0.0)),
        density: 1.0,
        shape: ParticleShape::Circle,
    })
}

/// Faint grey puffs that grow as they rise and fade out.
pub fn smoke() -> ParticleGroup {
    ParticleGroup::new(GroupParams {
        position: span2([-10.0, 10.0], [-10.0, -50.0]),
        size: Span::new(15.0, 20.0),
        velocity: span2([-1.0, 1.0], [-2.0, -1.0]),
        colors: SMOKE_COLORS.to_vec(),
        alpha: Span::new(1.0, 10.0),
        // Negative decay: smoke expands
        size_decay: FalloffSpan::new(Span::fixed(0.0), Span::new(-0.1, -0.3)),
        alpha_decay: FalloffSpan::new(Span::fixed(0.015), Span::fixed(0.0005)),
        density: 0.5,
        shape: ParticleShape::Circle,
    })
}

/// Flames with smoke 50 px above them, at 150%.
pub fn fire() -> ParticleSystem {
    let mut fire = ParticleSystem::new()
        .with("flames", flames(), Vec2::ZERO)
        .with("smoke", smoke(), Vec2::new(0.0, -50.0));
    fire.resize(150.0, false);
    fire
}

/// Blue droplets falling from the spawn point, at 200%.
pub fn water() -> ParticleGroup {
    let mut water = ParticleGroup::new(GroupParams {
        position: span2([-25.0, 25.0], [0.0, 25.0]),
        size: Span::new(10.0, 20.0),
        velocity: span2([-1.0, 1.0], [1.0, 3.0]),
        colors: WATER_COLORS.to_vec(),
        alpha: Span::new(30.0, 50.0),
        size_decay: FalloffSpan::new(Span::fixed(0.0), Span::new(0.15, 0.3)),
        alpha_decay: FalloffSpan::new(Span::fixed(0.0), Span::fixed(0.0001)),
        density: 0.5,
        shape: ParticleShape::Circle,
    });
    water.resize(200.0);
    water
}

/// Pink sparks scattering in all directions, at 225%.
pub fn sparks() -> ParticleGroup {
    let mut sparks = ParticleGroup::new(GroupParams {
        position: span2([-10.0, 10.0], [-10.0, 10.0]),
        size: Span::new(5.0, 10.0),
        velocity: span2([-2.0, 2.0], [-2.0, 2.0]),
        colors: SPARKS_COLORS.to_vec(),
        alpha: Span::new(30.0, 50.0),
        size_decay: FalloffSpan::new(Span::fixed(0.0), Span::new(0.375, 0.5)),
        alpha_decay: FalloffSpan::new(Span::fixed(0.0), Span::new(0.0001, 0.00025)),
        density: 1.0,
        shape: ParticleShape::Circle,
    });
    sparks.resize(225.0);
    sparks
}

/// The built-in effects, in selection order.
pub fn library() -> Vec<(String, Effect)> {
    vec![
        ("fire".to_string(), fire().into()),
        ("sparks".to_string(), sparks().into()),
        ("water".to_string(), water().into()),
    ]
}
