//! A single particle and its per-frame kinematics.
//!
//! Particles move in a straight line and decay every frame. Each decay is a
//! [`Falloff`]: a proportional part (fraction of the current value) plus a
//! constant part, so `Falloff { rate: 0.015, linear: 0.0005 }` makes smoke fade
//! fast while bright and slowly once it is nearly transparent.
//!
//! Small particles move faster than their sampled velocity suggests: every
//! particle carries a boost computed once from its birth size, which gives
//! effects their "fine sparks fly further" look.

use crate::canvas::Canvas;
use crate::color::Color;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Shape used to draw a particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleShape {
    /// Filled circle with radius equal to the particle size (default).
    #[default]
    Circle,
    /// Filled square centered on the particle, half-extent equal to its size.
    Square,
}

/// Per-frame decay: `value -= rate * value + linear`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Falloff {
    /// Fraction of the current value lost each frame.
    pub rate: f32,
    /// Constant amount lost each frame.
    pub linear: f32,
}

impl Falloff {
    pub const NONE: Falloff = Falloff { rate: 0.0, linear: 0.0 };

    pub const fn new(rate: f32, linear: f32) -> Self {
        Self { rate, linear }
    }

    /// Value after one frame of decay.
    #[inline]
    pub fn apply(&self, value: f32) -> f32 {
        value - (self.rate * value + self.linear)
    }
}

/// Logistic curve with steepness `1/k`.
#[inline]
pub fn sigmoid(x: f32, k: f32) -> f32 {
    1.0 / (1.0 + (-x / k).exp())
}

/// Extra speed multiplier for a particle born with `size`.
///
/// Tends to 0 for large particles; non-positive sizes get no boost.
pub fn boost_for_size(size: f32) -> f32 {
    if size <= 0.0 {
        return 0.0;
    }
    10.0 * (1.0 - sigmoid(size, 10.0)) / size
}

/// One particle: a colored dot that moves, shrinks and fades.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub size: f32,
    pub velocity: Vec2,
    pub color: Color,
    /// Opacity, 0-1.
    pub alpha: f32,
    pub size_decay: Falloff,
    pub alpha_decay: Falloff,
    pub shape: ParticleShape,
    boost: f32,
}

impl Particle {
    /// Create a particle. The speed boost is fixed from `size` here.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        position: Vec2,
        size: f32,
        velocity: Vec2,
        color: Color,
        alpha: f32,
        size_decay: Falloff,
        alpha_decay: Falloff,
        shape: ParticleShape,
    ) -> Self {
        Self {
            position,
            size,
            velocity,
            color,
            alpha,
            size_decay,
            alpha_decay,
            shape,
            boost: boost_for_size(size),
        }
    }

    /// Speed multiplier applied on top of the velocity.
    pub fn boost(&self) -> f32 {
        self.boost
    }

    /// Advance one frame: move, shrink, fade.
    pub fn update(&mut self) {
        self.position += self.velocity + self.velocity * self.boost;
        self.size = self.size_decay.apply(self.size);
        self.alpha = self.alpha_decay.apply(self.alpha);
    }

    /// A particle with no size or no opacity left is finished.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.size > 0.0 && self.alpha > 0.0
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        match self.shape {
            ParticleShape::Circle => {
                canvas.fill_circle(self.position, self.size, self.color, self.alpha)
            }
            ParticleShape::Square => canvas.fill_rect(
                self.position - Vec2::splat(self.size),
                Vec2::splat(self.size * 2.0),
                self.color,
                self.alpha,
            ),
        }
    }
}
