//! Particle groups: homogeneous collections that spawn, age and retire
//! particles.
//!
//! A [`ParticleGroup`] owns its particles and a set of [`GroupParams`]
//! describing how new ones are drawn. Every frame the owner calls
//! [`generate`](ParticleGroup::generate) to spawn, [`update`](ParticleGroup::update)
//! to age, and [`draw`](ParticleGroup::draw) to render.
//!
//! # Spawn Cadence
//!
//! | `density` | Behavior |
//! |-----------|----------|
//! | `>= 1` | `ceil(density)` particles every frame |
//! | `0 < d < 1` | one particle every `ceil(1 / d)` frames |
//!
//! # Lifespan
//!
//! Groups spawn forever by default. With [`Lifespan::Frames`] they spawn for
//! that many frames and then stop; once their last particle has faded they
//! report [`is_dead`](ParticleGroup::is_dead) and their parent system drops
//! them.

use crate::canvas::Canvas;
use crate::color::Color;
use crate::particle::{Falloff, Particle, ParticleShape};
use crate::sampling::{choose, Span, Span2};
use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How long a group keeps spawning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifespan {
    /// Spawn every cycle until deactivated (default).
    #[default]
    Infinite,
    /// Spawn for this many more frames.
    Frames(u32),
}

impl Lifespan {
    /// Whether a group with this lifespan may still spawn.
    pub fn allows_spawn(&self) -> bool {
        !matches!(self, Lifespan::Frames(0))
    }
}

/// Sampling ranges for a per-frame decay.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FalloffSpan {
    /// Fraction of the value lost per frame.
    pub rate: Span,
    /// Constant amount lost per frame. Scales with the group size.
    pub linear: Span,
}

impl FalloffSpan {
    pub const fn new(rate: Span, linear: Span) -> Self {
        Self { rate, linear }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Falloff {
        Falloff::new(self.rate.sample(rng), self.linear.sample(rng))
    }
}

/// Highest accepted density, in particles per frame.
pub const MAX_DENSITY: f32 = 10_000.0;

/// How a group draws new particles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupParams {
    /// Spawn position relative to the spawn point.
    pub position: Span2,
    pub size: Span,
    pub velocity: Span2,
    /// Each particle takes one of these at random.
    pub colors: Vec<Color>,
    /// Starting opacity in percent (0-100).
    pub alpha: Span,
    pub size_decay: FalloffSpan,
    pub alpha_decay: FalloffSpan,
    /// Particles per frame; below 1 means one particle every `ceil(1/density)` frames.
    pub density: f32,
    #[serde(default)]
    pub shape: ParticleShape,
}

impl GroupParams {
    /// Multiply every size-dependent range by `factor`.
    ///
    /// Proportional decay rates are unitless and stay as they are.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            position: self.position.scaled(factor),
            size: self.size.scaled(factor),
            velocity: self.velocity.scaled(factor),
            size_decay: FalloffSpan::new(self.size_decay.rate, self.size_decay.linear.scaled(factor)),
            alpha_decay: FalloffSpan::new(self.alpha_decay.rate, self.alpha_decay.linear.scaled(factor)),
            ..self.clone()
        }
    }

    /// Describe the first problem that keeps these parameters from producing
    /// particles, if any.
    pub fn problem(&self) -> Option<String> {
        if !(self.density.is_finite() && self.density > 0.0) {
            return Some(format!("density must be a positive number, got {}", self.density));
        }
        if self.density > MAX_DENSITY {
            return Some(format!(
                "density {} exceeds the limit of {} particles per frame",
                self.density, MAX_DENSITY
            ));
        }
        if self.colors.is_empty() {
            return Some("color set is empty".to_string());
        }
        let spans = [
            ("position", self.position.is_finite()),
            ("size", self.size.is_finite()),
            ("velocity", self.velocity.is_finite()),
            ("alpha", self.alpha.is_finite()),
            ("size_decay", self.size_decay.rate.is_finite() && self.size_decay.linear.is_finite()),
            ("alpha_decay", self.alpha_decay.rate.is_finite() && self.alpha_decay.linear.is_finite()),
        ];
        spans
            .iter()
            .find(|(_, finite)| !finite)
            .map(|(name, _)| format!("{} range is not finite", name))
    }

    /// `(particles per spawn, frames per spawn)` for this density.
    fn cadence(&self) -> (u32, u32) {
        if !(self.density.is_finite() && self.density > 0.0) {
            return (0, 1);
        }
        if self.density < 1.0 {
            (1, (1.0 / self.density).ceil() as u32)
        } else {
            (self.density.min(MAX_DENSITY).ceil() as u32, 1)
        }
    }

    fn spawn<R: Rng + ?Sized>(&self, origin: Vec2, rng: &mut R) -> Particle {
        let position = self.position.sample(rng) + origin;
        let size = self.size.sample(rng);
        let velocity = self.velocity.sample(rng);
        let color = choose(rng, &self.colors).copied().unwrap_or(Color::WHITE);
        let alpha = self.alpha.sample(rng) / 100.0;
        let size_decay = self.size_decay.sample(rng);
        let alpha_decay = self.alpha_decay.sample(rng);

        Particle::new(position, size, velocity, color, alpha, size_decay, alpha_decay, self.shape)
    }
}

/// A homogeneous collection of particles with its own spawn rules.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleGroup {
    particles: Vec<Particle>,
    params: GroupParams,
    offset: Vec2,
    active: bool,
    lifespan: Lifespan,
    saved_lifespan: Lifespan,
    per_spawn: u32,
    cycle: u32,
    counter: u32,
}

impl ParticleGroup {
    /// Create an active, empty group that spawns forever.
    pub fn new(params: GroupParams) -> Self {
        let (per_spawn, cycle) = params.cadence();
        Self {
            particles: Vec::new(),
            params,
            offset: Vec2::ZERO,
            active: true,
            lifespan: Lifespan::Infinite,
            saved_lifespan: Lifespan::Infinite,
            per_spawn,
            cycle,
            counter: 0,
        }
    }

    pub fn params(&self) -> &GroupParams {
        &self.params
    }

    /// Position relative to the parent system's spawn point.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn lifespan(&self) -> Lifespan {
        self.lifespan
    }

    /// Replace the remaining lifespan. `Frames(0)` ends spawning at once, so
    /// the group counts as dead as soon as its particles are gone.
    pub fn set_lifespan(&mut self, lifespan: Lifespan) {
        self.lifespan = lifespan;
        if lifespan == Lifespan::Frames(0) {
            self.counter = self.cycle;
        }
    }

    /// Frames between spawns.
    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    /// Position within the spawn cycle, always in `0..=cycle`.
    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Add an already-built particle.
    pub fn add(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Scale the group by `scale` percent (100 = unchanged).
    ///
    /// Affects spawn ranges, linear decays and the offset. Particles already
    /// alive keep their current values.
    pub fn resize(&mut self, scale: f32) {
        let factor = scale / 100.0;
        self.params = self.params.scaled(factor);
        self.offset *= factor;
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        if !self.active {
            return;
        }
        for particle in &self.particles {
            particle.draw(canvas);
        }
    }

    /// Age every particle one frame and drop the finished ones.
    pub fn update(&mut self) {
        for particle in &mut self.particles {
            particle.update();
        }
        self.particles.retain(Particle::is_alive);
    }

    /// Spawn this frame's particles around `origin`, if the cadence and
    /// lifespan allow it.
    pub fn generate<R: Rng + ?Sized>(&mut self, origin: Vec2, rng: &mut R) {
        if !self.active || !self.lifespan.allows_spawn() {
            return;
        }

        if self.counter % self.cycle == 0 {
            for _ in 0..self.per_spawn {
                let particle = self.params.spawn(origin, rng);
                self.particles.push(particle);
            }
            self.counter = 0;
        }

        if let Lifespan::Frames(frames) = &mut self.lifespan {
            *frames -= 1;
        }
        if self.cycle != 1 {
            self.counter += 1;
        }
        if self.lifespan == Lifespan::Frames(0) {
            self.counter = self.cycle;
        }
    }

    /// Resume spawning. A group that was deactivated gets back the lifespan it
    /// had at that moment; the spawn cycle restarts.
    pub fn activate(&mut self) {
        if !self.active {
            self.lifespan = self.saved_lifespan;
        }
        self.active = true;
        let (per_spawn, cycle) = self.params.cadence();
        self.per_spawn = per_spawn;
        self.cycle = cycle;
        self.counter = 0;
    }

    /// Stop spawning and drawing. Live particles keep aging.
    pub fn deactivate(&mut self) {
        if self.active {
            self.saved_lifespan = self.lifespan;
        }
        self.active = false;
    }

    /// No particles left and the last spawn cycle has run out.
    pub fn is_dead(&self) -> bool {
        self.particles.is_empty() && self.counter == self.cycle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Framebuffer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn params(density: f32) -> GroupParams {
        GroupParams {
            position: Span2::new(Span::new(-10.0, 10.0), Span::new(-10.0, 10.0)),
            size: Span::new(5.0, 10.0),
            velocity: Span2::new(Span::new(-2.0, 2.0), Span::new(-2.0, 2.0)),
            colors: vec![Color::rgb(255, 0, 100), Color::rgb(255, 100, 150)],
            alpha: Span::new(30.0, 50.0),
            size_decay: FalloffSpan::new(Span::fixed(0.0), Span::new(0.375, 0.5)),
            alpha_decay: FalloffSpan::new(Span::fixed(0.0), Span::new(0.0001, 0.00025)),
            density,
            shape: ParticleShape::Circle,
        }
    }

    #[test]
    fn test_new_group_defaults() {
        let group = ParticleGroup::new(params(1.0));
        assert!(group.is_active());
        assert!(group.is_empty());
        assert_eq!(group.lifespan(), Lifespan::Infinite);
        assert_eq!(group.cycle(), 1);
        assert_eq!(group.counter(), 0);
        assert_eq!(group.offset(), Vec2::ZERO);
        assert!(!group.is_dead());
    }

    #[test]
    fn test_zero_lifespan_group_dies_when_empty() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut group = ParticleGroup::new(params(0.5));
        group.set_lifespan(Lifespan::Frames(0));
        assert_eq!(group.counter(), group.cycle());

        group.generate(Vec2::ZERO, &mut rng);
        assert!(group.is_empty());
        assert!(group.is_dead());
    }

    #[test]
    fn test_density_is_capped() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut flood = ParticleGroup::new(params(1e12));
        assert!(flood.params().problem().unwrap().contains("exceeds"));

        flood.generate(Vec2::ZERO, &mut rng);
        assert_eq!(flood.len(), MAX_DENSITY as usize);
        assert!(params(MAX_DENSITY).problem().is_none());
    }

    #[test]
    fn test_density_cadence() {
        let mut rng = StdRng::seed_from_u64(1);

        let mut dense = ParticleGroup::new(params(2.5));
        dense.generate(Vec2::ZERO, &mut rng);
        assert_eq!(dense.len(), 3);

        let mut sparse = ParticleGroup::new(params(0.3));
        assert_eq!(sparse.cycle(), 4);
        for _ in 0..8 {
            sparse.generate(Vec2::ZERO, &mut rng);
        }
        // Spawns on frames 0 and 4
        assert_eq!(sparse.len(), 2);
    }

    #[test]
    fn test_spawned_particles_follow_params() {
        let mut rng = StdRng::seed_from_u64(9);
        let origin = Vec2::new(300.0, 200.0);
        let mut group = ParticleGroup::new(params(1.0));
        for _ in 0..100 {
            group.generate(origin, &mut rng);
        }

        for p in group.particles() {
            let rel = p.position - origin;
            assert!((-10.0..10.0).contains(&rel.x) && (-10.0..10.0).contains(&rel.y));
            assert!((5.0..10.0).contains(&p.size));
            assert!((0.3..0.5).contains(&p.alpha));
            assert!(group.params().colors.contains(&p.color));
            assert_eq!(p.size_decay.rate, 0.0);
        }
    }

    #[test]
    fn test_lifespan_runs_out_then_group_dies() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut group = ParticleGroup::new(params(1.0));
        group.set_lifespan(Lifespan::Frames(3));

        for _ in 0..10 {
            group.generate(Vec2::ZERO, &mut rng);
        }
        assert_eq!(group.len(), 3);
        assert_eq!(group.lifespan(), Lifespan::Frames(0));
        assert_eq!(group.counter(), group.cycle());
        assert!(!group.is_dead(), "particles are still alive");

        let mut frames = 0;
        while !group.is_empty() {
            group.update();
            frames += 1;
            assert!(frames < 1000);
        }
        assert!(group.is_dead());
    }

    #[test]
    fn test_counter_stays_within_cycle() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut group = ParticleGroup::new(params(0.25));
        group.set_lifespan(Lifespan::Frames(11));
        for _ in 0..20 {
            group.generate(Vec2::ZERO, &mut rng);
            assert!(group.counter() <= group.cycle());
            group.update();
        }
    }

    #[test]
    fn test_infinite_group_never_dies() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut group = ParticleGroup::new(params(1.0));
        group.generate(Vec2::ZERO, &mut rng);
        for _ in 0..500 {
            group.update();
        }
        assert!(group.is_empty());
        assert!(!group.is_dead());
    }

    #[test]
    fn test_update_removes_only_finished_particles() {
        let mut group = ParticleGroup::new(params(1.0));
        let make = |size: f32| {
            Particle::new(
                Vec2::ZERO,
                size,
                Vec2::ZERO,
                Color::WHITE,
                1.0,
                Falloff::new(0.0, 1.0),
                Falloff::NONE,
                ParticleShape::Circle,
            )
        };
        group.add(make(1.0));
        group.add(make(5.0));
        group.add(make(0.5));
        group.add(make(3.0));

        group.update();
        let sizes: Vec<f32> = group.particles().iter().map(|p| p.size).collect();
        assert_eq!(sizes, vec![4.0, 2.0]);
    }

    #[test]
    fn test_resize_scales_ranges_and_offset() {
        let mut group = ParticleGroup::new(params(1.0));
        group.set_offset(Vec2::new(0.0, -50.0));
        group.resize(150.0);

        let p = group.params();
        assert_eq!(p.size, Span::new(7.5, 15.0));
        assert_eq!(p.position.x, Span::new(-15.0, 15.0));
        assert_eq!(p.velocity.y, Span::new(-3.0, 3.0));
        assert_eq!(p.size_decay.linear, Span::new(0.5625, 0.75));
        // Proportional rates and alpha are unitless
        assert_eq!(p.size_decay.rate, Span::fixed(0.0));
        assert_eq!(p.alpha, Span::new(30.0, 50.0));
        assert_eq!(group.offset(), Vec2::new(0.0, -75.0));
    }

    #[test]
    fn test_deactivate_and_activate() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut group = ParticleGroup::new(params(0.5));
        group.set_lifespan(Lifespan::Frames(5));
        group.generate(Vec2::ZERO, &mut rng);
        group.generate(Vec2::ZERO, &mut rng);
        assert_eq!(group.lifespan(), Lifespan::Frames(3));

        group.deactivate();
        assert!(!group.is_active());
        let before = group.len();
        group.generate(Vec2::ZERO, &mut rng);
        assert_eq!(group.len(), before, "inactive groups do not spawn");

        group.activate();
        assert!(group.is_active());
        assert_eq!(group.lifespan(), Lifespan::Frames(3));
        assert_eq!(group.counter(), 0);
        assert_eq!(group.cycle(), 2);
    }

    #[test]
    fn test_inactive_group_does_not_draw() {
        let mut rng = StdRng::seed_from_u64(10);
        let mut group = ParticleGroup::new(params(1.0));
        group.generate(Vec2::new(16.0, 16.0), &mut rng);
        group.deactivate();

        let mut fb = Framebuffer::new(32, 32);
        fb.fill(Color::BLACK);
        group.draw(&mut fb);
        assert!(fb.as_bytes().chunks(4).all(|px| px == [0, 0, 0, 255]));

        group.activate();
        group.draw(&mut fb);
        assert!(fb.as_bytes().chunks(4).any(|px| px != [0, 0, 0, 255]));
    }

    #[test]
    fn test_invalid_params_are_reported() {
        assert!(params(1.0).problem().is_none());
        assert!(params(0.0).problem().is_some());
        assert!(params(f32::NAN).problem().is_some());

        let mut no_colors = params(1.0);
        no_colors.colors.clear();
        assert!(no_colors.problem().unwrap().contains("color"));

        let mut bad_span = params(1.0);
        bad_span.size = Span::new(1.0, f32::INFINITY);
        assert!(bad_span.problem().unwrap().contains("size"));

        // A zero-density group is inert rather than panicking
        let mut rng = StdRng::seed_from_u64(0);
        let mut inert = ParticleGroup::new(params(0.0));
        inert.generate(Vec2::ZERO, &mut rng);
        assert!(inert.is_empty());
    }
}
