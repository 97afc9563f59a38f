//! Particle systems: named, nested compositions of effects.
//!
//! A [`ParticleSystem`] holds an ordered set of named children, each either a
//! [`ParticleGroup`] or another system, and drives them all with one call per
//! frame. Children carry their own offset relative to the system and their
//! own lifespan, so a fire is simply flames plus a smoke group offset above
//! them:
//!
//! ```ignore
//! let fire = ParticleSystem::new()
//!     .with("flames", flames, Vec2::ZERO)
//!     .with("smoke", smoke, Vec2::new(0.0, -50.0));
//!
//! let mut scene = ParticleSystem::new();
//! scene.add("burst", &fire.into(), Placement::at(cursor).lasting(15).scaled(150.0));
//! ```
//!
//! Children that finish (no particles left and no more spawning) are dropped
//! from their parent on the next [`update`](ParticleSystem::update).

use crate::canvas::Canvas;
use crate::group::{Lifespan, ParticleGroup};
use glam::Vec2;
use rand::Rng;

/// Anything a system can hold: a single group or a nested system.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Group(ParticleGroup),
    System(ParticleSystem),
}

impl Effect {
    pub fn offset(&self) -> Vec2 {
        match self {
            Effect::Group(g) => g.offset(),
            Effect::System(s) => s.offset(),
        }
    }

    pub fn set_offset(&mut self, offset: Vec2) {
        match self {
            Effect::Group(g) => g.set_offset(offset),
            Effect::System(s) => s.set_offset(offset),
        }
    }

    /// Scale by `scale` percent. `relative` is passed down to nested systems.
    pub fn resize(&mut self, scale: f32, relative: bool) {
        match self {
            Effect::Group(g) => g.resize(scale),
            Effect::System(s) => s.resize(scale, relative),
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        match self {
            Effect::Group(g) => g.draw(canvas),
            Effect::System(s) => s.draw(canvas),
        }
    }

    pub fn update(&mut self) {
        match self {
            Effect::Group(g) => g.update(),
            Effect::System(s) => s.update(),
        }
    }

    pub fn generate<R: Rng + ?Sized>(&mut self, origin: Vec2, rng: &mut R) {
        match self {
            Effect::Group(g) => g.generate(origin, rng),
            Effect::System(s) => s.generate(origin, rng),
        }
    }

    pub fn set_lifespan(&mut self, lifespan: Lifespan) {
        match self {
            Effect::Group(g) => g.set_lifespan(lifespan),
            Effect::System(s) => s.set_lifespan(lifespan),
        }
    }

    pub fn activate(&mut self) {
        match self {
            Effect::Group(g) => g.activate(),
            Effect::System(s) => s.activate(),
        }
    }

    pub fn deactivate(&mut self) {
        match self {
            Effect::Group(g) => g.deactivate(),
            Effect::System(s) => s.deactivate(),
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            Effect::Group(g) => g.is_active(),
            Effect::System(s) => s.is_active(),
        }
    }

    pub fn is_dead(&self) -> bool {
        match self {
            Effect::Group(g) => g.is_dead(),
            Effect::System(s) => s.is_dead(),
        }
    }

    /// Live particles in this effect and everything below it.
    pub fn particle_count(&self) -> usize {
        match self {
            Effect::Group(g) => g.len(),
            Effect::System(s) => s.particle_count(),
        }
    }
}

impl From<ParticleGroup> for Effect {
    fn from(group: ParticleGroup) -> Self {
        Effect::Group(group)
    }
}

impl From<ParticleSystem> for Effect {
    fn from(system: ParticleSystem) -> Self {
        Effect::System(system)
    }
}

/// Where and how a child is inserted by [`ParticleSystem::add`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub offset: Vec2,
    pub lifespan: Lifespan,
    /// Size in percent of the effect as given.
    pub scale: f32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            lifespan: Lifespan::Infinite,
            scale: 100.0,
        }
    }
}

impl Placement {
    /// Infinite lifespan at full scale, placed at `offset`.
    pub fn at(offset: Vec2) -> Self {
        Self {
            offset,
            ..Default::default()
        }
    }

    /// Spawn for `frames` frames only.
    pub fn lasting(mut self, frames: u32) -> Self {
        self.lifespan = Lifespan::Frames(frames);
        self
    }

    pub fn scaled(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}

/// An ordered, named collection of effects driven as one.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSystem {
    children: Vec<(String, Effect)>,
    offset: Vec2,
    active: bool,
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticleSystem {
    /// Create an empty, active system.
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            offset: Vec2::ZERO,
            active: true,
        }
    }

    /// Builder form of [`add`](Self::add) for composing effects up front.
    pub fn with(mut self, name: impl Into<String>, effect: impl Into<Effect>, offset: Vec2) -> Self {
        self.add(name, &effect.into(), Placement::at(offset));
        self
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Insert a copy of `effect` under `name`.
    ///
    /// The copy gets the placement's offset, is resized by its scale and gets
    /// its lifespan. Returns `false`, leaving the system untouched, if `name`
    /// is already taken.
    pub fn add(&mut self, name: impl Into<String>, effect: &Effect, placement: Placement) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }

        let mut child = effect.clone();
        child.set_offset(placement.offset);
        child.resize(placement.scale, false);
        child.set_lifespan(placement.lifespan);

        tracing::debug!(name = %name, offset = ?placement.offset, "added effect");
        self.children.push((name, child));
        true
    }

    /// Remove and return the child called `name`.
    pub fn remove(&mut self, name: &str) -> Option<Effect> {
        let index = self.children.iter().position(|(n, _)| n == name)?;
        tracing::debug!(name, "removed effect");
        Some(self.children.remove(index).1)
    }

    /// Drop every child.
    pub fn clear(&mut self) {
        self.children.clear();
    }

    pub fn contains(&self, name: &str) -> bool {
        self.children.iter().any(|(n, _)| n == name)
    }

    pub fn get(&self, name: &str) -> Option<&Effect> {
        self.children.iter().find(|(n, _)| n == name).map(|(_, e)| e)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Effect> {
        self.children.iter_mut().find(|(n, _)| n == name).map(|(_, e)| e)
    }

    /// Child names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.children.iter().map(|(n, _)| n.as_str())
    }

    /// Children with their names, in insertion order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &Effect)> {
        self.children.iter().map(|(n, e)| (n.as_str(), e))
    }

    /// Scale every child by `scale` percent.
    ///
    /// Does nothing for 100 or non-positive scales. With `relative`, this
    /// system's own offset is scaled too.
    pub fn resize(&mut self, scale: f32, relative: bool) {
        if scale == 100.0 || !(scale > 0.0) {
            return;
        }
        for (_, child) in &mut self.children {
            child.resize(scale, relative);
        }
        if relative {
            self.offset *= scale / 100.0;
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        if !self.active {
            return;
        }
        for (_, child) in &self.children {
            child.draw(canvas);
        }
    }

    /// Age every child one frame and drop the ones that have finished.
    pub fn update(&mut self) {
        self.children.retain_mut(|(name, child)| {
            child.update();
            let dead = child.is_dead();
            if dead {
                tracing::debug!(name = %name, "effect finished");
            }
            !dead
        });
    }

    /// Spawn this frame's particles, each child at `origin + child offset`.
    pub fn generate<R: Rng + ?Sized>(&mut self, origin: Vec2, rng: &mut R) {
        if !self.active || !origin.is_finite() {
            return;
        }
        for (_, child) in &mut self.children {
            let at = origin + child.offset();
            child.generate(at, rng);
        }
    }

    /// Set the lifespan of every child. Ignored while inactive.
    pub fn set_lifespan(&mut self, lifespan: Lifespan) {
        if !self.active {
            return;
        }
        for (_, child) in &mut self.children {
            child.set_lifespan(lifespan);
        }
    }

    /// Activate this system and every child.
    pub fn activate(&mut self) {
        self.active = true;
        for (_, child) in &mut self.children {
            child.activate();
        }
    }

    /// Activate one child. Returns `false` if there is no such child.
    pub fn activate_child(&mut self, name: &str) -> bool {
        match self.get_mut(name) {
            Some(child) => {
                child.activate();
                true
            }
            None => false,
        }
    }

    /// Deactivate this system and every child, if it is active.
    pub fn deactivate(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        for (_, child) in &mut self.children {
            child.deactivate();
        }
    }

    /// Deactivate one child. Returns `false` if there is no such child.
    pub fn deactivate_child(&mut self, name: &str) -> bool {
        match self.get_mut(name) {
            Some(child) => {
                child.deactivate();
                true
            }
            None => false,
        }
    }

    pub fn toggle_active(&mut self) {
        if self.active {
            self.deactivate();
        } else {
            self.activate();
        }
    }

    /// Every child has finished. An empty system is dead.
    pub fn is_dead(&self) -> bool {
        self.children.iter().all(|(_, child)| child.is_dead())
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Live particles over all descendants.
    pub fn particle_count(&self) -> usize {
        self.children.iter().map(|(_, child)| child.particle_count()).sum()
    }
}
