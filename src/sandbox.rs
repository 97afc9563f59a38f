//! The interactive driver: paint effects with the mouse.
//!
//! A [`Sandbox`] owns a root [`ParticleSystem`], an effect library and the
//! random generator. Each frame it turns input into effects:
//!
//! - **Press** the left button: a burst of the selected effect appears under
//!   the cursor and keeps spawning for a few frames.
//! - **Drag**: while the cursor stays on an existing burst, short-lived trail
//!   effects are dropped in a ring of reusable slots.
//! - **Click** (release): the next effect in the library is selected.
//! - `1`-`9` pick an effect directly, `Space` pauses, `C` clears.
//!
//! The sandbox never touches a window. [`Sandbox::run`] in the window module
//! drives it interactively; tests and the headless demo call
//! [`frame`](Sandbox::frame) with a synthetic [`Input`] and a [`Framebuffer`].
//!
//! [`Framebuffer`]: crate::canvas::Framebuffer

use crate::canvas::Canvas;
use crate::config::SandboxConfig;
use crate::error::ConfigError;
use crate::input::{Input, KeyCode, MouseButton};
use crate::system::{Effect, ParticleSystem, Placement};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

pub struct Sandbox {
    config: SandboxConfig,
    library: Vec<(String, Effect)>,
    selected: usize,
    system: ParticleSystem,
    rng: StdRng,
    trail_slot: u32,
    has_drawn: bool,
    paused: bool,
    frame: u64,
}

impl Sandbox {
    /// Build the effect library and seed the generator.
    pub fn new(config: SandboxConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let library = config.library.build()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        tracing::info!(
            effects = library.len(),
            seed = ?config.seed,
            "sandbox ready"
        );

        Ok(Self {
            config,
            library,
            selected: 0,
            system: ParticleSystem::new(),
            rng,
            trail_slot: 0,
            has_drawn: false,
            paused: false,
            frame: 0,
        })
    }

    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    /// Everything currently on screen.
    pub fn system(&self) -> &ParticleSystem {
        &self.system
    }

    pub fn system_mut(&mut self) -> &mut ParticleSystem {
        &mut self.system
    }

    /// Effect names in selection order.
    pub fn effect_names(&self) -> impl Iterator<Item = &str> {
        self.library.iter().map(|(name, _)| name.as_str())
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_name(&self) -> &str {
        self.library
            .get(self.selected)
            .map(|(name, _)| name.as_str())
            .unwrap_or_default()
    }

    /// Select a library entry by index. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.library.len() {
            return false;
        }
        self.selected = index;
        tracing::debug!(effect = self.selected_name(), "selected effect");
        true
    }

    /// Select the next effect, wrapping around.
    pub fn cycle(&mut self) {
        let next = (self.selected + 1) % self.library.len().max(1);
        self.select(next);
    }

    /// Remove every effect on screen.
    pub fn clear(&mut self) {
        self.system.clear();
        self.trail_slot = 0;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Whether the user has painted anything yet.
    pub fn has_drawn(&self) -> bool {
        self.has_drawn
    }

    /// Frames stepped so far, not counting paused ones.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Window caption: the hint until the first stroke, then a status line.
    pub fn status(&self) -> String {
        if !self.has_drawn {
            return self.config.title.clone();
        }
        let mut status = format!(
            "{} | {} particles",
            self.selected_name(),
            self.system.particle_count()
        );
        if self.paused {
            status.push_str(" | paused");
        }
        status
    }

    /// Where the next screenshot goes.
    pub fn capture_path(&self) -> PathBuf {
        self.config
            .capture_dir
            .join(format!("sparkfx_{:06}.png", self.frame))
    }

    /// Advance one frame: react to `input`, then spawn and age particles.
    pub fn step(&mut self, input: &Input) {
        self.handle_keys(input);
        if self.paused {
            return;
        }

        if input.mouse_held(MouseButton::Left) {
            if let Some(cursor) = input.cursor() {
                self.paint(cursor.round());
            }
        }
        if input.clicked() {
            self.cycle();
        }

        self.system.generate(Vec2::ZERO, &mut self.rng);
        self.system.update();
        self.frame += 1;
    }

    /// Clear to the background color and draw every effect.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.fill(self.config.background);
        self.system.draw(canvas);
    }

    /// [`step`](Self::step) followed by [`draw`](Self::draw).
    pub fn frame(&mut self, input: &Input, canvas: &mut dyn Canvas) {
        self.step(input);
        self.draw(canvas);
    }

    fn handle_keys(&mut self, input: &Input) {
        for key in input.keys_pressed() {
            match key {
                KeyCode::Space => {
                    self.paused = !self.paused;
                    tracing::info!(paused = self.paused, "toggled pause");
                }
                KeyCode::C => self.clear(),
                key => {
                    if let Some(digit) = key.digit().filter(|d| *d > 0) {
                        self.select(usize::from(digit) - 1);
                    }
                }
            }
        }
    }

    fn paint(&mut self, cursor: Vec2) {
        let Some((_, effect)) = self.library.get(self.selected) else {
            return;
        };

        let burst_key = format!("{},{}", cursor.x, cursor.y);
        if self.system.contains(&burst_key) {
            let placement = Placement::at(cursor).lasting(self.config.trail_frames);
            self.system
                .add(format!("#{}", self.trail_slot), effect, placement);
            self.trail_slot = (self.trail_slot + 1) % self.config.trail_slots.max(1);
        } else {
            let placement = Placement::at(cursor).lasting(self.config.burst_frames);
            self.system.add(burst_key, effect, placement);
        }
        self.has_drawn = true;
    }
}
