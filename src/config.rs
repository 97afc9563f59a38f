//! Serializable configuration for effects and the sandbox.
//!
//! Effects are described as JSON trees of groups and systems and turned into
//! live [`Effect`]s with [`EffectConfig::build`], which validates them first.
//!
//! ```json
//! {
//!   "kind": "system",
//!   "scale": 150.0,
//!   "children": [
//!     { "name": "flames", "offset": [0.0, 0.0], "effect": { "kind": "group", "params": { ... } } }
//!   ]
//! }
//! ```
//!
//! A [`SandboxConfig`] bundles an effect library with window and driver
//! settings. Every field has a default, so `{}` is a valid sandbox config.

use crate::color::Color;
use crate::error::ConfigError;
use crate::group::{GroupParams, ParticleGroup};
use crate::presets;
use crate::system::{Effect, ParticleSystem, Placement};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_scale() -> f32 {
    100.0
}

/// A group or system, with a resize applied after it is built.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectConfig {
    Group {
        params: GroupParams,
        /// Percentage, 100 = as described.
        #[serde(default = "default_scale")]
        scale: f32,
    },
    System {
        children: Vec<ChildConfig>,
        #[serde(default = "default_scale")]
        scale: f32,
    },
}

/// A named child of a system effect.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChildConfig {
    pub name: String,
    /// Offset from the parent's spawn point, in pixels.
    #[serde(default)]
    pub offset: [f32; 2],
    pub effect: EffectConfig,
}

impl EffectConfig {
    /// Check that this effect and all its children can be built.
    ///
    /// `name` is used in error messages.
    pub fn validate(&self, name: &str) -> Result<(), ConfigError> {
        match self {
            EffectConfig::Group { params, scale } => {
                check_scale(*scale)?;
                match params.problem() {
                    Some(reason) => Err(ConfigError::InvalidGroup {
                        effect: name.to_string(),
                        reason,
                    }),
                    None => Ok(()),
                }
            }
            EffectConfig::System { children, scale } => {
                check_scale(*scale)?;
                children
                    .iter()
                    .try_for_each(|child| child.effect.validate(&format!("{}/{}", name, child.name)))
            }
        }
    }

    /// Validate and build a live effect.
    pub fn build(&self, name: &str) -> Result<Effect, ConfigError> {
        self.validate(name)?;
        Ok(self.build_unchecked())
    }

    fn build_unchecked(&self) -> Effect {
        match self {
            EffectConfig::Group { params, scale } => {
                let mut group = ParticleGroup::new(params.clone());
                if *scale != 100.0 {
                    group.resize(*scale);
                }
                group.into()
            }
            EffectConfig::System { children, scale } => {
                let mut system = ParticleSystem::new();
                for child in children {
                    let effect = child.effect.build_unchecked();
                    let placement = Placement::at(Vec2::from(child.offset));
                    if !system.add(child.name.as_str(), &effect, placement) {
                        tracing::warn!(name = %child.name, "duplicate child name, keeping the first");
                    }
                }
                system.resize(*scale, false);
                system.into()
            }
        }
    }

    /// Describe a built effect. Scales are already applied, so they are 100.
    pub fn from_effect(effect: &Effect) -> Self {
        match effect {
            Effect::Group(group) => EffectConfig::Group {
                params: group.params().clone(),
                scale: default_scale(),
            },
            Effect::System(system) => EffectConfig::System {
                children: system
                    .children()
                    .map(|(name, child)| ChildConfig {
                        name: name.to_string(),
                        offset: child.offset().to_array(),
                        effect: EffectConfig::from_effect(child),
                    })
                    .collect(),
                scale: default_scale(),
            },
        }
    }
}

fn check_scale(scale: f32) -> Result<(), ConfigError> {
    if scale.is_finite() && scale > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidScale(scale))
    }
}

/// One entry of an effect library.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LibraryEntry {
    pub name: String,
    pub effect: EffectConfig,
}

/// The effects a user can pick from, in selection order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LibraryConfig {
    pub effects: Vec<LibraryEntry>,
}

impl Default for LibraryConfig {
    /// The built-in fire, sparks and water effects.
    fn default() -> Self {
        Self::from_effects(&presets::library())
    }
}

impl LibraryConfig {
    pub fn from_effects(effects: &[(String, Effect)]) -> Self {
        Self {
            effects: effects
                .iter()
                .map(|(name, effect)| LibraryEntry {
                    name: name.clone(),
                    effect: EffectConfig::from_effect(effect),
                })
                .collect(),
        }
    }

    /// Build every effect, in order.
    pub fn build(&self) -> Result<Vec<(String, Effect)>, ConfigError> {
        if self.effects.is_empty() {
            return Err(ConfigError::EmptyLibrary);
        }
        self.effects
            .iter()
            .map(|entry| Ok((entry.name.clone(), entry.effect.build(&entry.name)?)))
            .collect()
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a library from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Save the library to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// Settings for an interactive [`Sandbox`](crate::Sandbox).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SandboxConfig {
    /// Window title shown before the first stroke.
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub background: Color,
    /// Lifespan in frames of an effect dropped where the pointer first lands.
    pub burst_frames: u32,
    /// Lifespan in frames of each effect left behind while dragging.
    pub trail_frames: u32,
    /// How many trail effects can be alive at once.
    pub trail_slots: u32,
    /// Seed for reproducible runs. Random when `None`.
    pub seed: Option<u64>,
    /// Where `S` saves screenshots.
    pub capture_dir: PathBuf,
    pub library: LibraryConfig,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            title: "Try clicking and dragging on the black canvas!".into(),
            width: 1280,
            height: 720,
            background: Color::BLACK,
            burst_frames: 15,
            trail_frames: 2,
            trail_slots: 100,
            seed: None,
            capture_dir: PathBuf::from("captures"),
            library: LibraryConfig::default(),
        }
    }
}

impl SandboxConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a sandbox configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = Self::from_json(&fs::read_to_string(path)?)?;
        tracing::info!(path = %path.display(), effects = config.library.effects.len(), "loaded sandbox config");
        Ok(config)
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Reject lifespans that would leave effects on screen that can never
    /// spawn or retire.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.burst_frames == 0 {
            return Err(ConfigError::ZeroLifespan("burst_frames"));
        }
        if self.trail_frames == 0 {
            return Err(ConfigError::ZeroLifespan("trail_frames"));
        }
        Ok(())
    }
}
