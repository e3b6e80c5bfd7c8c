//! Simulation parameters, defaults, JSON loading and fail-fast validation.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::genome::{Genome, Species};

/// Configuration rejected at construction time.
///
/// Invalid parameters fail fast here instead of being silently clamped at
/// runtime. The only always-applied runtime clamp is the per-trait floor in
/// mutation, which is a numeric safety net rather than an error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// Config file is not valid JSON for [`Params`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// The survivor pool would be empty.
    #[error("population size must be at least 2, got {0}")]
    PopulationTooSmall(usize),
    /// A custom initial population does not match the configured size.
    #[error("initial population has {actual} entities, expected {expected}")]
    PopulationMismatch {
        /// Configured population size.
        expected: usize,
        /// Number of entities supplied.
        actual: usize,
    },
    /// Generation duration must be positive and finite.
    #[error("generation duration must be positive and finite, got {0}")]
    InvalidGenerationDuration(f32),
    /// Arena dimensions must be positive and finite.
    #[error("arena dimensions must be positive and finite, got {width}x{height}")]
    InvalidArena {
        /// Configured width.
        width: f32,
        /// Configured height.
        height: f32,
    },
    /// Spawn probability must be a probability.
    #[error("resource spawn probability must lie in [0, 1], got {0}")]
    InvalidSpawnProbability(f32),
    /// Consumption radius must be positive and finite.
    #[error("consumption radius must be positive and finite, got {0}")]
    InvalidConsumptionRadius(f32),
    /// Resource radius bounds must be ordered and positive.
    #[error("resource radius bounds must satisfy 0 < min <= max, got {min}..{max}")]
    InvalidResourceRadius {
        /// Lower bound.
        min: f32,
        /// Upper bound.
        max: f32,
    },
    /// Nutrition bounds must be ordered and non-negative.
    #[error("nutrition bounds must satisfy 0 <= min <= max, got {min}..{max}")]
    InvalidNutrition {
        /// Lower bound.
        min: f32,
        /// Upper bound.
        max: f32,
    },
    /// Mutation probability must be a probability.
    #[error("mutation probability must lie in [0, 1], got {0}")]
    InvalidMutationProbability(f32),
    /// A jitter of 1 or more could drive a trait non-positive.
    #[error("trait jitter must lie in [0, 1), got {0}")]
    InvalidTraitJitter(f32),
    /// Color jitter must fit the channel range.
    #[error("color jitter must lie in [0, 255], got {0}")]
    InvalidColorJitter(i16),
    /// A species genome template violates the genome invariant.
    #[error("genome template for {species:?} is invalid")]
    InvalidTemplate {
        /// The offending species.
        species: Species,
    },
}

/// Arena dimensions. Positions live in `[0, width] x [0, height]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaSettings {
    /// Arena width.
    pub width: f32,
    /// Arena height.
    pub height: f32,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 700.0,
        }
    }
}

/// Resource spawning behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceSettings {
    /// Per-tick Bernoulli probability of spawning one resource.
    pub spawn_probability: f32,
    /// Number of resources seeded at construction.
    pub initial_count: usize,
    /// Smallest spawned radius.
    pub radius_min: f32,
    /// Largest spawned radius.
    pub radius_max: f32,
    /// Smallest spawned nutrition value.
    pub nutrition_min: f32,
    /// Largest spawned nutrition value.
    pub nutrition_max: f32,
}

impl Default for ResourceSettings {
    fn default() -> Self {
        Self {
            spawn_probability: 0.2,
            initial_count: 40,
            radius_min: 1.0,
            radius_max: 5.0,
            nutrition_min: 0.5,
            nutrition_max: 1.5,
        }
    }
}

/// When children produced at a rollover are mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationPolicy {
    /// Each child mutates once with the configured probability.
    FixedProbability,
    /// Each child mutates once per unit of its parents' mean consumption.
    ConsumptionDriven,
}

/// Mutation probability and magnitude bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationSettings {
    /// Per-child mutation probability under [`MutationPolicy::FixedProbability`].
    pub probability: f32,
    /// Multiplicative factor half-width for numeric traits; a factor is
    /// drawn uniformly from `[1 - trait_jitter, 1 + trait_jitter]`.
    pub trait_jitter: f32,
    /// Additive half-width for color channels, in channel units.
    pub color_jitter: i16,
    /// Which mutation policy applies to children.
    pub policy: MutationPolicy,
}

impl Default for MutationSettings {
    fn default() -> Self {
        Self {
            probability: 0.1,
            trait_jitter: 0.1,
            color_jitter: 10,
            policy: MutationPolicy::FixedProbability,
        }
    }
}

/// Initial genome template for each species.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeciesTemplates {
    /// Template for [`Species::Drifter`].
    pub drifter: Genome,
    /// Template for [`Species::Grazer`].
    pub grazer: Genome,
    /// Template for [`Species::Scout`].
    pub scout: Genome,
    /// Template for [`Species::Cruiser`].
    pub cruiser: Genome,
}

impl SpeciesTemplates {
    /// Returns the template genome for a species.
    pub fn get(&self, species: Species) -> Genome {
        match species {
            Species::Drifter => self.drifter,
            Species::Grazer => self.grazer,
            Species::Scout => self.scout,
            Species::Cruiser => self.cruiser,
        }
    }
}

impl Default for SpeciesTemplates {
    fn default() -> Self {
        Self {
            drifter: Genome {
                size: 4.5,
                speed: 35.0,
                sense_radius: 40.0,
                color: [90, 140, 235, 150],
            },
            grazer: Genome {
                size: 3.5,
                speed: 50.0,
                sense_radius: 70.0,
                color: [110, 220, 120, 150],
            },
            scout: Genome {
                size: 1.5,
                speed: 90.0,
                sense_radius: 55.0,
                color: [235, 200, 80, 150],
            },
            cruiser: Genome {
                size: 4.0,
                speed: 75.0,
                sense_radius: 25.0,
                color: [225, 90, 90, 150],
            },
        }
    }
}

/// Simulation parameters consumed at construction time.
///
/// Every field has a default, so a JSON config file may specify any subset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Arena dimensions.
    pub arena: ArenaSettings,
    /// Number of entities; constant across generations.
    pub population_size: usize,
    /// Simulated seconds per generation.
    pub generation_duration: f32,
    /// Center-to-center distance within which an entity consumes a resource.
    pub consumption_radius: f32,
    /// Resource spawning behavior.
    pub resources: ResourceSettings,
    /// Mutation probability and magnitude bounds.
    pub mutation: MutationSettings,
    /// Initial genome templates, one per species.
    pub templates: SpeciesTemplates,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            arena: ArenaSettings::default(),
            population_size: 150,
            generation_duration: 20.0,
            consumption_radius: 6.0,
            resources: ResourceSettings::default(),
            mutation: MutationSettings::default(),
            templates: SpeciesTemplates::default(),
        }
    }
}

impl Params {
    /// Parses parameters from a JSON string and validates them.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let params: Params = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Loads parameters from a JSON file and validates them.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Validates every parameter, failing fast on the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        if !(self.generation_duration > 0.0 && self.generation_duration.is_finite()) {
            return Err(ConfigError::InvalidGenerationDuration(
                self.generation_duration,
            ));
        }
        let ArenaSettings { width, height } = self.arena;
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(ConfigError::InvalidArena { width, height });
        }
        if !(self.consumption_radius > 0.0 && self.consumption_radius.is_finite()) {
            return Err(ConfigError::InvalidConsumptionRadius(
                self.consumption_radius,
            ));
        }

        let r = &self.resources;
        if !(0.0..=1.0).contains(&r.spawn_probability) {
            return Err(ConfigError::InvalidSpawnProbability(r.spawn_probability));
        }
        if !(r.radius_min > 0.0 && r.radius_min <= r.radius_max && r.radius_max.is_finite()) {
            return Err(ConfigError::InvalidResourceRadius {
                min: r.radius_min,
                max: r.radius_max,
            });
        }
        if !(r.nutrition_min >= 0.0
            && r.nutrition_min <= r.nutrition_max
            && r.nutrition_max.is_finite())
        {
            return Err(ConfigError::InvalidNutrition {
                min: r.nutrition_min,
                max: r.nutrition_max,
            });
        }

        let m = &self.mutation;
        if !(0.0..=1.0).contains(&m.probability) {
            return Err(ConfigError::InvalidMutationProbability(m.probability));
        }
        if !(0.0..1.0).contains(&m.trait_jitter) {
            return Err(ConfigError::InvalidTraitJitter(m.trait_jitter));
        }
        if !(0..=255).contains(&m.color_jitter) {
            return Err(ConfigError::InvalidColorJitter(m.color_jitter));
        }

        for species in Species::ALL {
            if !self.templates.get(species).is_valid() {
                return Err(ConfigError::InvalidTemplate { species });
            }
        }

        Ok(())
    }
}
