//! Heritable traits: genomes, species templates, crossover and mutation.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::params::MutationSettings;

/// Strictly positive floor for `size` and `speed`.
///
/// Mutation clamps against this floor unconditionally so a trait can never
/// collapse to zero or below.
pub const TRAIT_FLOOR: f32 = 1e-3;

/// Finite ceiling for all numeric traits, so repeated multiplicative
/// mutation cannot diverge.
pub const TRAIT_CEIL: f32 = 1e6;

/// The heritable trait vector of an axol.
///
/// Numeric traits are strictly positive (`size`, `speed`) or non-negative
/// (`sense_radius`); `color` is a cosmetic RGBA tuple with channels in
/// [0, 255].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    /// Body size.
    pub size: f32,
    /// Movement speed; the entity's velocity magnitude is pinned to this.
    pub speed: f32,
    /// Maximum distance at which a resource can be detected and steered toward.
    pub sense_radius: f32,
    /// RGBA color trait, channels in [0, 255].
    pub color: [u8; 4],
}

impl Genome {
    /// Produces a child genome as the arithmetic mean of two parents.
    ///
    /// Numeric traits average exactly; color channels average component-wise
    /// with integer truncation.
    pub fn crossover(parent1: &Genome, parent2: &Genome) -> Genome {
        let mut color = [0u8; 4];
        for (channel, (a, b)) in color
            .iter_mut()
            .zip(parent1.color.iter().zip(parent2.color.iter()))
        {
            *channel = ((u16::from(*a) + u16::from(*b)) / 2) as u8;
        }
        Genome {
            size: (parent1.size + parent2.size) / 2.0,
            speed: (parent1.speed + parent2.speed) / 2.0,
            sense_radius: (parent1.sense_radius + parent2.sense_radius) / 2.0,
            color,
        }
    }

    /// Applies one mutation: each numeric trait is perturbed by an
    /// independent multiplicative factor uniform in
    /// `[1 - trait_jitter, 1 + trait_jitter]`, each color channel by an
    /// independent additive offset uniform in `[-color_jitter, +color_jitter]`.
    ///
    /// All results are clamped to their valid ranges afterwards.
    pub fn mutate(&mut self, settings: &MutationSettings, rng: &mut impl Rng) {
        let jitter = settings.trait_jitter;
        self.size *= rng.gen_range(1.0 - jitter..=1.0 + jitter);
        self.speed *= rng.gen_range(1.0 - jitter..=1.0 + jitter);
        self.sense_radius *= rng.gen_range(1.0 - jitter..=1.0 + jitter);

        for channel in &mut self.color {
            let offset = rng.gen_range(-settings.color_jitter..=settings.color_jitter);
            *channel = (i16::from(*channel) + offset).clamp(0, 255) as u8;
        }

        self.clamp();
    }

    /// Clamps numeric traits to their valid ranges: `size` and `speed` to
    /// `[TRAIT_FLOOR, TRAIT_CEIL]`, `sense_radius` to `[0, TRAIT_CEIL]`.
    pub fn clamp(&mut self) {
        self.size = self.size.clamp(TRAIT_FLOOR, TRAIT_CEIL);
        self.speed = self.speed.clamp(TRAIT_FLOOR, TRAIT_CEIL);
        self.sense_radius = self.sense_radius.clamp(0.0, TRAIT_CEIL);
    }

    /// Checks the genome invariant: positive `size` and `speed`,
    /// non-negative `sense_radius`, all finite.
    pub fn is_valid(&self) -> bool {
        self.size > 0.0
            && self.speed > 0.0
            && self.sense_radius >= 0.0
            && self.size.is_finite()
            && self.speed.is_finite()
            && self.sense_radius.is_finite()
    }
}

/// Closed set of species an axol can belong to.
///
/// A species fixes the initial genome template at seeding time and is
/// inherited from the first parent at crossover. It is never branched on
/// during the update logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    /// Slow, large-bodied generalist.
    Drifter,
    /// Mid-speed forager with a wide sense radius.
    Grazer,
    /// Fast, small-bodied explorer.
    Scout,
    /// Fast and large, with a short sense radius.
    Cruiser,
}

impl Species {
    /// All species, in seeding (round-robin) order.
    pub const ALL: [Species; 4] = [
        Species::Drifter,
        Species::Grazer,
        Species::Scout,
        Species::Cruiser,
    ];
}
