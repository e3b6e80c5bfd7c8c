//! Axol state and per-tick behavior: movement, bouncing, steering, hunger.

use ndarray::Array1;
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::genome::{Genome, Species};
use super::geometry;

/// A single simulated creature.
///
/// Entities wander the arena, steer toward resources within their sense
/// radius and accumulate a consumption count that serves as their fitness
/// for the current generation. They are replaced wholesale at a generation
/// boundary; only their genome's influence persists through offspring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Position in arena space.
    pub pos: Array1<f32>,
    /// Velocity; magnitude is pinned to `genome.speed` by steering.
    pub vel: Array1<f32>,
    /// Heritable traits.
    pub genome: Genome,
    /// Species tag fixed at creation; cosmetic, never mutated.
    pub species: Species,
    /// Resources consumed this generation (fitness accumulator).
    pub consumed: u32,
    /// Seconds since the last meal; display only.
    pub since_last_meal: f32,
    /// Total nutrition eaten this generation; display/stats only.
    pub nutrition_intake: f32,
}

impl Entity {
    /// Creates an entity at a uniform random arena position with a random
    /// heading at the genome's speed.
    pub fn spawned(
        species: Species,
        genome: Genome,
        extent: &Array1<f32>,
        rng: &mut impl Rng,
    ) -> Self {
        let pos = Array1::random_using(2, Uniform::new(0.0f32, 1.0), rng) * extent;
        let heading = rng.gen_range(0.0..std::f32::consts::TAU);
        Self {
            pos,
            vel: geometry::unit_from_angle(heading) * genome.speed,
            genome,
            species,
            consumed: 0,
            since_last_meal: 0.0,
            nutrition_intake: 0.0,
        }
    }

    /// Integrates position by one timestep.
    pub fn integrate(&mut self, dt: f32) {
        self.pos += &(&self.vel * dt);
    }

    /// Reflects velocity off the arena walls.
    ///
    /// Per axis, the component is negated only when the entity is outside
    /// `[0, extent]` and still moving further out, so an overshoot always
    /// turns back toward the arena instead of oscillating.
    pub fn bounce(&mut self, extent: &Array1<f32>) {
        for axis in 0..2 {
            let p = self.pos[axis];
            let v = self.vel[axis];
            if (p < 0.0 && v < 0.0) || (p > extent[axis] && v > 0.0) {
                self.vel[axis] = -v;
            }
        }
    }

    /// Blends the velocity with a unit steering direction scaled by
    /// `dt * genome.speed`, then re-normalizes the result back to the
    /// genome's speed.
    ///
    /// A degenerate blend (zero-length result) leaves the velocity
    /// unchanged.
    pub fn steer(&mut self, direction: &Array1<f32>, dt: f32) {
        let blended = &self.vel + &(direction * (dt * self.genome.speed));
        if let Some(unit) = geometry::normalized(&blended) {
            self.vel = unit * self.genome.speed;
        }
    }

    /// Advances the hunger timer.
    pub fn tick_hunger(&mut self, dt: f32) {
        self.since_last_meal += dt;
    }

    /// Records one consumed resource.
    pub fn record_meal(&mut self, nutrition: f32) {
        self.consumed += 1;
        self.nutrition_intake += nutrition;
        self.since_last_meal = 0.0;
    }

    /// Zeroes the per-generation accumulators.
    pub fn reset_generation_counters(&mut self) {
        self.consumed = 0;
        self.since_last_meal = 0.0;
        self.nutrition_intake = 0.0;
    }
}
