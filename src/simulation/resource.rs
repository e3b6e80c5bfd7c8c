//! Consumable resources spawned into the arena.

use ndarray::Array1;
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::params::Params;

/// A single food item.
///
/// Resources are consumed whole by the first entity that claims them; the
/// consumed flag marks them for removal at the end of the tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Position in arena space.
    pub pos: Array1<f32>,
    /// Display radius.
    pub radius: f32,
    /// Nutrition value credited to the consumer.
    pub nutrition: f32,
    consumed: bool,
}

impl Resource {
    /// Creates a resource at a given position.
    pub fn new(pos: Array1<f32>, radius: f32, nutrition: f32) -> Self {
        Self {
            pos,
            radius,
            nutrition,
            consumed: false,
        }
    }

    /// Creates a resource at a uniform random arena position, with radius
    /// and nutrition drawn from the configured bounds.
    pub fn new_random(extent: &Array1<f32>, params: &Params, rng: &mut impl Rng) -> Self {
        let pos = Array1::random_using(2, Uniform::new(0.0f32, 1.0), rng) * extent;
        let r = &params.resources;
        Self::new(
            pos,
            rng.gen_range(r.radius_min..=r.radius_max),
            rng.gen_range(r.nutrition_min..=r.nutrition_max),
        )
    }

    /// Marks this resource as consumed.
    pub fn consume(&mut self) {
        self.consumed = true;
    }

    /// Whether a consumer has already claimed this resource.
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }
}
