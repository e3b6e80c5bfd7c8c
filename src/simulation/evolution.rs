//! Generational transition: fitness ranking, selection, crossover, mutation.

use ndarray::Array1;
use rand::Rng;

use super::entity::Entity;
use super::genome::Genome;
use super::params::{ConfigError, MutationPolicy, Params};

/// Produces the next generation from the ranked current one.
///
/// The engine is a pure function of the input population's genomes and
/// fitness values plus the explicit random source; it never mutates
/// entities it did not construct.
#[derive(Debug, Clone)]
pub struct EvolutionEngine {
    params: Params,
    extent: Array1<f32>,
}

impl EvolutionEngine {
    /// Creates an engine, rejecting invalid configuration.
    pub fn new(params: Params) -> Result<Self, ConfigError> {
        params.validate()?;
        let extent = Array1::from_vec(vec![params.arena.width, params.arena.height]);
        Ok(Self { params, extent })
    }

    /// Runs one rollover and returns the next population.
    ///
    /// Entities are ranked by consumption count descending. The top
    /// `N / 2` (floor; for odd N the middle entity is excluded) survive
    /// into the next generation with their counters reset. Each remaining
    /// slot is filled by a child of two parents drawn independently and
    /// uniformly from the survivor pool, with replacement. Children are
    /// mutated per the configured policy; survivors never are.
    ///
    /// The returned population always has the input's size, and every
    /// output genome is valid and clamped.
    pub fn advance(&self, population: &[Entity], rng: &mut impl Rng) -> Vec<Entity> {
        debug_assert!(population.len() >= 2);

        let mut ranked: Vec<&Entity> = population.iter().collect();
        ranked.sort_by(|a, b| b.consumed.cmp(&a.consumed));

        let survivor_count = population.len() / 2;
        let survivors = &ranked[..survivor_count];

        let mut next = Vec::with_capacity(population.len());
        for survivor in survivors {
            let mut entity = (*survivor).clone();
            entity.reset_generation_counters();
            next.push(entity);
        }

        for _ in 0..population.len() - survivor_count {
            let parent1 = survivors[rng.gen_range(0..survivor_count)];
            let parent2 = survivors[rng.gen_range(0..survivor_count)];
            next.push(self.breed(parent1, parent2, rng));
        }

        next
    }

    /// Crosses two parents into one child and applies mutation.
    fn breed(&self, parent1: &Entity, parent2: &Entity, rng: &mut impl Rng) -> Entity {
        let mut genome = Genome::crossover(&parent1.genome, &parent2.genome);

        let mutations = match self.params.mutation.policy {
            MutationPolicy::FixedProbability => {
                u32::from(rng.gen_bool(f64::from(self.params.mutation.probability)))
            }
            // One application per unit of the parents' mean consumption.
            MutationPolicy::ConsumptionDriven => (parent1.consumed + parent2.consumed) / 2,
        };
        for _ in 0..mutations {
            genome.mutate(&self.params.mutation, rng);
        }
        genome.clamp();

        Entity::spawned(parent1.species, genome, &self.extent, rng)
    }
}
