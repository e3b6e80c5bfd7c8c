//! The arena, the live population and the per-tick update.

use ndarray::Array1;
use rand::Rng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use std::sync::Mutex;

use super::clock::{GenerationClock, Phase};
use super::entity::Entity;
use super::events::{self, ClaimQueue, ConsumptionClaim};
use super::evolution::EvolutionEngine;
use super::genome::Species;
use super::geometry;
use super::params::{ConfigError, Params};
use super::resource::Resource;
use super::snapshot::{EntityView, ResourceView, WorldSnapshot};
use super::spatial::SpatialIndex;
use super::stats::StatsLog;

/// Owns the bounded arena and the live entity and resource collections.
///
/// The external driver calls [`World::tick`] once per frame and reads state
/// through [`World::snapshot`] or the slice accessors; live state is never
/// mutable from outside. Randomness comes from the generator passed in at
/// construction, so a seeded run is reproducible.
pub struct World {
    params: Params,
    extent: Array1<f32>,
    entities: Vec<Entity>,
    resources: Vec<Resource>,
    clock: GenerationClock,
    engine: EvolutionEngine,
    stats: StatsLog,
    rng: StdRng,
}

impl World {
    /// Creates a world with a randomly seeded population.
    ///
    /// Species are assigned round-robin and each entity starts from its
    /// species' genome template at a random position and heading.
    pub fn new(params: Params, rng: StdRng) -> Result<Self, ConfigError> {
        params.validate()?;
        let mut rng = rng;
        let extent = Array1::from_vec(vec![params.arena.width, params.arena.height]);

        let mut entities = Vec::with_capacity(params.population_size);
        for i in 0..params.population_size {
            let species = Species::ALL[i % Species::ALL.len()];
            let genome = params.templates.get(species);
            entities.push(Entity::spawned(species, genome, &extent, &mut rng));
        }

        Self::assemble(params, extent, entities, rng)
    }

    /// Creates a world from a caller-supplied initial population.
    ///
    /// The population must match the configured size exactly.
    pub fn with_population(
        params: Params,
        entities: Vec<Entity>,
        rng: StdRng,
    ) -> Result<Self, ConfigError> {
        params.validate()?;
        if entities.len() != params.population_size {
            return Err(ConfigError::PopulationMismatch {
                expected: params.population_size,
                actual: entities.len(),
            });
        }
        let extent = Array1::from_vec(vec![params.arena.width, params.arena.height]);
        Self::assemble(params, extent, entities, rng)
    }

    fn assemble(
        params: Params,
        extent: Array1<f32>,
        entities: Vec<Entity>,
        mut rng: StdRng,
    ) -> Result<Self, ConfigError> {
        let mut resources = Vec::with_capacity(params.resources.initial_count);
        for _ in 0..params.resources.initial_count {
            resources.push(Resource::new_random(&extent, &params, &mut rng));
        }

        let engine = EvolutionEngine::new(params.clone())?;
        let clock = GenerationClock::new(params.generation_duration);

        Ok(Self {
            params,
            extent,
            entities,
            resources,
            clock,
            engine,
            stats: StatsLog::default(),
            rng,
        })
    }

    /// Advances the simulation by one frame.
    ///
    /// Updates every entity and the resource set exactly once, then fires a
    /// generation rollover if the generation duration has elapsed. A zero
    /// `dt` is a no-op: nothing moves, nothing spawns.
    pub fn tick(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }

        self.clock.advance(dt);
        self.update_entities(dt);
        self.spawn_resource();

        match self.clock.phase() {
            Phase::RollingOver => self.rollover(),
            Phase::Accumulating => {}
        }
    }

    /// Moves, bounces and steers every entity, then resolves consumption.
    ///
    /// The per-entity phase runs in parallel and only reads the resource
    /// set; consumption claims go through a queue resolved serially, so a
    /// resource can only ever be consumed once.
    fn update_entities(&mut self, dt: f32) {
        let index =
            SpatialIndex::build(&self.resources).expect("failed to build resource index");

        // Wander directions are pre-sampled so the parallel phase needs no
        // shared generator.
        let wander: Vec<Array1<f32>> = (0..self.entities.len())
            .map(|_| geometry::unit_from_angle(self.rng.gen_range(0.0..std::f32::consts::TAU)))
            .collect();

        let claims = Mutex::new(ClaimQueue::new());
        let consumption_radius = self.params.consumption_radius;
        let extent = &self.extent;
        let resources = &self.resources;

        self.entities
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, entity)| {
                entity.integrate(dt);
                entity.bounce(extent);

                let sense_sq = entity.genome.sense_radius.powi(2);
                let steer_direction = match index.nearest(&entity.pos) {
                    Some((dist_sq, target)) if dist_sq <= sense_sq => {
                        // A resource exactly at the entity's position yields
                        // no usable direction; leave the velocity alone.
                        geometry::normalized(&(&resources[target].pos - &entity.pos))
                    }
                    _ => Some(wander[i].clone()),
                };
                if let Some(direction) = steer_direction {
                    entity.steer(&direction, dt);
                }

                if let Some((_, resource)) = index.first_within(&entity.pos, consumption_radius) {
                    claims.lock().unwrap().push(ConsumptionClaim {
                        entity: i,
                        resource,
                    });
                }

                entity.tick_hunger(dt);
            });

        let queue = claims.into_inner().unwrap();
        let eaten = events::resolve_claims(&mut self.entities, &mut self.resources, queue);
        if eaten > 0 {
            log::debug!("tick consumed {eaten} resources");
            self.resources.retain(|r| !r.is_consumed());
        }
    }

    /// Runs the per-tick Bernoulli spawn trial.
    fn spawn_resource(&mut self) {
        let p = f64::from(self.params.resources.spawn_probability);
        if self.rng.gen_bool(p) {
            self.resources
                .push(Resource::new_random(&self.extent, &self.params, &mut self.rng));
        }
    }

    /// Replaces the population via the evolution engine and resets the
    /// generation state.
    fn rollover(&mut self) {
        let summary = self.stats.record(self.clock.generation(), &self.entities);
        log::info!(
            "generation {} complete: best {} / mean {:.2} consumed, mean speed {:.1}",
            summary.generation,
            summary.best_consumed,
            summary.mean_consumed,
            summary.mean_speed,
        );

        self.entities = self.engine.advance(&self.entities, &mut self.rng);
        self.resources.clear();
        self.clock.finish_generation();
    }

    /// Drops a resource into the arena (driver input hook).
    pub fn place_resource(&mut self, resource: Resource) {
        self.resources.push(resource);
    }

    /// Read-only copy of the full frame state for rendering and debugging.
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            time: self.clock.time(),
            generation: self.clock.generation(),
            entities: self.entities.iter().map(EntityView::from).collect(),
            resources: self.resources.iter().map(ResourceView::from).collect(),
        }
    }

    /// Live entities, read-only.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Live resources, read-only.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Generation summaries recorded so far.
    pub fn stats(&self) -> &StatsLog {
        &self.stats
    }

    /// Active configuration.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Total simulated seconds.
    pub fn time(&self) -> f32 {
        self.clock.time()
    }

    /// Completed-generation count.
    pub fn generation(&self) -> u32 {
        self.clock.generation()
    }
}
