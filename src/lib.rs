//! # Axol - Generational Particle Evolution
//!
//! A population of axols wanders a bounded 2D arena, senses and consumes
//! spawned food resources, and periodically undergoes a generational
//! evolutionary step (selection, crossover, mutation).
//!
//! ## Features
//!
//! - Per-tick physics: integration, elastic wall bounces, resource sensing
//! - Foraging with first-consumer-wins claim resolution
//! - Generational evolution: fitness ranking, survivor selection, mean
//!   crossover, clamped mutation
//! - Species genome templates and a configurable mutation policy
//! - Seeded, reproducible randomness threaded through explicitly
//! - Read-only frame snapshots for a presentation layer
//!
//! ## Core Modules
//!
//! - [`simulation::world`] - Arena, live state, per-tick update
//! - [`simulation::evolution`] - Generational transition
//! - [`simulation::entity`] / [`simulation::resource`] - Data model
//! - [`simulation::clock`] - Tick and generation cadence
//! - [`simulation::params`] - Configuration and validation

/// Core simulation logic and data structures.
pub mod simulation {
    /// Tick and generation cadence.
    pub mod clock;
    /// Axol state and per-tick behavior.
    pub mod entity;
    /// Consumption claims and first-consumer-wins resolution.
    pub mod events;
    /// Generational transition: selection, crossover, mutation.
    pub mod evolution;
    /// Genomes, species templates, crossover and mutation.
    pub mod genome;
    /// Small vector helpers.
    pub mod geometry;
    /// Configuration, defaults and validation.
    pub mod params;
    /// Consumable resources.
    pub mod resource;
    /// Read-only state copies for the presentation layer.
    pub mod snapshot;
    /// Spatial index over resource positions.
    pub mod spatial;
    /// Per-generation summaries.
    pub mod stats;
    /// The arena and the live population.
    pub mod world;
}
