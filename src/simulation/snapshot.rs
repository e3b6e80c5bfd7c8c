//! Read-only state copies for the presentation layer.
//!
//! The driver renders from these; live state stays encapsulated behind
//! [`super::world::World`] and cannot be mutated through a snapshot.

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::genome::{Genome, Species};
use super::resource::Resource;

/// Renderable copy of one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    /// Position.
    pub position: [f32; 2],
    /// Velocity.
    pub velocity: [f32; 2],
    /// Heritable traits.
    pub genome: Genome,
    /// Species tag.
    pub species: Species,
    /// Resources consumed this generation.
    pub consumed: u32,
    /// Seconds since the last meal.
    pub since_last_meal: f32,
}

impl From<&Entity> for EntityView {
    fn from(entity: &Entity) -> Self {
        Self {
            position: [entity.pos[0], entity.pos[1]],
            velocity: [entity.vel[0], entity.vel[1]],
            genome: entity.genome,
            species: entity.species,
            consumed: entity.consumed,
            since_last_meal: entity.since_last_meal,
        }
    }
}

/// Renderable copy of one resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceView {
    /// Position.
    pub position: [f32; 2],
    /// Display radius.
    pub radius: f32,
}

impl From<&Resource> for ResourceView {
    fn from(resource: &Resource) -> Self {
        Self {
            position: [resource.pos[0], resource.pos[1]],
            radius: resource.radius,
        }
    }
}

/// Full frame snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// Total simulated seconds.
    pub time: f32,
    /// Completed-generation count.
    pub generation: u32,
    /// All live entities.
    pub entities: Vec<EntityView>,
    /// All live resources.
    pub resources: Vec<ResourceView>,
}
