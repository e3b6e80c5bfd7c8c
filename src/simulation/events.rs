//! Consumption claims collected from the parallel entity phase.
//!
//! Entities running in parallel only read the resource set; each pushes at
//! most one claim per tick into a shared queue. The queue is then resolved
//! serially, so two entities can never consume the same resource instance.

use super::entity::Entity;
use super::resource::Resource;

/// One entity's claim on one resource for the current tick.
#[derive(Debug, Clone, Copy)]
pub struct ConsumptionClaim {
    /// Index of the claiming entity.
    pub entity: usize,
    /// Index of the claimed resource.
    pub resource: usize,
}

/// Queue of claims for one tick.
#[derive(Debug, Default)]
pub struct ClaimQueue {
    claims: Vec<ConsumptionClaim>,
}

impl ClaimQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a claim.
    pub fn push(&mut self, claim: ConsumptionClaim) {
        self.claims.push(claim);
    }
}

/// Resolves all claims first-consumer-wins.
///
/// The first claim on each resource consumes it; later claims on the same
/// resource get nothing. Returns the number of resources consumed. Consumed
/// resources are only marked here; the caller removes them from the live
/// set afterwards.
pub fn resolve_claims(
    entities: &mut [Entity],
    resources: &mut [Resource],
    queue: ClaimQueue,
) -> usize {
    let mut consumed = 0;
    for claim in queue.claims {
        let resource = &mut resources[claim.resource];
        if resource.is_consumed() {
            continue;
        }
        entities[claim.entity].record_meal(resource.nutrition);
        resource.consume();
        consumed += 1;
    }
    consumed
}
