#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use ndarray::Array1;
use rand::SeedableRng;
use rand::rngs::StdRng;

use axol::simulation::clock::{GenerationClock, Phase};
use axol::simulation::entity::Entity;
use axol::simulation::genome::{Genome, Species};
use axol::simulation::params::{ArenaSettings, MutationSettings, Params, ResourceSettings};
use axol::simulation::resource::Resource;
use axol::simulation::world::World;

fn create_test_params() -> Params {
    Params {
        arena: ArenaSettings {
            width: 200.0,
            height: 200.0,
        },
        population_size: 2,
        generation_duration: 20.0,
        consumption_radius: 5.0,
        resources: ResourceSettings {
            spawn_probability: 0.0,
            initial_count: 0,
            ..ResourceSettings::default()
        },
        ..Params::default()
    }
}

fn test_genome(speed: f32, sense_radius: f32) -> Genome {
    Genome {
        size: 3.0,
        speed,
        sense_radius,
        color: [100, 100, 100, 150],
    }
}

fn test_entity(pos: [f32; 2], vel: [f32; 2], genome: Genome) -> Entity {
    Entity {
        pos: Array1::from_vec(vec![pos[0], pos[1]]),
        vel: Array1::from_vec(vec![vel[0], vel[1]]),
        genome,
        species: Species::Drifter,
        consumed: 0,
        since_last_meal: 0.0,
        nutrition_intake: 0.0,
    }
}

fn seeded() -> StdRng {
    StdRng::seed_from_u64(42)
}

#[test]
fn test_world_creation() {
    let params = Params {
        population_size: 8,
        resources: ResourceSettings {
            initial_count: 12,
            ..ResourceSettings::default()
        },
        ..create_test_params()
    };
    let world = World::new(params.clone(), seeded()).unwrap();

    assert_eq!(world.entities().len(), 8);
    assert_eq!(world.resources().len(), 12);
    assert_eq!(world.time(), 0.0);
    assert_eq!(world.generation(), 0);

    for entity in world.entities() {
        assert!(entity.genome.is_valid());
        assert_eq!(entity.consumed, 0);

        // Velocity magnitude starts pinned to the genome's speed.
        let speed = entity.vel.dot(&entity.vel).sqrt();
        assert!((speed - entity.genome.speed).abs() < 1e-3);

        // Seeded positions land inside the arena.
        assert!(entity.pos[0] >= 0.0 && entity.pos[0] <= params.arena.width);
        assert!(entity.pos[1] >= 0.0 && entity.pos[1] <= params.arena.height);
    }
}

#[test]
fn test_tick_advances_time() {
    let mut world = World::new(create_test_params(), seeded()).unwrap();
    world.tick(0.05);
    world.tick(0.05);
    assert!((world.time() - 0.1).abs() < 1e-6);
}

#[test]
fn test_boundary_reflection() {
    let entities = vec![
        test_entity([205.0, 100.0], [40.0, 0.0], test_genome(40.0, 0.0)),
        test_entity([100.0, 100.0], [0.0, 40.0], test_genome(40.0, 0.0)),
    ];
    let mut world = World::with_population(create_test_params(), entities, seeded()).unwrap();

    world.tick(0.05);
    let x_after_first = world.entities()[0].pos[0];
    // Outward x-velocity reflects once the entity is past the wall.
    assert!(world.entities()[0].vel[0] < 0.0);

    world.tick(0.05);
    // The overshoot self-corrects: the entity heads back toward the arena.
    assert!(world.entities()[0].pos[0] < x_after_first);
    assert!(world.entities()[0].vel[0] < 0.0);
}

#[test]
fn test_bounce_does_not_oscillate_outside() {
    let extent = Array1::from_vec(vec![200.0, 200.0]);
    let mut entity = test_entity([-5.0, 50.0], [-40.0, 0.0], test_genome(40.0, 0.0));

    entity.bounce(&extent);
    assert_eq!(entity.vel[0], 40.0);

    // Still outside but already inbound: no second flip.
    entity.bounce(&extent);
    assert_eq!(entity.vel[0], 40.0);
}

#[test]
fn test_steering_toward_sensed_resource() {
    let entities = vec![
        test_entity([50.0, 50.0], [0.0, 40.0], test_genome(40.0, 50.0)),
        test_entity([150.0, 150.0], [0.0, 40.0], test_genome(40.0, 0.0)),
    ];
    let mut world = World::with_population(create_test_params(), entities, seeded()).unwrap();
    world.place_resource(Resource::new(
        Array1::from_vec(vec![70.0, 50.0]),
        2.0,
        1.0,
    ));

    world.tick(0.1);

    let entity = &world.entities()[0];
    // Velocity bends toward the resource to the entity's right.
    assert!(entity.vel[0] > 0.0);
    // Magnitude stays pinned to the genome's speed after re-normalization.
    let speed = entity.vel.dot(&entity.vel).sqrt();
    assert!((speed - 40.0).abs() < 1e-3);
}

#[test]
fn test_steer_degenerate_blend_keeps_velocity() {
    let mut entity = test_entity([50.0, 50.0], [40.0, 0.0], test_genome(40.0, 0.0));
    let opposite = Array1::from_vec(vec![-1.0, 0.0]);

    // dt * speed exactly cancels the velocity; the zero blend must not be
    // normalized into NaN.
    entity.steer(&opposite, 1.0);

    assert_eq!(entity.vel[0], 40.0);
    assert_eq!(entity.vel[1], 0.0);
}

#[test]
fn test_at_most_one_consumption_per_tick() {
    let entities = vec![
        test_entity([50.0, 50.0], [0.01, 0.0], test_genome(0.01, 0.0)),
        test_entity([150.0, 150.0], [0.01, 0.0], test_genome(0.01, 0.0)),
    ];
    let mut world = World::with_population(create_test_params(), entities, seeded()).unwrap();
    world.place_resource(Resource::new(Array1::from_vec(vec![51.0, 50.0]), 2.0, 1.0));
    world.place_resource(Resource::new(Array1::from_vec(vec![50.0, 51.0]), 2.0, 1.0));
    world.place_resource(Resource::new(Array1::from_vec(vec![49.0, 50.0]), 2.0, 1.0));

    world.tick(0.1);

    // Three resources in range, exactly one consumed.
    assert_eq!(world.entities()[0].consumed, 1);
    assert_eq!(world.entities()[0].since_last_meal, 0.0);
    assert_eq!(world.resources().len(), 2);
}

#[test]
fn test_spawn_probability_one_adds_one_resource() {
    let params = Params {
        resources: ResourceSettings {
            spawn_probability: 1.0,
            initial_count: 0,
            ..ResourceSettings::default()
        },
        ..create_test_params()
    };
    let mut world = World::new(params, seeded()).unwrap();
    assert_eq!(world.resources().len(), 0);

    world.tick(0.05);

    assert_eq!(world.resources().len(), 1);
}

#[test]
fn test_zero_dt_tick_is_noop() {
    let params = Params {
        resources: ResourceSettings {
            spawn_probability: 1.0,
            initial_count: 3,
            ..ResourceSettings::default()
        },
        ..create_test_params()
    };
    let mut world = World::new(params, seeded()).unwrap();

    let before = world.snapshot();
    world.tick(0.0);
    let after = world.snapshot();

    assert_eq!(before, after);
}

#[test]
fn test_generation_rollover() {
    let params = Params {
        population_size: 4,
        generation_duration: 0.1,
        mutation: MutationSettings {
            probability: 0.0,
            ..MutationSettings::default()
        },
        ..create_test_params()
    };
    let mut entities = vec![
        test_entity([40.0, 40.0], [0.01, 0.0], test_genome(0.01, 0.0)),
        test_entity([60.0, 60.0], [0.01, 0.0], test_genome(0.01, 0.0)),
        test_entity([80.0, 80.0], [0.01, 0.0], test_genome(0.01, 0.0)),
        test_entity([100.0, 100.0], [0.01, 0.0], test_genome(0.01, 0.0)),
    ];
    entities[0].consumed = 10;
    entities[2].consumed = 5;

    let mut world = World::with_population(params, entities, seeded()).unwrap();
    world.place_resource(Resource::new(
        Array1::from_vec(vec![190.0, 190.0]),
        2.0,
        1.0,
    ));

    world.tick(0.2);

    assert_eq!(world.generation(), 1);
    assert_eq!(world.entities().len(), 4);
    // The boundary clears the resource set and every fitness accumulator.
    assert_eq!(world.resources().len(), 0);
    for entity in world.entities() {
        assert_eq!(entity.consumed, 0);
        assert_eq!(entity.since_last_meal, 0.0);
    }

    let summary = world.stats().latest().unwrap();
    assert_eq!(summary.generation, 0);
    assert_eq!(summary.best_consumed, 10);
    assert_eq!(summary.mean_consumed, 3.75);
}

#[test]
fn test_population_size_constant_across_generations() {
    let params = Params {
        population_size: 9,
        generation_duration: 0.5,
        ..create_test_params()
    };
    let mut world = World::new(params, seeded()).unwrap();

    for _ in 0..3 {
        let before = world.entities().len();
        let generation = world.generation();
        while world.generation() == generation {
            world.tick(0.05);
        }
        assert_eq!(world.entities().len(), before);
    }
}

#[test]
fn test_clock_phase_machine() {
    let mut clock = GenerationClock::new(1.0);
    assert_eq!(clock.phase(), Phase::Accumulating);

    clock.advance(0.6);
    assert_eq!(clock.phase(), Phase::Accumulating);

    clock.advance(0.6);
    assert_eq!(clock.phase(), Phase::RollingOver);
    assert_eq!(clock.generation(), 0);

    clock.finish_generation();
    assert_eq!(clock.phase(), Phase::Accumulating);
    assert_eq!(clock.generation(), 1);
    assert_eq!(clock.elapsed_in_generation(), 0.0);
    assert!((clock.time() - 1.2).abs() < 1e-6);
}

#[test]
fn test_snapshot_reflects_live_state() {
    let mut world = World::new(create_test_params(), seeded()).unwrap();
    world.place_resource(Resource::new(Array1::from_vec(vec![10.0, 20.0]), 3.0, 1.0));

    let snapshot = world.snapshot();
    assert_eq!(snapshot.entities.len(), 2);
    assert_eq!(snapshot.resources.len(), 1);
    assert_eq!(snapshot.resources[0].position, [10.0, 20.0]);
    assert_eq!(snapshot.resources[0].radius, 3.0);
    assert_eq!(snapshot.generation, 0);
}
