//! Headless driver: runs a configured number of generations and dumps the
//! per-generation statistics as JSON.

use rand::SeedableRng;
use rand::rngs::StdRng;

use axol::simulation::params::Params;
use axol::simulation::world::World;

/// Generations to simulate before exiting.
const GENERATIONS: u32 = 5;
/// Frame time used for every tick.
const DT: f32 = 1.0 / 60.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let params = match args.next() {
        Some(path) => Params::from_file(path)?,
        None => Params::default(),
    };
    let rng = match args.next() {
        Some(seed) => StdRng::seed_from_u64(seed.parse()?),
        None => StdRng::from_entropy(),
    };

    log::info!(
        "starting simulation: {} axols, {}x{} arena",
        params.population_size,
        params.arena.width,
        params.arena.height
    );

    let mut world = World::new(params, rng)?;
    while world.generation() < GENERATIONS {
        world.tick(DT);
    }

    println!("{}", serde_json::to_string_pretty(world.stats().history())?);
    Ok(())
}
