//! Shared scenario fixtures for the robosim benchmarks

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use robosim::prelude::*;

/// Seed used by every fixture
pub const FIXTURE_SEED: u64 = 42;

/// Square grid with roughly a fifth of the cells blocked, opposite corners kept clear
pub fn cluttered_grid(size: usize) -> RoboSimResult<Grid> {
    let mut rng = ChaCha8Rng::seed_from_u64(FIXTURE_SEED);
    let mut grid = Grid::new(size, size);
    let far = size as i32 - 1;
    grid.add_random_obstacles(
        size * size / 5,
        &[GridPos::new(0, 0), GridPos::new(far, far)],
        &mut rng,
    )?;
    Ok(grid)
}

/// Continuous field with `count` random circular obstacles, `start` and `target` kept clear
pub fn scattered_environment(
    size: f64,
    count: usize,
    start: Point,
    target: Point,
) -> RoboSimResult<Environment> {
    let mut rng = ChaCha8Rng::seed_from_u64(FIXTURE_SEED);
    let mut env = Environment::new(size, size);
    env.add_random_obstacles(count, &[start, target], &mut rng)?;
    env.set_target(target)?;
    Ok(env)
}
