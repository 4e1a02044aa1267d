//! Episode driver
//!
//! Builds the world, robot and navigator from a [`SimConfig`], then steps the
//! navigator until the target is reached, the planner is done or stalled, or
//! the step budget runs out.

use crate::config::{EnvConfig, FieldKind, ObstacleSpec, SimConfig};
use crate::metrics::{SimStats, Summarizer};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use robosim_core::{
    EnvObject, Environment, Grid, Placement, Point, RoboSimError, RoboSimResult, SpatialField,
    World,
};
use robosim_library::{build_robot, Navigator, PlannerKind, PlannerSetup, Robot, StepOutcome};
use tracing::{debug, info, warn};

/// One configured run
#[derive(Debug)]
pub struct Simulation {
    world: World,
    robot: Robot,
    target: EnvObject,
    navigator: Navigator,
    steps: usize,
    summarizer: Summarizer,
}

impl Simulation {
    pub fn new(config: SimConfig, algorithm: PlannerKind) -> RoboSimResult<Self> {
        config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let start = config.robot.start_pos;
        let target_pos = config.env.target_pos;

        let world = build_world(&config.env, start, &mut rng)?;
        if !world.is_within_bounds(start) {
            return Err(RoboSimError::invalid_position(Placement::Start, start, world.bounds()));
        }
        if world.is_obstacle_in_range(start, config.robot.radius) {
            warn!("Robot start {} overlaps an obstacle", start);
        }
        let target = match &world {
            World::Continuous(env) => env
                .target()
                .copied()
                .unwrap_or_else(|| EnvObject::target(target_pos)),
            World::Grid(_) => EnvObject::target(target_pos),
        };
        info!(
            "{} field {:?} with {} obstacles, target at {}",
            world.kind_name(),
            world.bounds(),
            world.obstacle_positions().len(),
            target.pos
        );

        let robot = build_robot(&config.robot.to_spec());
        debug!(kind = ?config.robot.to_spec().kind(), "robot built");

        let setup = PlannerSetup::new(&world, start, target.pos)
            .with_sensor_range(robot.sensor_range())
            .with_rrt(config.algorithm.rrt)
            .with_seed(config.seed);
        let navigator = Navigator::build(algorithm, &setup)?;
        info!("Using {} planner", algorithm);

        Ok(Self {
            world,
            robot,
            target,
            navigator,
            steps: config.env.steps,
            summarizer: Summarizer::new(start, config.trace_path),
        })
    }

    /// Run the episode to completion
    pub fn run(&mut self) -> SimStats {
        self.summarizer.start();

        let planning_failed = self.navigator.planned_path().is_some_and(|path| path.is_empty());
        if planning_failed {
            warn!("{} found no path to the target", self.navigator.kind());
        } else {
            self.step_loop();
        }

        let reached = self.reached();
        let sensor_readings = self.robot.sensor.as_ref().map(|s| s.readings_count());
        self.summarizer
            .finish(self.navigator.kind().name(), self.robot.pos, sensor_readings, reached)
    }

    fn step_loop(&mut self) {
        info!("Moving toward target...");
        while self.summarizer.steps_taken() < self.steps {
            if self.reached() {
                info!("Target reached at {}", self.robot.pos);
                return;
            }

            match self.navigator.step(&self.robot, &self.world) {
                StepOutcome::Move(next) => {
                    self.summarizer.record_step();
                    let from = self.robot.pos;
                    self.robot.move_to(next);
                    self.summarizer.record_move(from, next);
                    debug!(step = self.summarizer.steps_taken(), x = next.x, y = next.y, "moved");
                }
                StepOutcome::Searching => self.summarizer.record_step(),
                StepOutcome::Stalled => {
                    warn!("Planner stalled at {}", self.robot.pos);
                    return;
                }
                StepOutcome::Finished => {
                    debug!("Planner finished");
                    return;
                }
            }
        }

        if !self.reached() {
            warn!("Step budget of {} exhausted", self.steps);
        }
    }

    /// Robot centre within the target object's radius
    pub fn reached(&self) -> bool {
        self.target.position_within_range(self.robot.pos, 0.0)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn robot(&self) -> &Robot {
        &self.robot
    }

    pub fn target(&self) -> &EnvObject {
        &self.target
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }
}

/// Build the field and place its obstacles and target
pub fn build_world(env: &EnvConfig, start: Point, rng: &mut ChaCha8Rng) -> RoboSimResult<World> {
    let [width, height] = env.size;

    match env.kind {
        FieldKind::Grid => {
            let mut grid = Grid::new(width as usize, height as usize);
            if !grid.is_within_bounds(env.target_pos) {
                return Err(RoboSimError::invalid_position(
                    Placement::Target,
                    env.target_pos,
                    grid.bounds(),
                ));
            }

            match &env.obstacles {
                ObstacleSpec::Count(count) => {
                    let keep_clear = [start.to_grid(), env.target_pos.to_grid()];
                    grid.add_random_obstacles(*count, &keep_clear, rng)?;
                }
                ObstacleSpec::List(entries) => {
                    for entry in entries {
                        grid.add_obstacle(entry.pos().to_grid())?;
                    }
                }
            }
            Ok(World::Grid(grid))
        }
        FieldKind::Continuous => {
            let mut field = Environment::new(width as f64, height as f64);

            match &env.obstacles {
                ObstacleSpec::Count(count) => {
                    field.add_random_obstacles(*count, &[start, env.target_pos], rng)?;
                }
                ObstacleSpec::List(entries) => {
                    for entry in entries {
                        field.add_obstacle(entry.to_object())?;
                    }
                }
            }
            field.set_target(env.target_pos)?;
            Ok(World::Continuous(field))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ObstacleEntry, SensorConfig};

    fn grid_config(obstacles: ObstacleSpec) -> SimConfig {
        let mut config = SimConfig::default();
        config.env.obstacles = obstacles;
        config
    }

    #[test]
    fn test_grid_obstacles_from_list() {
        let config = grid_config(ObstacleSpec::List(vec![
            ObstacleEntry::At(Point::new(3.0, 3.0)),
            ObstacleEntry::At(Point::new(4.0, 4.0)),
        ]));
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let world = build_world(&config.env, config.robot.start_pos, &mut rng).unwrap();

        let grid = world.as_grid().unwrap();
        assert_eq!(grid.obstacles().len(), 2);
    }

    #[test]
    fn test_random_obstacles_seeded() {
        let config = grid_config(ObstacleSpec::Count(15));

        let build = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            build_world(&config.env, config.robot.start_pos, &mut rng)
                .unwrap()
                .obstacle_positions()
        };

        let first = build(7);
        assert_eq!(first.len(), 15);
        assert_eq!(first, build(7));
        assert!(!first.contains(&Point::new(1.0, 1.0)));
        assert!(!first.contains(&Point::new(8.0, 8.0)));
    }

    #[test]
    fn test_out_of_bounds_obstacle_rejected() {
        let outside = ObstacleEntry::At(Point::new(12.0, 3.0));
        let config = grid_config(ObstacleSpec::List(vec![outside]));
        let err = Simulation::new(config, PlannerKind::AStar).unwrap_err();
        assert!(matches!(err, RoboSimError::InvalidPosition { kind: Placement::Obstacle, .. }));
    }

    #[test]
    fn test_out_of_bounds_target_rejected() {
        let mut config = SimConfig::default();
        config.env.target_pos = Point::new(3.0, 10.0);
        let err = Simulation::new(config, PlannerKind::Dijkstra).unwrap_err();
        assert!(matches!(err, RoboSimError::InvalidPosition { kind: Placement::Target, .. }));
    }

    #[test]
    fn test_out_of_bounds_start_rejected() {
        let mut config = SimConfig::default();
        config.robot.start_pos = Point::new(-2.0, 1.0);
        let err = Simulation::new(config, PlannerKind::Bug2).unwrap_err();
        assert!(matches!(err, RoboSimError::InvalidPosition { kind: Placement::Start, .. }));
    }

    #[test]
    fn test_grid_planner_needs_grid() {
        let mut config = SimConfig::default();
        config.env.kind = FieldKind::Continuous;
        let err = Simulation::new(config, PlannerKind::AStar).unwrap_err();
        assert!(matches!(err, RoboSimError::IncompatibleField { .. }));
    }

    #[test]
    fn test_astar_episode() {
        let mut config = SimConfig::default();
        config.robot.sensor = Some(SensorConfig::default());
        let mut sim = Simulation::new(config, PlannerKind::AStar).unwrap();

        let stats = sim.run();
        assert!(stats.reached);
        assert_eq!(stats.steps_taken, 14);
        assert_eq!(stats.total_displacement, 14.0);
        assert_eq!(stats.final_position, Point::new(8.0, 8.0));
    }

    #[test]
    fn test_budget_exhausted() {
        let mut config = SimConfig::default();
        config.env.steps = 5;
        let mut sim = Simulation::new(config, PlannerKind::Dijkstra).unwrap();

        let stats = sim.run();
        assert!(!stats.reached);
        assert_eq!(stats.steps_taken, 5);
        assert_eq!(stats.total_displacement, 5.0);
    }

    #[test]
    fn test_unreachable_target() {
        let walls: Vec<ObstacleEntry> = (0..10)
            .map(|y| ObstacleEntry::At(Point::new(5.0, y as f64)))
            .collect();
        let config = grid_config(ObstacleSpec::List(walls));
        let mut sim = Simulation::new(config, PlannerKind::AStar).unwrap();

        let stats = sim.run();
        assert!(!stats.reached);
        assert_eq!(stats.steps_taken, 0);
        assert_eq!(stats.final_position, Point::new(1.0, 1.0));
    }
}
