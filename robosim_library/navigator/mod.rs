//! Uniform planner dispatch
//!
//! The driver talks to every planner through [`Navigator::step`], one call
//! per simulation step. Batch planners (A*, Dijkstra) compute their path at
//! construction and replay it; RRT grows its tree until it connects, then
//! walks the branch; Bug2 decides each move reactively.
//!
//! # Example
//!
//! ```rust
//! use robosim_core::{Grid, Point, World};
//! use robosim_library::navigator::{Navigator, PlannerKind, PlannerSetup, StepOutcome};
//! use robosim_library::robot::Robot;
//!
//! let world = World::Grid(Grid::new(5, 5));
//! let kind: PlannerKind = "dijkstra".parse().unwrap();
//! let setup = PlannerSetup::new(&world, Point::new(0.0, 0.0), Point::new(4.0, 4.0));
//! let mut navigator = Navigator::build(kind, &setup).unwrap();
//!
//! let mut robot = Robot::new(Point::new(0.0, 0.0));
//! while let StepOutcome::Move(next) = navigator.step(&robot, &world) {
//!     robot.move_to(next);
//! }
//! assert_eq!(robot.pos, Point::new(4.0, 4.0));
//! ```

use crate::algorithms::astar::AStar;
use crate::algorithms::bug2::{Bug2, Bug2Step};
use crate::algorithms::dijkstra::Dijkstra;
use crate::algorithms::rrt::{Rrt, RrtConfig};
use crate::robot::Robot;
use robosim_core::{Grid, GridPos, Point, RoboSimError, RoboSimResult, SpatialField, World};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Planner selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlannerKind {
    AStar,
    Dijkstra,
    Rrt,
    Bug2,
}

impl PlannerKind {
    pub const ALL: [PlannerKind; 4] = [
        PlannerKind::AStar,
        PlannerKind::Dijkstra,
        PlannerKind::Rrt,
        PlannerKind::Bug2,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PlannerKind::AStar => "astar",
            PlannerKind::Dijkstra => "dijkstra",
            PlannerKind::Rrt => "rrt",
            PlannerKind::Bug2 => "bug2",
        }
    }

    /// Planners that need a discrete grid
    pub fn requires_grid(self) -> bool {
        matches!(self, PlannerKind::AStar | PlannerKind::Dijkstra)
    }
}

impl fmt::Display for PlannerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlannerKind {
    type Err = RoboSimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        PlannerKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| RoboSimError::UnknownAlgorithm(s.to_string()))
    }
}

/// Inputs shared by all planner constructors
#[derive(Debug, Clone)]
pub struct PlannerSetup<'a> {
    pub world: &'a World,
    pub start: Point,
    pub target: Point,
    pub sensor_range: Option<u32>,
    pub rrt: RrtConfig,
    pub seed: u64,
}

impl<'a> PlannerSetup<'a> {
    pub fn new(world: &'a World, start: Point, target: Point) -> Self {
        Self {
            world,
            start,
            target,
            sensor_range: None,
            rrt: RrtConfig::default(),
            seed: 0,
        }
    }

    pub fn with_sensor_range(mut self, sensor_range: Option<u32>) -> Self {
        self.sensor_range = sensor_range;
        self
    }

    pub fn with_rrt(mut self, rrt: RrtConfig) -> Self {
        self.rrt = rrt;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// What the driver should do after a navigator call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    Move(Point),
    /// No move yet, call again
    Searching,
    /// No move available
    Stalled,
    /// Nothing left to do
    Finished,
}

/// A planner behind the step contract
#[derive(Debug, Clone)]
pub enum Navigator {
    Path {
        kind: PlannerKind,
        path: Vec<GridPos>,
        cursor: usize,
    },
    Rrt {
        planner: Rrt,
        route: VecDeque<Point>,
        solved: bool,
    },
    Bug2(Bug2),
}

type NavigatorBuilder = fn(&PlannerSetup) -> RoboSimResult<Navigator>;

const NAVIGATOR_BUILDERS: [(PlannerKind, NavigatorBuilder); 4] = [
    (PlannerKind::AStar, build_astar),
    (PlannerKind::Dijkstra, build_dijkstra),
    (PlannerKind::Rrt, build_rrt),
    (PlannerKind::Bug2, build_bug2),
];

impl Navigator {
    /// Construct the planner `kind` names
    pub fn build(kind: PlannerKind, setup: &PlannerSetup) -> RoboSimResult<Self> {
        let (_, builder) = NAVIGATOR_BUILDERS
            .iter()
            .find(|(k, _)| *k == kind)
            .ok_or_else(|| RoboSimError::UnknownAlgorithm(kind.to_string()))?;
        builder(setup)
    }

    pub fn kind(&self) -> PlannerKind {
        match self {
            Navigator::Path { kind, .. } => *kind,
            Navigator::Rrt { .. } => PlannerKind::Rrt,
            Navigator::Bug2(_) => PlannerKind::Bug2,
        }
    }

    /// Precomputed path of a batch planner
    pub fn planned_path(&self) -> Option<&[GridPos]> {
        match self {
            Navigator::Path { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Next move for `robot`
    pub fn step(&mut self, robot: &Robot, world: &World) -> StepOutcome {
        match self {
            Navigator::Path { path, cursor, .. } => match path.get(*cursor) {
                Some(cell) => {
                    *cursor += 1;
                    StepOutcome::Move(cell.to_point())
                }
                None => StepOutcome::Finished,
            },
            Navigator::Rrt {
                planner,
                route,
                solved,
            } => {
                if !*solved {
                    match planner.step(world, robot.radius) {
                        Some(solution) => {
                            *solved = true;
                            route.extend(planner.path_to(&solution).into_iter().skip(1));
                            let target = planner.target();
                            if route.back() != Some(&target) {
                                if world.is_free(target, robot.radius) {
                                    route.push_back(target);
                                } else {
                                    warn!(
                                        x = target.x,
                                        y = target.y,
                                        "rrt target blocked, stopping short"
                                    );
                                }
                            }
                            info!(
                                waypoints = route.len(),
                                tree = planner.tree_size(),
                                "rrt route found"
                            );
                        }
                        None => {
                            debug!(tree = planner.tree_size(), "rrt still searching");
                            return StepOutcome::Searching;
                        }
                    }
                }
                match route.pop_front() {
                    Some(next) => StepOutcome::Move(next),
                    None => StepOutcome::Finished,
                }
            }
            Navigator::Bug2(bug2) => match bug2.step(robot, world) {
                Bug2Step::Move(next) => StepOutcome::Move(next),
                Bug2Step::Arrived => StepOutcome::Finished,
                Bug2Step::Stalled => StepOutcome::Stalled,
            },
        }
    }
}

fn grid_of<'a>(setup: &PlannerSetup<'a>, kind: PlannerKind) -> RoboSimResult<&'a Grid> {
    setup.world.as_grid().ok_or(RoboSimError::IncompatibleField {
        algorithm: kind.name(),
        required: "grid",
    })
}

fn build_astar(setup: &PlannerSetup) -> RoboSimResult<Navigator> {
    let grid = grid_of(setup, PlannerKind::AStar)?;
    let (start, target) = (setup.start.to_grid(), setup.target.to_grid());
    let path = AStar::new(grid, start, target, setup.sensor_range)?.exec();
    info!(planner = "astar", length = path.len(), "path planned");

    Ok(Navigator::Path {
        kind: PlannerKind::AStar,
        path,
        cursor: 1,
    })
}

fn build_dijkstra(setup: &PlannerSetup) -> RoboSimResult<Navigator> {
    let grid = grid_of(setup, PlannerKind::Dijkstra)?;
    let (start, target) = (setup.start.to_grid(), setup.target.to_grid());
    let path = Dijkstra::new(grid, start, target, setup.sensor_range)?.exec();
    info!(planner = "dijkstra", length = path.len(), "path planned");

    Ok(Navigator::Path {
        kind: PlannerKind::Dijkstra,
        path,
        cursor: 1,
    })
}

fn build_rrt(setup: &PlannerSetup) -> RoboSimResult<Navigator> {
    Ok(Navigator::Rrt {
        planner: Rrt::new(setup.start, setup.target, setup.rrt, setup.seed)?,
        route: VecDeque::new(),
        solved: false,
    })
}

fn build_bug2(setup: &PlannerSetup) -> RoboSimResult<Navigator> {
    Ok(Navigator::Bug2(Bug2::new(setup.target, setup.seed)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use robosim_core::{Environment, Grid};

    fn run(
        navigator: &mut Navigator,
        robot: &mut Robot,
        world: &World,
        budget: usize,
    ) -> StepOutcome {
        for _ in 0..budget {
            match navigator.step(robot, world) {
                StepOutcome::Move(next) => robot.move_to(next),
                StepOutcome::Searching => {}
                other => return other,
            }
        }
        StepOutcome::Searching
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("astar".parse::<PlannerKind>().unwrap(), PlannerKind::AStar);
        assert_eq!(" RRT ".parse::<PlannerKind>().unwrap(), PlannerKind::Rrt);
        assert_eq!("Bug2".parse::<PlannerKind>().unwrap(), PlannerKind::Bug2);

        let err = "dwa".parse::<PlannerKind>().unwrap_err();
        assert!(matches!(err, RoboSimError::UnknownAlgorithm(ref name) if name == "dwa"));
    }

    #[test]
    fn test_grid_planner_on_continuous_field() {
        let world = World::Continuous(Environment::new(10.0, 10.0));
        let setup = PlannerSetup::new(&world, Point::new(1.0, 1.0), Point::new(8.0, 8.0));

        for kind in [PlannerKind::AStar, PlannerKind::Dijkstra] {
            let err = Navigator::build(kind, &setup).unwrap_err();
            assert!(matches!(err, RoboSimError::IncompatibleField { required: "grid", .. }));
        }
        assert!(Navigator::build(PlannerKind::Bug2, &setup).is_ok());
    }

    #[test]
    fn test_path_replay() {
        let world = World::Grid(Grid::new(5, 5));
        let setup = PlannerSetup::new(&world, Point::new(0.0, 0.0), Point::new(4.0, 4.0));
        let mut navigator = Navigator::build(PlannerKind::AStar, &setup).unwrap();
        assert_eq!(navigator.planned_path().map(|p| p.len()), Some(9));

        let mut robot = Robot::new(Point::new(0.0, 0.0));
        let mut moves = 0;
        while let StepOutcome::Move(next) = navigator.step(&robot, &world) {
            robot.move_to(next);
            moves += 1;
        }
        assert_eq!(moves, 8);
        assert_eq!(robot.pos, Point::new(4.0, 4.0));
        assert_eq!(navigator.step(&robot, &world), StepOutcome::Finished);
    }

    #[test]
    fn test_unreachable_path_finishes_immediately() {
        let grid = Grid::with_obstacles(
            3,
            3,
            [GridPos::new(1, 0), GridPos::new(1, 1), GridPos::new(1, 2)],
        )
        .unwrap();
        let world = World::Grid(grid);
        let setup = PlannerSetup::new(&world, Point::new(0.0, 0.0), Point::new(2.0, 2.0));
        let mut navigator = Navigator::build(PlannerKind::Dijkstra, &setup).unwrap();

        assert_eq!(navigator.planned_path(), Some(&[][..]));
        let robot = Robot::new(Point::new(0.0, 0.0));
        assert_eq!(navigator.step(&robot, &world), StepOutcome::Finished);
    }

    #[test]
    fn test_rrt_reaches_target() {
        let world = World::Continuous(Environment::new(10.0, 10.0));
        let setup = PlannerSetup::new(&world, Point::new(1.0, 1.0), Point::new(8.0, 8.0))
            .with_rrt(RrtConfig {
                max_step_size: 0.5,
                max_iter: 500,
                goal_sample_rate: 20,
                search_radius: 1.0,
            })
            .with_seed(3);
        let mut navigator = Navigator::build(PlannerKind::Rrt, &setup).unwrap();
        let mut robot = Robot::new(Point::new(1.0, 1.0)).with_radius(0.2);

        assert_eq!(run(&mut navigator, &mut robot, &world, 500), StepOutcome::Finished);
        assert_eq!(robot.pos, Point::new(8.0, 8.0));
    }

    #[test]
    fn test_rrt_does_not_hop_onto_blocked_target() {
        let mut env = Environment::new(10.0, 10.0);
        env.add_obstacle_at(Point::new(8.6, 8.0)).unwrap();
        let world = World::Continuous(env);
        let target = Point::new(8.0, 8.0);
        let setup = PlannerSetup::new(&world, Point::new(1.0, 1.0), target)
            .with_rrt(RrtConfig {
                max_step_size: 0.5,
                max_iter: 500,
                goal_sample_rate: 20,
                search_radius: 1.0,
            })
            .with_seed(5);
        let mut navigator = Navigator::build(PlannerKind::Rrt, &setup).unwrap();
        let mut robot = Robot::new(Point::new(1.0, 1.0)).with_radius(0.2);
        assert!(!world.is_free(target, robot.radius));

        assert_eq!(run(&mut navigator, &mut robot, &world, 500), StepOutcome::Finished);
        assert_ne!(robot.pos, target);
        assert!(world.is_free(robot.pos, robot.radius));
        assert!(robot.pos.distance(&target) <= 0.5 + 1e-9);
    }

    #[test]
    fn test_bug2_dispatch() {
        let world = World::Grid(Grid::new(6, 6));
        let setup = PlannerSetup::new(&world, Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        let mut navigator = Navigator::build(PlannerKind::Bug2, &setup).unwrap();
        assert_eq!(navigator.kind(), PlannerKind::Bug2);
        assert!(navigator.planned_path().is_none());

        let mut robot = Robot::new(Point::new(0.0, 0.0));
        assert_eq!(run(&mut navigator, &mut robot, &world, 20), StepOutcome::Finished);
        assert_eq!(robot.pos, Point::new(3.0, 4.0));
    }
}
