//! RRT (Rapidly-exploring Random Tree) stepwise planning
//!
//! Sampling-based planning in the continuous plane. The tree persists across
//! calls to [`Rrt::step`], each of which grows it by at most `max_iter`
//! iterations; `None` means "not there yet, call again".
//!
//! # Example
//!
//! ```rust
//! use robosim_core::{Environment, Point};
//! use robosim_library::algorithms::rrt::{Rrt, RrtConfig};
//!
//! let env = Environment::new(10.0, 10.0);
//! let config = RrtConfig {
//!     max_step_size: 0.5,
//!     max_iter: 500,
//!     goal_sample_rate: 20,
//!     search_radius: 1.0,
//! };
//! let mut rrt = Rrt::new(Point::new(1.0, 1.0), Point::new(8.0, 8.0), config, 7).unwrap();
//!
//! let solution = (0..10).find_map(|_| rrt.step(&env, 0.5));
//! if let Some(solution) = solution {
//!     assert!(solution.cost <= 0.5);
//!     println!("{} waypoints", rrt.path_to(&solution).len());
//! }
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use robosim_core::{Point, RoboSimError, RoboSimResult, SpatialField};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// RRT tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RrtConfig {
    /// Distance each new node is placed from its parent
    pub max_step_size: f64,
    /// Iterations (and collision checks) per `step` call
    pub max_iter: usize,
    /// Percent chance an iteration samples the target
    pub goal_sample_rate: u8,
    /// Neighbourhood radius; reserved for rewiring variants, not consulted
    pub search_radius: f64,
}

impl Default for RrtConfig {
    fn default() -> Self {
        Self {
            max_step_size: 0.5,
            max_iter: 500,
            goal_sample_rate: 10,
            search_radius: 1.0,
        }
    }
}

impl RrtConfig {
    pub fn validate(&self) -> RoboSimResult<()> {
        if !(self.max_step_size > 0.0) || !self.max_step_size.is_finite() {
            return Err(RoboSimError::InvalidConfig(format!(
                "rrt.max_step_size must be positive, got {}",
                self.max_step_size
            )));
        }
        if self.max_iter == 0 {
            return Err(RoboSimError::InvalidConfig(
                "rrt.max_iter must be non-zero".to_string(),
            ));
        }
        if self.goal_sample_rate > 100 {
            return Err(RoboSimError::InvalidConfig(format!(
                "rrt.goal_sample_rate must be within 0..=100, got {}",
                self.goal_sample_rate
            )));
        }
        Ok(())
    }
}

/// RRT tree node
#[derive(Debug, Clone)]
struct Node {
    position: Point,
    parent: Option<usize>,
}

/// A node close enough to the target to finish from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RrtSolution {
    pub node: Point,
    /// Remaining distance from `node` to the target
    pub cost: f64,
    index: usize,
}

/// RRT motion planner
#[derive(Debug, Clone)]
pub struct Rrt {
    start: Point,
    target: Point,
    config: RrtConfig,
    tree: Vec<Node>,
    rng: ChaCha8Rng,
    collision_checks: usize,
}

impl Rrt {
    /// Create a planner rooted at `start` with a seeded RNG
    pub fn new(start: Point, target: Point, config: RrtConfig, seed: u64) -> RoboSimResult<Self> {
        config.validate()?;

        Ok(Self {
            start,
            target,
            config,
            tree: vec![Node {
                position: start,
                parent: None,
            }],
            rng: ChaCha8Rng::seed_from_u64(seed),
            collision_checks: 0,
        })
    }

    /// Grow the tree by up to `max_iter` iterations
    ///
    /// Returns the first accepted node within `max_step_size` of the target.
    /// Every iteration performs at most one collision check against `field`
    /// for a body of `radius`.
    pub fn step(&mut self, field: &impl SpatialField, radius: f64) -> Option<RrtSolution> {
        self.collision_checks = 0;
        let (width, height) = field.bounds();

        for _ in 0..self.config.max_iter {
            let sample = if self.rng.gen_range(0..100u8) < self.config.goal_sample_rate {
                self.target
            } else {
                Point::new(self.rng.gen::<f64>() * width, self.rng.gen::<f64>() * height)
            };

            let nearest_idx = self.nearest_node(sample)?;
            let nearest = self.tree[nearest_idx].position;
            let Some(new_pos) = self.steer(nearest, sample) else {
                continue;
            };

            self.collision_checks += 1;
            if !field.is_within_bounds(new_pos) || field.is_obstacle_in_range(new_pos, radius) {
                debug!(x = new_pos.x, y = new_pos.y, "rrt collision");
                continue;
            }

            let index = self.tree.len();
            self.tree.push(Node {
                position: new_pos,
                parent: Some(nearest_idx),
            });
            debug!(x = new_pos.x, y = new_pos.y, index, "rrt node added");

            let remaining = new_pos.distance(&self.target);
            if remaining <= self.config.max_step_size {
                info!(nodes = self.tree.len(), "rrt reached target region");
                return Some(RrtSolution {
                    node: new_pos,
                    cost: remaining,
                    index,
                });
            }
        }

        None
    }

    /// Tree positions from the root to `solution`, inclusive
    pub fn path_to(&self, solution: &RrtSolution) -> Vec<Point> {
        let mut path = Vec::new();
        let mut current = Some(solution.index);

        while let Some(idx) = current {
            match self.tree.get(idx) {
                Some(node) => {
                    path.push(node.position);
                    current = node.parent;
                }
                None => break,
            }
        }

        path.reverse();
        path
    }

    /// Sum of segment lengths along a path
    pub fn path_cost(path: &[Point]) -> f64 {
        path.windows(2).map(|w| w[0].distance(&w[1])).sum()
    }

    /// Drop the tree back to the root, keeping config and RNG state
    pub fn reset(&mut self) {
        self.tree.truncate(1);
        self.collision_checks = 0;
    }

    pub fn tree_size(&self) -> usize {
        self.tree.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = Point> + '_ {
        self.tree.iter().map(|n| n.position)
    }

    /// Collision checks performed by the most recent `step` call
    pub fn collision_checks(&self) -> usize {
        self.collision_checks
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn target(&self) -> Point {
        self.target
    }

    pub fn config(&self) -> &RrtConfig {
        &self.config
    }

    fn nearest_node(&self, point: Point) -> Option<usize> {
        self.tree
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                a.position
                    .distance(&point)
                    .total_cmp(&b.position.distance(&point))
            })
            .map(|(idx, _)| idx)
    }

    // Always exactly max_step_size along the bearing, even past the sample
    fn steer(&self, from: Point, to: Point) -> Option<Point> {
        let direction = (to - from).normalized()?;
        Some(from + direction * self.config.max_step_size)
    }
}
