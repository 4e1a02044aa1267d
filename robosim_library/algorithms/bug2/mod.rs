//! Bug2 reactive navigation
//!
//! Heads straight for the target until something is in the way, then follows
//! the obstacle boundary until it is closer to the target than where it first
//! made contact. A short position history detects when the robot is going
//! nowhere and triggers a random cardinal escape move.
//!
//! The planner never moves the robot itself: each [`Bug2::step`] hands back a
//! position for the driver to apply.
//!
//! # Example
//!
//! ```rust
//! use robosim_core::{Environment, Point};
//! use robosim_library::algorithms::bug2::{Bug2, Bug2Step};
//! use robosim_library::robot::Robot;
//!
//! let env = Environment::new(10.0, 10.0);
//! let mut robot = Robot::new(Point::new(1.0, 1.0));
//! let mut bug2 = Bug2::new(Point::new(4.0, 5.0), 0);
//!
//! while let Bug2Step::Move(next) = bug2.step(&robot, &env) {
//!     robot.move_to(next);
//! }
//! assert_eq!(robot.pos, Point::new(4.0, 5.0));
//! ```

mod history;

pub use history::RingBuffer;

use crate::robot::Robot;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use robosim_core::{Direction, Point, SpatialField};
use std::cmp::Ordering;
use tracing::{debug, warn};

/// Positions kept for stuck detection
pub const HISTORY_LEN: usize = 10;

/// Half-width of the forward sensing cone in degrees
const CONE_HALF_ANGLE: f64 = 45.0;

const ARRIVAL_EPSILON: f64 = 1e-9;

/// Candidates this close to the previous position count as stepping back
const BACKTRACK_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bug2State {
    TowardsTarget,
    FollowBoundary,
}

/// Outcome of one state-machine evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub state: Bug2State,
    /// Chosen move, `None` when every candidate is blocked
    pub next: Option<Point>,
    /// Boundary-contact point recorded by this transition
    pub contact: Option<Point>,
}

/// Result of a [`Bug2::step`] call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bug2Step {
    Move(Point),
    Arrived,
    /// No admissible move this call
    Stalled,
}

/// Bug2 planner state
#[derive(Debug, Clone)]
pub struct Bug2 {
    target: Point,
    state: Bug2State,
    history: RingBuffer<Point>,
    contact: Option<(Point, f64)>,
    escape_attempts: u32,
    rng: ChaCha8Rng,
}

impl Bug2 {
    pub fn new(target: Point, seed: u64) -> Self {
        Self {
            target,
            state: Bug2State::TowardsTarget,
            history: RingBuffer::new(HISTORY_LEN),
            contact: None,
            escape_attempts: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn state(&self) -> Bug2State {
        self.state
    }

    pub fn target(&self) -> Point {
        self.target
    }

    /// Last boundary-contact point and its distance to the target
    pub fn contact(&self) -> Option<(Point, f64)> {
        self.contact
    }

    pub fn escape_attempts(&self) -> u32 {
        self.escape_attempts
    }

    /// Decide the next move for `robot`
    pub fn step(&mut self, robot: &Robot, field: &impl SpatialField) -> Bug2Step {
        if robot.pos.distance(&self.target) <= ARRIVAL_EPSILON {
            return Bug2Step::Arrived;
        }

        self.history.push(robot.pos);
        if self.history.is_clustered(robot.speed) {
            return match self.escape(robot, field) {
                Some(next) => {
                    self.escape_attempts += 1;
                    self.history.clear();
                    debug!(
                        x = next.x,
                        y = next.y,
                        attempts = self.escape_attempts,
                        "bug2 escape move"
                    );
                    Bug2Step::Move(next)
                }
                None => {
                    warn!(x = robot.pos.x, y = robot.pos.y, "bug2 stuck with no escape direction");
                    Bug2Step::Stalled
                }
            };
        }

        let transition = self.transition(self.state, robot, field);
        if let Some(contact) = transition.contact {
            let distance = contact.distance(&self.target);
            debug!(x = contact.x, y = contact.y, distance, "bug2 boundary contact");
            self.contact = Some((contact, distance));
        }
        if transition.state != self.state {
            debug!(from = ?self.state, to = ?transition.state, "bug2 state change");
            self.state = transition.state;
        }

        match transition.next {
            Some(next) => Bug2Step::Move(next),
            None => {
                warn!(x = robot.pos.x, y = robot.pos.y, "bug2 found no boundary move");
                Bug2Step::Stalled
            }
        }
    }

    /// Evaluate the state machine from `state` without mutating the planner
    pub fn transition(
        &self,
        state: Bug2State,
        robot: &Robot,
        field: &impl SpatialField,
    ) -> Transition {
        match state {
            Bug2State::TowardsTarget => {
                let candidate = self.towards_target(robot);
                if !self.is_blocked(robot, field, candidate) {
                    return Transition {
                        state: Bug2State::TowardsTarget,
                        next: Some(candidate),
                        contact: None,
                    };
                }

                Transition {
                    state: Bug2State::FollowBoundary,
                    next: self.boundary_move(robot, field),
                    contact: Some(robot.pos),
                }
            }
            Bug2State::FollowBoundary => {
                let next = self.boundary_move(robot, field);
                let leave_distance = self.contact.map_or(f64::INFINITY, |(_, d)| d);
                let state = match next {
                    Some(p) if p.distance(&self.target) < leave_distance => {
                        Bug2State::TowardsTarget
                    }
                    _ => Bug2State::FollowBoundary,
                };

                Transition {
                    state,
                    next,
                    contact: None,
                }
            }
        }
    }

    /// One speed-length step toward the target, landing on it when it is
    /// within reach
    fn towards_target(&self, robot: &Robot) -> Point {
        let offset = self.target - robot.pos;
        if offset.norm() <= robot.speed + ARRIVAL_EPSILON {
            return self.target;
        }
        match offset.normalized() {
            Some(direction) => robot.pos + direction * robot.speed,
            None => self.target,
        }
    }

    fn is_blocked(&self, robot: &Robot, field: &impl SpatialField, candidate: Point) -> bool {
        if !field.is_free(candidate, robot.radius) {
            return true;
        }

        let Some(sensor) = robot.sensor.as_ref() else {
            return false;
        };

        // Sensed obstacle points inside the forward cone that the body would sweep over
        let heading = robot.pos.angle_to(&candidate);
        let reach = robot.pos.distance(&candidate) + robot.radius;
        let step = sensor.angle_step() as f64;
        let rays = (CONE_HALF_ANGLE / step).floor() as i32;

        (-rays..=rays).any(|k| {
            let angle = heading + k as f64 * step;
            let distance = sensor.sense_at_angle(field, robot.pos, angle, None);
            if distance > reach {
                return false;
            }
            let estimate = robot.pos + Point::from_polar(angle, distance);
            field.is_obstacle(estimate)
                && segment_distance(estimate, robot.pos, candidate) <= robot.radius
        })
    }

    /// Free boundary step, avoiding an immediate return to `prev_pos` while
    /// any other free step exists
    fn boundary_move(&self, robot: &Robot, field: &impl SpatialField) -> Option<Point> {
        let step_to = |angle: f64| robot.pos + Point::from_polar(angle, robot.speed);

        let candidates: Vec<Point> = match robot.sensor.as_ref() {
            Some(sensor) => {
                let target_bearing = robot.pos.angle_to(&self.target);
                let mut directions: Vec<(u32, f64)> =
                    sensor.sense(field, robot.pos, Some(robot.radius)).iter().collect();
                directions.sort_by(|a, b| {
                    b.1.total_cmp(&a.1).then_with(|| {
                        angular_gap(a.0 as f64, target_bearing)
                            .total_cmp(&angular_gap(b.0 as f64, target_bearing))
                    })
                });
                directions
                    .into_iter()
                    .map(|(angle, _)| step_to(angle as f64))
                    .collect()
            }
            None => (0..360).map(|angle| step_to(angle as f64)).collect(),
        };

        let mut free = candidates
            .into_iter()
            .filter(|p| field.is_free(*p, robot.radius));
        let first = free.next()?;

        match robot.prev_pos {
            Some(prev) if first.distance(&prev) <= BACKTRACK_EPSILON => {
                Some(free.find(|p| p.distance(&prev) > BACKTRACK_EPSILON).unwrap_or(first))
            }
            _ => Some(first),
        }
    }

    fn escape(&mut self, robot: &Robot, field: &impl SpatialField) -> Option<Point> {
        let mut directions = Direction::ALL;
        directions.shuffle(&mut self.rng);

        directions
            .into_iter()
            .map(|d| robot.pos + d.unit() * robot.speed)
            .find(|p| field.is_free(*p, robot.radius))
    }
}

/// Distance from `p` to the segment `a`-`b`
fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let length_sq = ab.x * ab.x + ab.y * ab.y;
    if length_sq <= f64::EPSILON {
        return p.distance(&a);
    }
    let ap = p - a;
    let t = ((ap.x * ab.x + ap.y * ab.y) / length_sq).clamp(0.0, 1.0);
    p.distance(&(a + ab * t))
}

/// Smallest absolute difference between two bearings, in degrees
fn angular_gap(a: f64, b: f64) -> f64 {
    let gap = (a - b).rem_euclid(360.0);
    match gap.partial_cmp(&180.0) {
        Some(Ordering::Greater) => 360.0 - gap,
        _ => gap,
    }
}
