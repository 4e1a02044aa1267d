//! Continuous 2D environment with shaped obstacles
//!
//! Bounds are inclusive: a point is inside when `0 <= x <= width` and
//! `0 <= y <= height`. Obstacle queries scan the object list, which is
//! expected to stay small.
//!
//! # Example
//!
//! ```rust
//! use robosim_core::field::{Environment, SpatialField};
//! use robosim_core::types::Point;
//!
//! let mut env = Environment::new(10.0, 10.0);
//! env.add_obstacle_at(Point::new(5.0, 5.0)).unwrap();
//! env.set_target(Point::new(8.0, 8.0)).unwrap();
//!
//! assert!(env.is_obstacle_in_range(Point::new(5.8, 5.0), 0.5));
//! assert!(!env.is_obstacle(Point::new(8.0, 8.0)));
//! ```

use super::objects::EnvObject;
use super::SpatialField;
use crate::error::{Placement, RoboSimError, RoboSimResult};
use crate::types::Point;
use rand::Rng;
use tracing::{info, warn};

/// Continuous environment
#[derive(Debug, Clone)]
pub struct Environment {
    width: f64,
    height: f64,
    objects: Vec<EnvObject>,
    target: Option<EnvObject>,
}

impl Environment {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            objects: Vec::new(),
            target: None,
        }
    }

    /// Add an obstacle; its centre must lie inside the bounds
    pub fn add_obstacle(&mut self, obstacle: EnvObject) -> RoboSimResult<()> {
        if !self.is_within_bounds(obstacle.pos) {
            return Err(RoboSimError::invalid_position(
                Placement::Obstacle,
                obstacle.pos,
                self.bounds(),
            ));
        }
        self.objects.push(obstacle);
        Ok(())
    }

    /// Add a default circular obstacle
    pub fn add_obstacle_at(&mut self, pos: Point) -> RoboSimResult<()> {
        self.add_obstacle(EnvObject::obstacle(pos))
    }

    /// Place `count` default obstacles on distinct random integer coordinates
    ///
    /// Positions closer than one unit to any `keep_clear` point are skipped.
    pub fn add_random_obstacles(
        &mut self,
        count: usize,
        keep_clear: &[Point],
        rng: &mut impl Rng,
    ) -> RoboSimResult<()> {
        let max_x = (self.width as i32 - 1).max(0);
        let max_y = (self.height as i32 - 1).max(0);
        let admissible = (0..=max_y)
            .flat_map(|y| (0..=max_x).map(move |x| Point::new(x as f64, y as f64)))
            .filter(|pos| !self.is_taken(*pos, keep_clear))
            .count();
        if count > admissible {
            return Err(RoboSimError::InvalidConfig(format!(
                "cannot place {} obstacles in a {} x {} environment, only {} free positions",
                count, self.width, self.height, admissible
            )));
        }

        let mut placed = 0;
        while placed < count {
            let pos = Point::new(
                rng.gen_range(0..=max_x) as f64,
                rng.gen_range(0..=max_y) as f64,
            );
            if self.is_taken(pos, keep_clear) {
                continue;
            }
            self.add_obstacle_at(pos)?;
            placed += 1;
        }
        Ok(())
    }

    /// Place the target object
    pub fn set_target(&mut self, pos: Point) -> RoboSimResult<()> {
        if !self.is_within_bounds(pos) {
            return Err(RoboSimError::invalid_position(
                Placement::Target,
                pos,
                self.bounds(),
            ));
        }

        let target = EnvObject::target(pos);
        if self.objects.iter().any(|o| o.object_within_range(&target)) {
            warn!("Target at {} touches an obstacle", pos);
        }
        self.target = Some(target);
        info!("Target set at {}", pos);
        Ok(())
    }

    fn is_taken(&self, pos: Point, keep_clear: &[Point]) -> bool {
        self.objects.iter().any(|o| o.pos == pos)
            || keep_clear.iter().any(|p| p.distance(&pos) < 1.0)
    }

    pub fn target(&self) -> Option<&EnvObject> {
        self.target.as_ref()
    }

    pub fn objects(&self) -> &[EnvObject] {
        &self.objects
    }

    fn obstacles(&self) -> impl Iterator<Item = &EnvObject> {
        self.objects.iter().filter(|o| o.is_obstacle())
    }
}

impl SpatialField for Environment {
    fn bounds(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn is_within_bounds(&self, pos: Point) -> bool {
        (0.0..=self.width).contains(&pos.x) && (0.0..=self.height).contains(&pos.y)
    }

    fn is_obstacle(&self, pos: Point) -> bool {
        self.obstacles().any(|o| o.contains_point(pos))
    }

    fn is_obstacle_in_range(&self, pos: Point, radius: f64) -> bool {
        self.obstacles().any(|o| o.overlaps(pos, radius))
    }

    fn obstacle_positions(&self) -> Vec<Point> {
        self.obstacles().map(|o| o.pos).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Shape;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_inclusive_bounds() {
        let env = Environment::new(10.0, 5.0);

        assert!(env.is_within_bounds(Point::new(0.0, 0.0)));
        assert!(env.is_within_bounds(Point::new(10.0, 5.0)));
        assert!(!env.is_within_bounds(Point::new(10.1, 5.0)));
        assert!(!env.is_within_bounds(Point::new(3.0, -0.1)));
    }

    #[test]
    fn test_obstacle_queries() {
        let mut env = Environment::new(10.0, 10.0);
        env.add_obstacle_at(Point::new(3.0, 3.0)).unwrap();
        env.add_obstacle(
            EnvObject::obstacle(Point::new(7.0, 7.0)).with_shape(Shape::Square { side: 2.0 }),
        )
        .unwrap();

        assert!(env.is_obstacle(Point::new(3.2, 3.2)));
        assert!(env.is_obstacle(Point::new(7.9, 6.1)));
        assert!(!env.is_obstacle(Point::new(5.0, 5.0)));

        assert!(env.is_obstacle_in_range(Point::new(4.0, 3.0), 0.6));
        assert!(!env.is_obstacle_in_range(Point::new(4.0, 3.0), 0.4));
        assert_eq!(env.obstacle_positions().len(), 2);
    }

    #[test]
    fn test_out_of_bounds_placement() {
        let mut env = Environment::new(10.0, 10.0);

        assert!(env.add_obstacle_at(Point::new(11.0, 0.0)).is_err());
        assert!(matches!(
            env.set_target(Point::new(-1.0, 2.0)),
            Err(RoboSimError::InvalidPosition {
                kind: Placement::Target,
                ..
            })
        ));
    }

    #[test]
    fn test_target_is_not_an_obstacle() {
        let mut env = Environment::new(10.0, 10.0);
        env.set_target(Point::new(8.0, 8.0)).unwrap();

        assert!(!env.is_obstacle(Point::new(8.0, 8.0)));
        assert_eq!(env.target().map(|t| t.pos), Some(Point::new(8.0, 8.0)));
    }

    #[test]
    fn test_random_obstacles_are_distinct() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut env = Environment::new(10.0, 10.0);
        let start = Point::new(1.0, 1.0);

        env.add_random_obstacles(15, &[start], &mut rng).unwrap();

        let positions = env.obstacle_positions();
        assert_eq!(positions.len(), 15);
        for (i, a) in positions.iter().enumerate() {
            assert!(a.distance(&start) >= 1.0);
            assert!(positions[i + 1..].iter().all(|b| b != a));
        }
    }

    #[test]
    fn test_random_obstacles_capacity_counts_keep_clear_area() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut env = Environment::new(2.0, 2.0);

        // (0.5, 0.5) is closer than one unit to all four integer positions
        let err = env
            .add_random_obstacles(3, &[Point::new(0.5, 0.5)], &mut rng)
            .unwrap_err();
        assert!(matches!(err, RoboSimError::InvalidConfig(_)));
        assert!(env.obstacle_positions().is_empty());

        env.add_random_obstacles(0, &[Point::new(0.5, 0.5)], &mut rng)
            .unwrap();
    }
}
