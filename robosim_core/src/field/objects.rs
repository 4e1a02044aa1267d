//! Objects placed in a continuous environment

use super::aabb::Aabb;
use crate::types::Point;
use serde::{Deserialize, Serialize};

/// Default radius of obstacles and targets
pub const DEFAULT_OBJECT_RADIUS: f64 = 0.5;

/// Obstacle footprint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum Shape {
    Circle { radius: f64 },
    Square { side: f64 },
}

impl Default for Shape {
    fn default() -> Self {
        Shape::Circle {
            radius: DEFAULT_OBJECT_RADIUS,
        }
    }
}

impl Shape {
    /// Radius of the smallest circle around the shape
    pub fn bounding_radius(&self) -> f64 {
        match *self {
            Shape::Circle { radius } => radius,
            Shape::Square { side } => side * std::f64::consts::FRAC_1_SQRT_2,
        }
    }

    /// Distance from the shape placed at `center` to `p`, zero when inside
    pub fn distance_to(&self, center: Point, p: Point) -> f64 {
        match *self {
            Shape::Circle { radius } => (center.distance(&p) - radius).max(0.0),
            Shape::Square { side } => Aabb::from_center(center, side, side).distance_to_point(p),
        }
    }

    /// Strict overlap with a circle at `p`
    pub fn overlaps_circle(&self, center: Point, p: Point, radius: f64) -> bool {
        match *self {
            Shape::Circle { radius: own } => center.distance(&p) < own + radius,
            Shape::Square { side } => {
                Aabb::from_center(center, side, side).overlaps_circle(p, radius)
            }
        }
    }
}

/// Role of an object in the environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Obstacle,
    Target,
}

/// An object with a position and a footprint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvObject {
    pub pos: Point,
    pub shape: Shape,
    pub kind: ObjectKind,
}

impl EnvObject {
    /// Circular obstacle with the default radius
    pub fn obstacle(pos: Point) -> Self {
        Self {
            pos,
            shape: Shape::default(),
            kind: ObjectKind::Obstacle,
        }
    }

    /// Circular target with the default radius
    pub fn target(pos: Point) -> Self {
        Self {
            pos,
            shape: Shape::default(),
            kind: ObjectKind::Target,
        }
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    pub fn radius(&self) -> f64 {
        self.shape.bounding_radius()
    }

    pub fn is_obstacle(&self) -> bool {
        self.kind == ObjectKind::Obstacle
    }

    /// Check if a point lies inside the object
    pub fn contains_point(&self, p: Point) -> bool {
        self.shape.distance_to(self.pos, p) <= 0.0
    }

    /// Check if a body of `other_radius` at `pos` is touching or inside the object
    pub fn position_within_range(&self, pos: Point, other_radius: f64) -> bool {
        self.shape.distance_to(self.pos, pos) <= other_radius
    }

    /// Check if another object is touching or inside this one
    pub fn object_within_range(&self, other: &EnvObject) -> bool {
        self.position_within_range(other.pos, other.radius())
    }

    /// Check if a body of `radius` at `pos` overlaps the object
    pub fn overlaps(&self, pos: Point, radius: f64) -> bool {
        self.shape.overlaps_circle(self.pos, pos, radius)
    }
}
