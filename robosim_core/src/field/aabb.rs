//! Axis-aligned bounding boxes for square obstacles
//!
//! # Example
//!
//! ```rust
//! use robosim_core::field::Aabb;
//! use robosim_core::types::Point;
//!
//! let cell = Aabb::from_center(Point::new(2.0, 2.0), 1.0, 1.0);
//! assert!(cell.contains_point(Point::new(2.4, 1.6)));
//! assert!(cell.overlaps_circle(Point::new(3.2, 2.0), 0.5));
//! ```

use crate::types::Point;

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point,
    pub max: Point,
}

impl Aabb {
    /// Create new AABB from min/max corners
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Create AABB from center and size
    pub fn from_center(center: Point, width: f64, height: f64) -> Self {
        let half = Point::new(width / 2.0, height / 2.0);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Check if this AABB overlaps another (touching edges do not count)
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.max.x > other.min.x
            && self.min.x < other.max.x
            && self.max.y > other.min.y
            && self.min.y < other.max.y
    }

    /// Check if point is inside AABB (edges included)
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Closest point of the box to `p`
    pub fn closest_point(&self, p: Point) -> Point {
        Point::new(
            p.x.clamp(self.min.x, self.max.x),
            p.y.clamp(self.min.y, self.max.y),
        )
    }

    /// Distance from `p` to the box, zero when inside
    pub fn distance_to_point(&self, p: Point) -> f64 {
        self.closest_point(p).distance(&p)
    }

    /// Check if a circle overlaps the box
    pub fn overlaps_circle(&self, center: Point, radius: f64) -> bool {
        if self.contains_point(center) {
            return true;
        }
        self.distance_to_point(center) < radius
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        (self.min + self.max) / 2.0
    }
}
