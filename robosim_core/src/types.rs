//! Position and direction primitives
//!
//! `Position<T>` is the 2D coordinate used everywhere in robosim. Grid code
//! works with [`GridPos`] (integer cells), continuous code with [`Point`].
//!
//! # Example
//!
//! ```rust
//! use robosim_core::types::{GridPos, Point};
//!
//! let cell = GridPos::new(2, 3) + (1, 0);
//! assert_eq!(cell, GridPos::new(3, 3));
//!
//! let p = Point::new(3.0, 4.0);
//! assert_eq!(p.norm(), 5.0);
//! assert_eq!(p * 2.0, Point::new(6.0, 8.0));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// 2D coordinate
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(from = "[T; 2]", into = "[T; 2]")]
#[serde(bound(serialize = "T: Copy + Serialize", deserialize = "T: Deserialize<'de>"))]
pub struct Position<T> {
    pub x: T,
    pub y: T,
}

/// Integer grid cell
pub type GridPos = Position<i32>;

/// Point in the continuous plane
pub type Point = Position<f64>;

impl<T> Position<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T> From<[T; 2]> for Position<T> {
    fn from([x, y]: [T; 2]) -> Self {
        Self { x, y }
    }
}

impl<T> From<Position<T>> for [T; 2] {
    fn from(pos: Position<T>) -> Self {
        [pos.x, pos.y]
    }
}

impl<T> From<(T, T)> for Position<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

impl<T: fmt::Display> fmt::Display for Position<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl<T: Add<Output = T>> Add for Position<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Add<Output = T>> Add<(T, T)> for Position<T> {
    type Output = Self;

    fn add(self, rhs: (T, T)) -> Self {
        Self::new(self.x + rhs.0, self.y + rhs.1)
    }
}

impl<T: Sub<Output = T>> Sub for Position<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: Sub<Output = T>> Sub<(T, T)> for Position<T> {
    type Output = Self;

    fn sub(self, rhs: (T, T)) -> Self {
        Self::new(self.x - rhs.0, self.y - rhs.1)
    }
}

impl<T: Mul<Output = T> + Copy> Mul<T> for Position<T> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl<T: Div<Output = T> + Copy> Div<T> for Position<T> {
    type Output = Self;

    fn div(self, rhs: T) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl<T: Neg<Output = T>> Neg for Position<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl GridPos {
    /// Manhattan distance between two cells
    pub fn manhattan_distance(&self, other: &GridPos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Cell center in the continuous plane
    pub fn to_point(self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }

    /// The four cardinal neighbours, in `Direction::ALL` order
    pub fn neighbors(self) -> [GridPos; 4] {
        Direction::ALL.map(|d| self + d.offset())
    }
}

impl Point {
    /// Euclidean distance
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Manhattan distance
    pub fn manhattan_distance(&self, other: &Point) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Vector length
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Unit vector in the same direction, `None` for the zero vector
    pub fn normalized(self) -> Option<Point> {
        let norm = self.norm();
        if norm <= f64::EPSILON {
            None
        } else {
            Some(self / norm)
        }
    }

    /// Bearing from `self` to `other` in degrees, normalised to `[0, 360)`
    pub fn angle_to(&self, other: &Point) -> f64 {
        (other.y - self.y)
            .atan2(other.x - self.x)
            .to_degrees()
            .rem_euclid(360.0)
    }

    /// Offset of `length` along a bearing given in degrees
    pub fn from_polar(angle_deg: f64, length: f64) -> Point {
        let rad = angle_deg.to_radians();
        Point::new(length * rad.cos(), length * rad.sin())
    }

    /// Nearest grid cell
    pub fn to_grid(self) -> GridPos {
        GridPos::new(self.x.round() as i32, self.y.round() as i32)
    }
}

impl From<GridPos> for Point {
    fn from(pos: GridPos) -> Self {
        pos.to_point()
    }
}

/// Cardinal move direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Integer cell offset
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Unit vector in the continuous plane
    pub fn unit(self) -> Point {
        let (dx, dy) = self.offset();
        Point::new(dx as f64, dy as f64)
    }
}
