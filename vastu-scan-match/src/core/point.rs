//! World and grid coordinate types.

use std::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};

/// A point in world (or sensor) coordinates, in meters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    /// X coordinate (meters, forward).
    pub x: f32,
    /// Y coordinate (meters, left).
    pub y: f32,
}

impl WorldPoint {
    /// The origin.
    pub const ZERO: WorldPoint = WorldPoint { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Distance from the origin.
    #[inline]
    pub fn length(&self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: &WorldPoint) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Rotate about the origin by `angle` radians (CCW positive).
    #[inline]
    pub fn rotated(&self, angle: f32) -> WorldPoint {
        let (sin, cos) = angle.sin_cos();
        WorldPoint::new(cos * self.x - sin * self.y, sin * self.x + cos * self.y)
    }
}

impl Add for WorldPoint {
    type Output = WorldPoint;

    #[inline]
    fn add(self, rhs: WorldPoint) -> WorldPoint {
        WorldPoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for WorldPoint {
    type Output = WorldPoint;

    #[inline]
    fn sub(self, rhs: WorldPoint) -> WorldPoint {
        WorldPoint::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Integer cell index into a grid.
///
/// Offsets between candidate poses are applied by plain integer addition on
/// these coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoord {
    /// Column index.
    pub x: i32,
    /// Row index.
    pub y: i32,
}

impl GridCoord {
    /// Create a new grid coordinate.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, other: GridCoord) -> GridCoord {
        GridCoord::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: GridCoord) -> GridCoord {
        GridCoord::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// Addition clamped to the `i32` range.
    ///
    /// Points far outside a grid discretize to saturated indices; offsets
    /// applied to them must not wrap back into the grid.
    #[inline]
    pub fn saturating_add(self, rhs: GridCoord) -> GridCoord {
        GridCoord::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }

    /// Subtraction clamped to the `i32` range.
    #[inline]
    pub fn saturating_sub(self, rhs: GridCoord) -> GridCoord {
        GridCoord::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }

    /// Negation clamped to the `i32` range (`i32::MIN` maps to `i32::MAX`).
    #[inline]
    pub fn saturating_neg(self) -> GridCoord {
        GridCoord::new(self.x.saturating_neg(), self.y.saturating_neg())
    }
}

impl Add for GridCoord {
    type Output = GridCoord;

    #[inline]
    fn add(self, rhs: GridCoord) -> GridCoord {
        GridCoord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for GridCoord {
    type Output = GridCoord;

    #[inline]
    fn sub(self, rhs: GridCoord) -> GridCoord {
        GridCoord::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for GridCoord {
    type Output = GridCoord;

    #[inline]
    fn neg(self) -> GridCoord {
        GridCoord::new(-self.x, -self.y)
    }
}
