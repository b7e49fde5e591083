//! Ordered 2D point cloud in a local frame.

use super::point::WorldPoint;
use super::pose::Pose2D;

/// Ordered sequence of 2D points (meters).
///
/// Range scans arrive as point clouds in the robot frame. Transform helpers
/// always return a new cloud; the input is never modified.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointCloud {
    points: Vec<WorldPoint>,
}

impl PointCloud {
    /// Create a point cloud from points.
    pub fn new(points: Vec<WorldPoint>) -> Self {
        Self { points }
    }

    /// Create from `(x, y)` tuples.
    pub fn from_xy(points: &[(f32, f32)]) -> Self {
        Self::new(points.iter().map(|&(x, y)| WorldPoint::new(x, y)).collect())
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Is the cloud empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over points in order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, WorldPoint> {
        self.points.iter()
    }

    /// Points as a slice.
    #[inline]
    pub fn points(&self) -> &[WorldPoint] {
        &self.points
    }

    /// Rotate every point about the origin by `angle` radians.
    pub fn rotated(&self, angle: f32) -> PointCloud {
        let (sin, cos) = angle.sin_cos();
        self.points
            .iter()
            .map(|p| WorldPoint::new(cos * p.x - sin * p.y, sin * p.x + cos * p.y))
            .collect()
    }

    /// Translate every point by `(dx, dy)`.
    pub fn translated(&self, dx: f32, dy: f32) -> PointCloud {
        self.points
            .iter()
            .map(|p| WorldPoint::new(p.x + dx, p.y + dy))
            .collect()
    }

    /// Apply a rigid transform to every point.
    pub fn transformed(&self, pose: &Pose2D) -> PointCloud {
        self.rotated(pose.theta).translated(pose.x, pose.y)
    }

    /// Largest distance of any point from the origin (0 for an empty cloud).
    pub fn max_range(&self) -> f32 {
        self.points.iter().map(WorldPoint::length).fold(0.0, f32::max)
    }
}

impl FromIterator<WorldPoint> for PointCloud {
    fn from_iter<I: IntoIterator<Item = WorldPoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PointCloud {
    type Item = &'a WorldPoint;
    type IntoIter = std::slice::Iter<'a, WorldPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
