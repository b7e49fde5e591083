//! Rigid 2D pose.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use super::point::WorldPoint;

/// Normalize an angle to the range (-π, π].
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let mut a = angle % (2.0 * PI);
    if a > PI {
        a -= 2.0 * PI;
    } else if a <= -PI {
        a += 2.0 * PI;
    }
    a
}

/// Rigid 2D transform: translation (x, y) in meters and rotation theta in radians.
///
/// Applying a pose to a point rotates it by `theta` and then translates it by
/// `(x, y)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose2D {
    /// X position (meters).
    pub x: f32,
    /// Y position (meters).
    pub y: f32,
    /// Orientation (radians, CCW positive from +X).
    pub theta: f32,
}

impl Pose2D {
    /// Create a new pose.
    #[inline]
    pub const fn new(x: f32, y: f32, theta: f32) -> Self {
        Self { x, y, theta }
    }

    /// The identity transform.
    #[inline]
    pub const fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Translation part as a point.
    #[inline]
    pub fn position(&self) -> WorldPoint {
        WorldPoint::new(self.x, self.y)
    }

    /// Transform a point from the local frame of this pose into the parent frame.
    #[inline]
    pub fn transform_point(&self, point: WorldPoint) -> WorldPoint {
        point.rotated(self.theta) + self.position()
    }

    /// Compose two transforms: `self * other`.
    pub fn compose(&self, other: &Pose2D) -> Pose2D {
        let p = self.transform_point(other.position());
        Pose2D::new(p.x, p.y, normalize_angle(self.theta + other.theta))
    }

    /// Same translation, rotation composed with an additional `angle`.
    #[inline]
    pub fn with_rotation_composed(&self, angle: f32) -> Pose2D {
        Pose2D::new(self.x, self.y, normalize_angle(self.theta + angle))
    }
}
