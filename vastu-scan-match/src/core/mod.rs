//! Core geometry types for the scan matcher.
//!
//! All types follow the ROS REP-103 coordinate convention:
//! - **X-axis**: Forward (positive ahead of robot)
//! - **Y-axis**: Left (positive to robot's left)
//! - **Theta**: Counter-clockwise rotation from +X axis (radians)
//!
//! ## Types
//!
//! - [`WorldPoint`]: Floating-point coordinates in meters
//! - [`GridCoord`]: Integer cell indices for grid access
//! - [`Pose2D`]: Rigid 2D transform (x, y, theta)
//! - [`PointCloud`]: Ordered scan points in a local frame
//!
//! ## Example
//!
//! ```rust
//! use vastu_scan_match::core::{PointCloud, Pose2D, WorldPoint};
//!
//! // Robot pose: 1m forward, 2m left, facing 90° CCW
//! let pose = Pose2D::new(1.0, 2.0, std::f32::consts::FRAC_PI_2);
//!
//! // Sensor point 1m ahead of the robot lands at (1, 3) in the world
//! let world = pose.transform_point(WorldPoint::new(1.0, 0.0));
//! assert!((world.y - 3.0).abs() < 1e-5);
//!
//! let cloud = PointCloud::from_xy(&[(1.0, 0.0), (0.0, 1.0)]);
//! let world_cloud = cloud.transformed(&pose);
//! assert_eq!(world_cloud.len(), 2);
//! ```

mod point;
mod point_cloud;
mod pose;

pub use point::{GridCoord, WorldPoint};
pub use point_cloud::PointCloud;
pub use pose::{Pose2D, normalize_angle};
