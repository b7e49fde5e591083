//! # VastuScanMatch
//!
//! Real-time correlative 2D scan matching against occupancy and TSDF grids.
//!
//! ## Overview
//!
//! Given a lidar point cloud in the robot frame, an initial pose estimate and
//! a grid map, the matcher exhaustively scores every pose in a bounded window
//! around the estimate and returns the best one:
//!
//! - **Rotations**: one rotated copy of the scan per angular step
//! - **Translations**: integer cell offsets applied to the discretized scan
//! - **Scoring**: grid correspondence score times a distance penalty
//!
//! The result is typically used to seed a local optimizer, or as the pose
//! itself when odometry is good and the window is small.
//!
//! ## Quick Start
//!
//! ```rust
//! use vastu_scan_match::{
//!     CellLimits, Grid2D, GridCoord, MapLimits, PointCloud, Pose2D, ProbabilityGrid,
//!     RealTimeCorrelativeMatcher, RealTimeMatcherConfig,
//! };
//!
//! // A wall along x = 1.025m
//! let limits = MapLimits::new(0.05, Default::default(), CellLimits::new(40, 40));
//! let mut grid = ProbabilityGrid::new(limits);
//! for y in 0..40 {
//!     grid.mark_occupied(GridCoord::new(20, y));
//! }
//! let grid = Grid2D::from(grid);
//!
//! // The robot sees the wall 0.5m ahead but odometry is 5cm short
//! let scan = PointCloud::from_xy(&[(0.5, -0.1), (0.5, 0.0), (0.5, 0.1)]);
//! let odometry = Pose2D::new(0.475, 1.0, 0.0);
//!
//! let matcher = RealTimeCorrelativeMatcher::new(RealTimeMatcherConfig::fast());
//! let result = matcher.match_scan(odometry, &scan, &grid)?;
//! assert!((result.pose.x - 0.525).abs() < 1e-4);
//! # Ok::<(), vastu_scan_match::MatchError>(())
//! ```
//!
//! ## Coordinate System
//!
//! Uses ROS REP-103 convention:
//! - X: Forward (positive ahead of robot)
//! - Y: Left (positive to robot's left)
//! - Theta: Rotation in radians, CCW positive from +X axis

#![warn(missing_docs)]

// Core types
pub mod core;

// Read-only grid maps
pub mod grid;

// YAML configuration
pub mod config;

// Real-time correlative scan matching
pub mod matching;

// Re-export commonly used types
pub use crate::core::{GridCoord, PointCloud, Pose2D, WorldPoint, normalize_angle};

pub use grid::{CellLimits, Grid2D, GridType, MapLimits, ProbabilityGrid, TsdfGrid};

pub use config::{ConfigLoadError, VastuMatchConfig};

pub use matching::{
    MatchError, MatchQuality, RealTimeCorrelativeMatcher, RealTimeMatcherConfig,
    ScanMatchResult, ScanMatcher,
};
