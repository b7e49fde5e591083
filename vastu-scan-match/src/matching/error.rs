//! Scan matching errors.

use thiserror::Error;

/// Precondition failures reported by the matcher.
///
/// Broken internal invariants (candidate count mismatch, impossible scores)
/// are not represented here; they panic with a diagnostic.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    /// The point cloud to match has no points.
    #[error("point cloud is empty")]
    EmptyPointCloud,

    /// Grid resolution is zero, negative or not finite.
    #[error("grid resolution must be positive and finite, got {0}")]
    InvalidResolution(f32),

    /// A configuration value is out of range.
    #[error("invalid matcher configuration: {0}")]
    InvalidConfig(String),

    /// A scan point has a NaN or infinite coordinate.
    #[error("point {0} of the point cloud is not finite")]
    NonFinitePoint(usize),

    /// The scan reaches so far that the angular step rounds to zero.
    #[error("max scan range {0} is too large to derive an angular step")]
    ScanRangeTooLarge(f32),
}
