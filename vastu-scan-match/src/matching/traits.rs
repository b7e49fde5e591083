//! Traits for scan matching algorithms.

use crate::core::{PointCloud, Pose2D};
use crate::grid::Grid2D;

use super::{MatchError, ScanMatchResult};

/// Trait for scan-to-map matching algorithms.
///
/// # Example
///
/// ```rust
/// use vastu_scan_match::core::{PointCloud, Pose2D};
/// use vastu_scan_match::grid::Grid2D;
/// use vastu_scan_match::matching::ScanMatcher;
///
/// fn localize<M: ScanMatcher>(
///     matcher: &M,
///     scan: &PointCloud,
///     initial_pose: Pose2D,
///     map: &Grid2D,
/// ) -> Pose2D {
///     match matcher.match_scan(initial_pose, scan, map) {
///         Ok(result) if result.is_acceptable() => result.pose,
///         _ => initial_pose,
///     }
/// }
/// ```
pub trait ScanMatcher: Send + Sync {
    /// Align `point_cloud` (robot frame) to `grid` starting from `initial_pose`.
    fn match_scan(
        &self,
        initial_pose: Pose2D,
        point_cloud: &PointCloud,
        grid: &Grid2D,
    ) -> Result<ScanMatchResult, MatchError>;

    /// Get the name of this matcher for logging/debugging
    fn name(&self) -> &str;
}
