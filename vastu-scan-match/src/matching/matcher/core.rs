//! Real-time correlative scan matcher implementation.

use rayon::prelude::*;

use crate::core::{PointCloud, Pose2D, normalize_angle};
use crate::grid::Grid2D;
use crate::matching::candidate::{
    Candidate2D, ScoredCandidate2D, generate_exhaustive_search_candidates, select_best,
};
use crate::matching::config::RealTimeMatcherConfig;
use crate::matching::error::MatchError;
use crate::matching::scoring::{candidate_score, distance_penalty};
use crate::matching::search::{
    DiscreteScan2D, SearchParameters, discretize_scans, discretize_scans_par,
    generate_rotated_scans, generate_rotated_scans_par,
};
use crate::matching::traits::ScanMatcher;
use crate::matching::types::ScanMatchResult;

/// Exhaustive correlative scan matcher ("computing 2D slices").
///
/// Every pose in the search window around the initial estimate is scored;
/// there is no pruning. The scan is rotated and discretized once per angular
/// step, so each linear offset costs one grid lookup per point.
///
/// The matcher holds no state between calls and can be shared across threads
/// matching different scans against the same grid.
#[derive(Clone, Debug, Default)]
pub struct RealTimeCorrelativeMatcher {
    config: RealTimeMatcherConfig,
}

impl RealTimeCorrelativeMatcher {
    /// Create a new matcher.
    pub fn new(config: RealTimeMatcherConfig) -> Self {
        Self { config }
    }

    /// Create with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(RealTimeMatcherConfig::default())
    }

    /// Get configuration.
    pub fn config(&self) -> &RealTimeMatcherConfig {
        &self.config
    }

    /// Align a scan to the grid.
    ///
    /// # Arguments
    /// * `initial_pose` - Initial pose estimate (e.g., from odometry)
    /// * `point_cloud` - Scan points in the robot frame
    /// * `grid` - The map to match against
    ///
    /// # Returns
    /// The refined pose and the winning candidate's score.
    pub fn match_scan(
        &self,
        initial_pose: Pose2D,
        point_cloud: &PointCloud,
        grid: &Grid2D,
    ) -> Result<ScanMatchResult, MatchError> {
        self.config.validate()?;
        if point_cloud.is_empty() {
            return Err(MatchError::EmptyPointCloud);
        }
        if let Some(index) = point_cloud
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite()))
        {
            return Err(MatchError::NonFinitePoint(index));
        }

        // Rotation index 0 of the search now corresponds to the initial heading.
        let rotated_point_cloud = point_cloud.rotated(initial_pose.theta);
        let mut search_parameters = SearchParameters::new(
            self.config.linear_search_window,
            self.config.angular_search_window,
            &rotated_point_cloud,
            grid.resolution(),
        )?;

        let limits = grid.limits();
        let translation = initial_pose.position();
        let discrete_scans = if self.config.use_parallel {
            let rotated_scans = generate_rotated_scans_par(&rotated_point_cloud, &search_parameters);
            discretize_scans_par(limits, &rotated_scans, translation)
        } else {
            let rotated_scans = generate_rotated_scans(&rotated_point_cloud, &search_parameters);
            discretize_scans(limits, &rotated_scans, translation)
        };
        search_parameters.shrink_to_fit(&discrete_scans, limits.cell_limits());

        log::trace!(
            "{} search: {} rotations of {:.4} rad, {} candidates",
            grid.grid_type(),
            search_parameters.num_scans(),
            search_parameters.angular_step(),
            search_parameters.num_candidates()
        );

        let candidates = generate_exhaustive_search_candidates(&search_parameters);
        let scored =
            self.score_candidates(grid, &discrete_scans, &search_parameters, &candidates);
        // shrink_to_fit keeps the zero offset of every rotation.
        let Some(best) = select_best(&scored) else {
            unreachable!("search window without candidates");
        };

        let pose = Pose2D::new(
            initial_pose.x + best.candidate.x,
            initial_pose.y + best.candidate.y,
            normalize_angle(initial_pose.theta + best.candidate.orientation),
        );

        log::debug!(
            "Matched {} points: score={:.3}, offset=({:.3}, {:.3}, {:.4}), {} candidates",
            point_cloud.len(),
            best.score,
            best.candidate.x,
            best.candidate.y,
            best.candidate.orientation,
            scored.len()
        );

        Ok(ScanMatchResult::new(
            pose,
            best.score,
            scored.len(),
            search_parameters.num_scans(),
        ))
    }

    /// Score every candidate against the grid.
    ///
    /// Each score is the grid-specific correspondence score of the candidate's
    /// discrete scan shifted by its offset, times the distance penalty. The
    /// returned collection is in the same order as `candidates`.
    ///
    /// # Panics
    /// If `discrete_scans` does not hold one scan per rotation of
    /// `search_parameters`, or a candidate's score violates the grid's
    /// positivity invariant.
    pub fn score_candidates(
        &self,
        grid: &Grid2D,
        discrete_scans: &[DiscreteScan2D],
        search_parameters: &SearchParameters,
        candidates: &[Candidate2D],
    ) -> Vec<ScoredCandidate2D> {
        assert_eq!(
            discrete_scans.len(),
            search_parameters.num_scans(),
            "expected one discrete scan per rotation"
        );
        let translation_weight = self.config.translation_delta_cost_weight;
        let rotation_weight = self.config.rotation_delta_cost_weight;

        let score = |candidate: &Candidate2D| {
            let raw = candidate_score(
                grid,
                &discrete_scans[candidate.scan_index],
                candidate.x_index_offset,
                candidate.y_index_offset,
            );
            ScoredCandidate2D {
                candidate: *candidate,
                score: raw * distance_penalty(candidate, translation_weight, rotation_weight),
            }
        };

        if self.config.use_parallel {
            candidates.par_iter().map(score).collect()
        } else {
            candidates.iter().map(score).collect()
        }
    }
}

impl ScanMatcher for RealTimeCorrelativeMatcher {
    fn match_scan(
        &self,
        initial_pose: Pose2D,
        point_cloud: &PointCloud,
        grid: &Grid2D,
    ) -> Result<ScanMatchResult, MatchError> {
        RealTimeCorrelativeMatcher::match_scan(self, initial_pose, point_cloud, grid)
    }

    fn name(&self) -> &str {
        "real_time_correlative"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GridCoord, WorldPoint};
    use crate::grid::{CellLimits, MIN_PROBABILITY, MapLimits, ProbabilityGrid, TsdfGrid};
    use approx::assert_relative_eq;

    fn uniform_grid() -> Grid2D {
        let limits = MapLimits::new(0.05, WorldPoint::ZERO, CellLimits::new(5, 5));
        Grid2D::from(ProbabilityGrid::uniform(limits, 0.6))
    }

    fn grid_center() -> Pose2D {
        Pose2D::new(0.125, 0.125, 0.0)
    }

    fn single_point() -> PointCloud {
        PointCloud::from_xy(&[(0.0, 0.0)])
    }

    #[test]
    fn test_empty_window_returns_initial_pose() {
        let matcher = RealTimeCorrelativeMatcher::new(RealTimeMatcherConfig {
            linear_search_window: 0.0,
            angular_search_window: 0.0,
            ..Default::default()
        });

        let result = matcher
            .match_scan(grid_center(), &single_point(), &uniform_grid())
            .unwrap();

        assert_eq!(result.candidates_evaluated, 1);
        assert_eq!(result.num_scans, 1);
        assert_relative_eq!(result.score, 0.6, epsilon = 1e-6);
        assert_eq!(result.pose, grid_center());
    }

    #[test]
    fn test_one_cell_window_generates_nine_candidates() {
        let matcher = RealTimeCorrelativeMatcher::new(RealTimeMatcherConfig {
            linear_search_window: 0.05,
            angular_search_window: 0.0,
            ..Default::default()
        });

        let result = matcher
            .match_scan(grid_center(), &single_point(), &uniform_grid())
            .unwrap();

        assert_eq!(result.candidates_evaluated, 9);
        // Flat map: the penalty picks the zero offset.
        assert_relative_eq!(result.score, 0.6, epsilon = 1e-6);
        assert_eq!(result.pose, grid_center());
    }

    #[test]
    fn test_moves_towards_occupied_cell() {
        let limits = MapLimits::new(0.05, WorldPoint::ZERO, CellLimits::new(20, 20));
        let mut grid = ProbabilityGrid::new(limits);
        grid.mark_occupied(GridCoord::new(11, 10));
        let grid = Grid2D::from(grid);

        let matcher = RealTimeCorrelativeMatcher::new(RealTimeMatcherConfig {
            linear_search_window: 0.1,
            angular_search_window: 0.0,
            ..Default::default()
        });

        // Point lands in cell (10, 10); the wall is one cell to the right.
        let initial = Pose2D::new(0.525, 0.525, 0.0);
        let result = matcher.match_scan(initial, &single_point(), &grid).unwrap();

        assert_relative_eq!(result.pose.x, 0.575, epsilon = 1e-5);
        assert_relative_eq!(result.pose.y, 0.525, epsilon = 1e-5);
        assert!(result.score > 0.85);
    }

    #[test]
    fn test_empty_point_cloud_rejected() {
        let matcher = RealTimeCorrelativeMatcher::with_defaults();
        let err = matcher
            .match_scan(grid_center(), &PointCloud::default(), &uniform_grid())
            .unwrap_err();
        assert_eq!(err, MatchError::EmptyPointCloud);
    }

    #[test]
    fn test_non_finite_point_rejected() {
        let matcher = RealTimeCorrelativeMatcher::with_defaults();
        let cloud = PointCloud::from_xy(&[(0.0, 0.0), (f32::INFINITY, 1.0), (f32::NAN, 0.0)]);
        let err = matcher
            .match_scan(grid_center(), &cloud, &uniform_grid())
            .unwrap_err();
        assert_eq!(err, MatchError::NonFinitePoint(1));
    }

    #[test]
    fn test_far_point_does_not_overflow_offsets() {
        let matcher = RealTimeCorrelativeMatcher::new(RealTimeMatcherConfig {
            linear_search_window: 0.05,
            angular_search_window: 0.0,
            ..Default::default()
        });
        let cloud = PointCloud::from_xy(&[(0.0, 0.0), (-1e12, 0.0)]);

        let result = matcher
            .match_scan(grid_center(), &cloud, &uniform_grid())
            .unwrap();
        // The far point pins x to non-negative offsets.
        assert_eq!(result.candidates_evaluated, 6);
        assert_eq!(result.pose, grid_center());

        let rotating = RealTimeCorrelativeMatcher::with_defaults();
        assert!(matches!(
            rotating.match_scan(grid_center(), &cloud, &uniform_grid()),
            Err(MatchError::ScanRangeTooLarge(_))
        ));
    }

    #[test]
    fn test_scan_outside_grid_keeps_zero_offset() {
        let matcher = RealTimeCorrelativeMatcher::new(RealTimeMatcherConfig {
            linear_search_window: 0.05,
            angular_search_window: 0.0,
            ..Default::default()
        });
        // Lands in cell (20, 20) of a 5 x 5 grid.
        let initial = Pose2D::new(1.025, 1.025, 0.0);

        let result = matcher
            .match_scan(initial, &single_point(), &uniform_grid())
            .unwrap();
        assert_eq!(result.candidates_evaluated, 4);
        assert_eq!(result.pose, initial);
        assert_relative_eq!(result.score, MIN_PROBABILITY, epsilon = 1e-6);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let matcher = RealTimeCorrelativeMatcher::new(RealTimeMatcherConfig {
            angular_search_window: -1.0,
            ..Default::default()
        });
        assert!(matches!(
            matcher.match_scan(grid_center(), &single_point(), &uniform_grid()),
            Err(MatchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_score_candidates_deterministic() {
        let limits = MapLimits::new(0.05, WorldPoint::ZERO, CellLimits::new(10, 10));
        let mut tsdf = TsdfGrid::new(limits, 0.15, 5.0);
        for y in 0..10 {
            tsdf.set_tsd_and_weight(GridCoord::new(4, y), 0.0, 1.0);
            tsdf.set_tsd_and_weight(GridCoord::new(5, y), 0.05, 1.0);
        }
        let grid = Grid2D::from(tsdf);

        let params = SearchParameters::from_perturbations(2, 0, 0.01, 0.05);
        let scans = vec![DiscreteScan2D::from(vec![
            GridCoord::new(4, 3),
            GridCoord::new(5, 6),
        ])];
        let candidates = generate_exhaustive_search_candidates(&params);

        let matcher = RealTimeCorrelativeMatcher::with_defaults();
        let first = matcher.score_candidates(&grid, &scans, &params, &candidates);
        let second = matcher.score_candidates(&grid, &scans, &params, &candidates);
        assert_eq!(first, second);

        let parallel = RealTimeCorrelativeMatcher::new(RealTimeMatcherConfig {
            use_parallel: true,
            ..Default::default()
        });
        assert_eq!(
            first,
            parallel.score_candidates(&grid, &scans, &params, &candidates)
        );
    }

    #[test]
    fn test_trait_object() {
        let matcher: Box<dyn ScanMatcher> = Box::new(RealTimeCorrelativeMatcher::with_defaults());
        assert_eq!(matcher.name(), "real_time_correlative");
        assert!(
            matcher
                .match_scan(grid_center(), &single_point(), &uniform_grid())
                .is_ok()
        );
    }
}
