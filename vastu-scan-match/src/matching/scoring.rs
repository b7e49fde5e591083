//! Candidate scoring against probability and TSDF grids.
//!
//! ```text
//! score = correspondence(grid, scan + offset)
//!       · exp(-(|(x, y)| · w_translation + |θ| · w_rotation)²)
//! ```

use crate::core::GridCoord;
use crate::grid::{Grid2D, ProbabilityGrid, TsdfGrid};

use super::candidate::Candidate2D;
use super::search::DiscreteScan2D;

/// Mean occupancy probability of the scan cells shifted by the offset.
///
/// # Panics
/// If the mean is not strictly positive, which only happens for an empty scan
/// or a grid exposing zero probabilities.
pub fn probability_candidate_score(
    grid: &ProbabilityGrid,
    discrete_scan: &DiscreteScan2D,
    x_index_offset: i32,
    y_index_offset: i32,
) -> f32 {
    let offset = GridCoord::new(x_index_offset, y_index_offset);
    let sum: f32 = discrete_scan
        .iter()
        .map(|&cell| grid.probability(cell.saturating_add(offset)))
        .sum();
    let score = sum / discrete_scan.len() as f32;
    assert!(
        score > 0.0,
        "probability grid candidate score must be positive, got {score}"
    );
    score
}

/// Normalized TSD match in [0, 1]: 1 on the surface, 0 at the truncation distance.
#[inline]
pub fn normalized_tsd_score(tsd: f32, max_correspondence_cost: f32) -> f32 {
    (max_correspondence_cost - tsd.abs()) / max_correspondence_cost
}

/// Weight-averaged normalized TSD of the scan cells shifted by the offset.
///
/// Returns 0 when every visited cell has zero weight.
///
/// # Panics
/// If the weighted average is negative.
pub fn tsdf_candidate_score(
    grid: &TsdfGrid,
    discrete_scan: &DiscreteScan2D,
    x_index_offset: i32,
    y_index_offset: i32,
) -> f32 {
    let offset = GridCoord::new(x_index_offset, y_index_offset);
    let max_cost = grid.max_correspondence_cost();

    let mut candidate_score = 0.0f32;
    let mut summed_weight = 0.0f32;
    for &cell in discrete_scan.iter() {
        let (tsd, weight) = grid.tsd_and_weight(cell.saturating_add(offset));
        candidate_score += normalized_tsd_score(tsd, max_cost) * weight;
        summed_weight += weight;
    }
    if summed_weight == 0.0 {
        return 0.0;
    }

    let score = candidate_score / summed_weight;
    assert!(
        score >= 0.0,
        "TSDF candidate score must be non-negative, got {score}"
    );
    score
}

/// Correspondence score for the grid variant at hand.
pub fn candidate_score(
    grid: &Grid2D,
    discrete_scan: &DiscreteScan2D,
    x_index_offset: i32,
    y_index_offset: i32,
) -> f32 {
    match grid {
        Grid2D::Probability(grid) => {
            probability_candidate_score(grid, discrete_scan, x_index_offset, y_index_offset)
        }
        Grid2D::Tsdf(grid) => {
            tsdf_candidate_score(grid, discrete_scan, x_index_offset, y_index_offset)
        }
    }
}

/// Multiplicative penalty in (0, 1] for moving away from the initial pose.
#[inline]
pub fn distance_penalty(
    candidate: &Candidate2D,
    translation_delta_cost_weight: f32,
    rotation_delta_cost_weight: f32,
) -> f32 {
    let cost = candidate.x.hypot(candidate.y) * translation_delta_cost_weight
        + candidate.orientation.abs() * rotation_delta_cost_weight;
    (-cost * cost).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WorldPoint;
    use crate::grid::{CellLimits, MapLimits};
    use crate::matching::search::SearchParameters;
    use approx::assert_relative_eq;

    fn limits() -> MapLimits {
        MapLimits::new(0.05, WorldPoint::ZERO, CellLimits::new(10, 10))
    }

    fn scan(cells: &[(i32, i32)]) -> DiscreteScan2D {
        DiscreteScan2D::from(
            cells
                .iter()
                .map(|&(x, y)| GridCoord::new(x, y))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn test_uniform_probability_grid_scores_p() {
        let grid = ProbabilityGrid::uniform(limits(), 0.37);
        let scan = scan(&[(1, 1), (4, 7), (9, 0)]);
        for offset in [(0, 0), (-1, 2), (0, 1)] {
            assert_relative_eq!(
                probability_candidate_score(&grid, &scan, offset.0, offset.1),
                0.37,
                epsilon = 1e-6
            );
        }
    }

    #[test]
    fn test_probability_score_follows_offset() {
        let mut grid = ProbabilityGrid::new(limits());
        grid.set_probability(GridCoord::new(5, 5), 0.9);
        grid.set_probability(GridCoord::new(6, 5), 0.9);
        let scan = scan(&[(4, 5), (5, 5)]);

        assert_relative_eq!(probability_candidate_score(&grid, &scan, 0, 0), 0.5, epsilon = 1e-6);
        assert_relative_eq!(probability_candidate_score(&grid, &scan, 1, 0), 0.9, epsilon = 1e-6);
    }

    #[test]
    #[should_panic(expected = "must be positive")]
    fn test_empty_scan_is_fatal_for_probability_grid() {
        let grid = ProbabilityGrid::new(limits());
        probability_candidate_score(&grid, &DiscreteScan2D::default(), 0, 0);
    }

    #[test]
    fn test_normalized_tsd_bounds() {
        assert_relative_eq!(normalized_tsd_score(0.3, 0.3), 0.0);
        assert_relative_eq!(normalized_tsd_score(-0.3, 0.3), 0.0);
        assert_relative_eq!(normalized_tsd_score(0.0, 0.3), 1.0);
        assert_relative_eq!(normalized_tsd_score(0.15, 0.3), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_tsdf_weighted_average() {
        let mut grid = TsdfGrid::new(limits(), 0.2, 10.0);
        grid.set_tsd_and_weight(GridCoord::new(2, 2), 0.0, 3.0);
        grid.set_tsd_and_weight(GridCoord::new(3, 2), 0.1, 1.0);
        let scan = scan(&[(2, 2), (3, 2), (8, 8)]);

        // (1.0 * 3 + 0.5 * 1 + 0 * 0) / 4
        assert_relative_eq!(tsdf_candidate_score(&grid, &scan, 0, 0), 0.875, epsilon = 1e-6);
    }

    #[test]
    fn test_tsdf_zero_weight_scores_zero() {
        let grid = TsdfGrid::new(limits(), 0.2, 10.0);
        let scan = scan(&[(2, 2), (3, 3)]);
        assert_eq!(tsdf_candidate_score(&grid, &scan, 0, 0), 0.0);
        assert_eq!(tsdf_candidate_score(&grid, &DiscreteScan2D::default(), 0, 0), 0.0);
    }

    #[test]
    fn test_dispatch_on_grid_type() {
        let scan = scan(&[(2, 2)]);
        let probability = Grid2D::from(ProbabilityGrid::uniform(limits(), 0.6));
        assert_relative_eq!(candidate_score(&probability, &scan, 0, 0), 0.6, epsilon = 1e-6);

        let mut tsdf = TsdfGrid::new(limits(), 0.2, 10.0);
        tsdf.set_tsd_and_weight(GridCoord::new(2, 2), 0.0, 1.0);
        assert_relative_eq!(candidate_score(&Grid2D::from(tsdf), &scan, 0, 0), 1.0);
    }

    #[test]
    fn test_distance_penalty_monotonic() {
        let params = SearchParameters::from_perturbations(3, 3, 0.05, 0.05);
        let at = |scan_index, x| Candidate2D::new(scan_index, x, 0, &params);

        assert_eq!(distance_penalty(&at(3, 0), 0.1, 0.1), 1.0);

        let translations: Vec<f32> = (0..=3)
            .map(|x| distance_penalty(&at(3, x), 2.0, 2.0))
            .collect();
        assert!(translations.windows(2).all(|w| w[1] < w[0]));

        let rotations: Vec<f32> = (3..7)
            .map(|i| distance_penalty(&at(i, 0), 2.0, 2.0))
            .collect();
        assert!(rotations.windows(2).all(|w| w[1] < w[0]));
        assert_relative_eq!(
            distance_penalty(&at(0, 0), 2.0, 2.0),
            distance_penalty(&at(6, 0), 2.0, 2.0),
            epsilon = 1e-6
        );
    }
}
