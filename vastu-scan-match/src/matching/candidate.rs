//! Candidate poses of the exhaustive search.

use super::search::SearchParameters;

/// One pose perturbation: a rotation index plus an integer cell offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate2D {
    /// Index into the rotated/discretized scans.
    pub scan_index: usize,
    /// X offset in cells.
    pub x_index_offset: i32,
    /// Y offset in cells.
    pub y_index_offset: i32,
    /// X offset in meters.
    pub x: f32,
    /// Y offset in meters.
    pub y: f32,
    /// Rotation relative to the initial heading (radians).
    pub orientation: f32,
}

impl Candidate2D {
    /// Create a candidate, deriving metric offsets and orientation from the
    /// search parameters.
    pub fn new(
        scan_index: usize,
        x_index_offset: i32,
        y_index_offset: i32,
        search_parameters: &SearchParameters,
    ) -> Self {
        let resolution = search_parameters.resolution();
        Self {
            scan_index,
            x_index_offset,
            y_index_offset,
            x: x_index_offset as f32 * resolution,
            y: y_index_offset as f32 * resolution,
            orientation: search_parameters.orientation(scan_index),
        }
    }
}

/// A candidate together with its final (penalized) score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoredCandidate2D {
    /// The scored pose perturbation.
    pub candidate: Candidate2D,
    /// Correspondence score times the distance penalty.
    pub score: f32,
}

/// Enumerate every candidate inside the search bounds.
///
/// Order is rotation index, then x offset, then y offset, so ties are
/// resolved the same way on every run.
///
/// # Panics
/// If the number generated disagrees with [`SearchParameters::num_candidates`].
pub fn generate_exhaustive_search_candidates(
    search_parameters: &SearchParameters,
) -> Vec<Candidate2D> {
    let num_candidates = search_parameters.num_candidates();
    let mut candidates = Vec::with_capacity(num_candidates);

    for (scan_index, bounds) in search_parameters.linear_bounds().iter().enumerate() {
        for x_index_offset in bounds.min_x..=bounds.max_x {
            for y_index_offset in bounds.min_y..=bounds.max_y {
                candidates.push(Candidate2D::new(
                    scan_index,
                    x_index_offset,
                    y_index_offset,
                    search_parameters,
                ));
            }
        }
    }

    assert_eq!(
        candidates.len(),
        num_candidates,
        "candidate enumeration disagrees with search bounds"
    );
    candidates
}

/// The highest-scoring candidate; the first one wins ties.
pub fn select_best(scored: &[ScoredCandidate2D]) -> Option<&ScoredCandidate2D> {
    scored.iter().fold(None, |best, current| match best {
        Some(best) if current.score <= best.score => Some(best),
        _ => Some(current),
    })
}
