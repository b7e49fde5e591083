//! Occupancy probability grid.

use crate::core::GridCoord;

use super::limits::MapLimits;

/// Probability reported for unknown and out-of-bounds cells.
///
/// Never zero, so an averaged correspondence score over any scan is strictly
/// positive.
pub const MIN_PROBABILITY: f32 = 0.1;

/// Upper clamp for probabilities stored by callers that build grids from
/// log-odds updates.
pub const MAX_PROBABILITY: f32 = 0.9;

/// Read-mostly grid of occupancy probabilities in (0, 1].
#[derive(Clone, Debug)]
pub struct ProbabilityGrid {
    limits: MapLimits,
    probabilities: Vec<f32>,
}

impl ProbabilityGrid {
    /// Create a grid where every cell is unknown.
    pub fn new(limits: MapLimits) -> Self {
        Self {
            probabilities: vec![MIN_PROBABILITY; limits.cell_limits().cell_count()],
            limits,
        }
    }

    /// Create a grid where every cell holds probability `p`.
    ///
    /// # Panics
    /// If `p` is not in (0, 1].
    pub fn uniform(limits: MapLimits, p: f32) -> Self {
        assert_valid_probability(p);
        Self {
            probabilities: vec![p; limits.cell_limits().cell_count()],
            limits,
        }
    }

    /// Map limits of this grid.
    #[inline]
    pub fn limits(&self) -> &MapLimits {
        &self.limits
    }

    /// Probability at a cell; [`MIN_PROBABILITY`] outside the grid.
    #[inline]
    pub fn probability(&self, coord: GridCoord) -> f32 {
        match self.limits.flat_index(coord) {
            Some(i) => self.probabilities[i],
            None => MIN_PROBABILITY,
        }
    }

    /// Set the probability of a cell. Returns `false` if `coord` is outside the grid.
    ///
    /// # Panics
    /// If `p` is not in (0, 1].
    pub fn set_probability(&mut self, coord: GridCoord, p: f32) -> bool {
        assert_valid_probability(p);
        match self.limits.flat_index(coord) {
            Some(i) => {
                self.probabilities[i] = p;
                true
            }
            None => false,
        }
    }

    /// Mark a cell as occupied with [`MAX_PROBABILITY`].
    pub fn mark_occupied(&mut self, coord: GridCoord) -> bool {
        self.set_probability(coord, MAX_PROBABILITY)
    }
}

#[inline]
fn assert_valid_probability(p: f32) {
    assert!(p > 0.0 && p <= 1.0, "cell probability must be in (0, 1], got {p}");
}
