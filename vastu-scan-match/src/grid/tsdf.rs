//! Truncated signed distance grid.

use crate::core::GridCoord;

use super::limits::MapLimits;

/// Grid of truncated signed distances with per-cell confidence weights.
///
/// The truncation distance doubles as the maximum correspondence cost: a
/// point sitting on a surface (tsd = 0) matches perfectly, a point at the
/// truncation distance does not match at all.
#[derive(Clone, Debug)]
pub struct TsdfGrid {
    limits: MapLimits,
    truncation_distance: f32,
    max_weight: f32,
    tsd: Vec<f32>,
    weights: Vec<f32>,
}

impl TsdfGrid {
    /// Create a grid with every cell unobserved (weight 0).
    ///
    /// # Panics
    /// If `truncation_distance` or `max_weight` is not strictly positive.
    pub fn new(limits: MapLimits, truncation_distance: f32, max_weight: f32) -> Self {
        assert!(
            truncation_distance > 0.0,
            "truncation distance must be positive, got {truncation_distance}"
        );
        assert!(max_weight > 0.0, "max weight must be positive, got {max_weight}");

        let size = limits.cell_limits().cell_count();
        Self {
            limits,
            truncation_distance,
            max_weight,
            tsd: vec![-truncation_distance; size],
            weights: vec![0.0; size],
        }
    }

    /// Map limits of this grid.
    #[inline]
    pub fn limits(&self) -> &MapLimits {
        &self.limits
    }

    /// Maximum correspondence cost (the truncation distance).
    #[inline]
    pub fn max_correspondence_cost(&self) -> f32 {
        self.truncation_distance
    }

    /// Upper bound on stored weights.
    #[inline]
    pub fn max_weight(&self) -> f32 {
        self.max_weight
    }

    /// Signed distance and weight at a cell.
    ///
    /// Unobserved and out-of-bounds cells report `(-truncation_distance, 0.0)`.
    #[inline]
    pub fn tsd_and_weight(&self, coord: GridCoord) -> (f32, f32) {
        match self.limits.flat_index(coord) {
            Some(i) => (self.tsd[i], self.weights[i]),
            None => (-self.truncation_distance, 0.0),
        }
    }

    /// Store a signed distance and weight, clamped to the grid's valid ranges.
    /// Returns `false` if `coord` is outside the grid.
    pub fn set_tsd_and_weight(&mut self, coord: GridCoord, tsd: f32, weight: f32) -> bool {
        let Some(i) = self.limits.flat_index(coord) else {
            return false;
        };
        self.tsd[i] = tsd.clamp(-self.truncation_distance, self.truncation_distance);
        self.weights[i] = weight.clamp(0.0, self.max_weight);
        true
    }
}
