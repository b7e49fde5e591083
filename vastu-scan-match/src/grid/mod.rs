//! Read-only map representations the scan matcher aligns against.
//!
//! Two structurally different grids are supported behind one closed sum type:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        Grid2D                            │
//! │                                                          │
//! │  Probability(ProbabilityGrid)     Tsdf(TsdfGrid)         │
//! │   p(occupied) ∈ (0, 1]             (tsd, weight)         │
//! │                                                          │
//! │              MapLimits (resolution, origin, cells)       │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! - [`MapLimits`]: world ↔ cell index mapping and valid index range
//! - [`ProbabilityGrid`]: occupancy probabilities, unknown = [`MIN_PROBABILITY`]
//! - [`TsdfGrid`]: truncated signed distances with confidence weights
//!
//! Grid construction and maintenance belong to the mapping pipeline; the
//! matcher only queries cells.
//!
//! ## Example
//!
//! ```rust
//! use vastu_scan_match::core::GridCoord;
//! use vastu_scan_match::grid::{Grid2D, GridType, MapLimits, ProbabilityGrid};
//!
//! let limits = MapLimits::centered(200, 200, 0.05);
//! let mut grid = ProbabilityGrid::new(limits);
//! grid.mark_occupied(GridCoord::new(120, 100));
//!
//! let grid = Grid2D::from(grid);
//! assert_eq!(grid.grid_type(), GridType::Probability);
//! ```

mod limits;
mod probability;
mod tsdf;

pub use limits::{CellLimits, MapLimits};
pub use probability::{MAX_PROBABILITY, MIN_PROBABILITY, ProbabilityGrid};
pub use tsdf::TsdfGrid;

use serde::{Deserialize, Serialize};

/// Runtime tag of a [`Grid2D`] variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridType {
    /// Occupancy probability grid.
    Probability,
    /// Truncated signed distance field.
    Tsdf,
}

impl std::fmt::Display for GridType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridType::Probability => write!(f, "probability"),
            GridType::Tsdf => write!(f, "tsdf"),
        }
    }
}

/// A 2D grid the matcher can score against.
#[derive(Clone, Debug)]
pub enum Grid2D {
    /// Occupancy probabilities.
    Probability(ProbabilityGrid),
    /// Truncated signed distances.
    Tsdf(TsdfGrid),
}

impl Grid2D {
    /// Which variant this grid is.
    pub fn grid_type(&self) -> GridType {
        match self {
            Grid2D::Probability(_) => GridType::Probability,
            Grid2D::Tsdf(_) => GridType::Tsdf,
        }
    }

    /// Map limits of the underlying grid.
    pub fn limits(&self) -> &MapLimits {
        match self {
            Grid2D::Probability(grid) => grid.limits(),
            Grid2D::Tsdf(grid) => grid.limits(),
        }
    }

    /// Meters per cell.
    #[inline]
    pub fn resolution(&self) -> f32 {
        self.limits().resolution()
    }
}

impl From<ProbabilityGrid> for Grid2D {
    fn from(grid: ProbabilityGrid) -> Self {
        Grid2D::Probability(grid)
    }
}

impl From<TsdfGrid> for Grid2D {
    fn from(grid: TsdfGrid) -> Self {
        Grid2D::Tsdf(grid)
    }
}
