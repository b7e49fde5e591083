//! Mapping between world coordinates and cell indices.

use serde::{Deserialize, Serialize};

use crate::core::{GridCoord, WorldPoint};

/// Grid dimensions in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellLimits {
    /// Number of columns.
    pub num_x_cells: usize,
    /// Number of rows.
    pub num_y_cells: usize,
}

impl CellLimits {
    /// Create cell limits.
    pub const fn new(num_x_cells: usize, num_y_cells: usize) -> Self {
        Self {
            num_x_cells,
            num_y_cells,
        }
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.num_x_cells * self.num_y_cells
    }

    /// Largest valid index in each axis.
    #[inline]
    pub fn max_index(&self) -> GridCoord {
        GridCoord::new(self.num_x_cells as i32 - 1, self.num_y_cells as i32 - 1)
    }
}

/// World-to-cell mapping for a bounded grid.
///
/// Cell (i, j) covers the square from `origin + (i, j) * resolution` to
/// `origin + (i + 1, j + 1) * resolution`:
///
/// ```text
///   y ▲
///     │ (0,2) (1,2) (2,2)
///     │ (0,1) (1,1) (2,1)
///     │ (0,0) (1,0) (2,0)
///  origin ─────────────▶ x
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MapLimitsFields", into = "MapLimitsFields")]
pub struct MapLimits {
    resolution: f32,
    inv_resolution: f32,
    origin: WorldPoint,
    cell_limits: CellLimits,
}

impl MapLimits {
    /// Create map limits.
    ///
    /// # Panics
    /// If `resolution` is not strictly positive and finite.
    pub fn new(resolution: f32, origin: WorldPoint, cell_limits: CellLimits) -> Self {
        assert!(
            resolution > 0.0 && resolution.is_finite(),
            "grid resolution must be positive, got {resolution}"
        );
        Self {
            resolution,
            inv_resolution: 1.0 / resolution,
            origin,
            cell_limits,
        }
    }

    /// Create limits for a grid centred on the world origin.
    pub fn centered(num_x_cells: usize, num_y_cells: usize, resolution: f32) -> Self {
        let origin = WorldPoint::new(
            -(num_x_cells as f32 * resolution) / 2.0,
            -(num_y_cells as f32 * resolution) / 2.0,
        );
        Self::new(
            resolution,
            origin,
            CellLimits::new(num_x_cells, num_y_cells),
        )
    }

    /// Meters per cell.
    #[inline]
    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    /// World position of the lower-left corner of cell (0, 0).
    #[inline]
    pub fn origin(&self) -> WorldPoint {
        self.origin
    }

    /// Grid dimensions.
    #[inline]
    pub fn cell_limits(&self) -> CellLimits {
        self.cell_limits
    }

    /// World bounds: (min_point, max_point).
    pub fn bounds(&self) -> (WorldPoint, WorldPoint) {
        let max = WorldPoint::new(
            self.origin.x + self.cell_limits.num_x_cells as f32 * self.resolution,
            self.origin.y + self.cell_limits.num_y_cells as f32 * self.resolution,
        );
        (self.origin, max)
    }

    /// Index of the cell whose center is nearest to `point`.
    ///
    /// The result may lie outside the grid; check with [`contains`](Self::contains).
    #[inline]
    pub fn cell_index(&self, point: WorldPoint) -> GridCoord {
        GridCoord::new(
            ((point.x - self.origin.x) * self.inv_resolution - 0.5).round() as i32,
            ((point.y - self.origin.y) * self.inv_resolution - 0.5).round() as i32,
        )
    }

    /// World position of a cell center.
    #[inline]
    pub fn cell_center(&self, coord: GridCoord) -> WorldPoint {
        WorldPoint::new(
            self.origin.x + (coord.x as f32 + 0.5) * self.resolution,
            self.origin.y + (coord.y as f32 + 0.5) * self.resolution,
        )
    }

    /// Is the cell index inside the grid?
    #[inline]
    pub fn contains(&self, coord: GridCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.cell_limits.num_x_cells
            && (coord.y as usize) < self.cell_limits.num_y_cells
    }

    /// Row-major flat index, `None` outside the grid.
    #[inline]
    pub(crate) fn flat_index(&self, coord: GridCoord) -> Option<usize> {
        if self.contains(coord) {
            Some(coord.y as usize * self.cell_limits.num_x_cells + coord.x as usize)
        } else {
            None
        }
    }
}

/// Serialized form of [`MapLimits`]; the inverse resolution is derived on load.
#[derive(Serialize, Deserialize)]
struct MapLimitsFields {
    resolution: f32,
    origin: WorldPoint,
    cell_limits: CellLimits,
}

impl TryFrom<MapLimitsFields> for MapLimits {
    type Error = String;

    fn try_from(fields: MapLimitsFields) -> Result<Self, Self::Error> {
        if !(fields.resolution > 0.0 && fields.resolution.is_finite()) {
            return Err(format!(
                "grid resolution must be positive, got {}",
                fields.resolution
            ));
        }
        Ok(Self::new(fields.resolution, fields.origin, fields.cell_limits))
    }
}

impl From<MapLimits> for MapLimitsFields {
    fn from(limits: MapLimits) -> Self {
        Self {
            resolution: limits.resolution,
            origin: limits.origin,
            cell_limits: limits.cell_limits,
        }
    }
}
