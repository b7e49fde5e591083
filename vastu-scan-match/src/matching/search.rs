//! Search window, rotated scans and their discretization.
//!
//! The window is sliced by rotation: every angular step gets one rotated copy
//! of the scan, transformed into cell indices exactly once. All linear offsets
//! at that rotation are then plain integer additions on those indices.

use rayon::prelude::*;

use crate::core::{GridCoord, PointCloud, WorldPoint};
use crate::grid::{CellLimits, MapLimits};

use super::error::MatchError;

/// Keeps the angular step just below the value at which a point at max range
/// moves by exactly one cell.
const ANGULAR_STEP_SAFETY_MARGIN: f64 = 1.0 - 1e-3;

/// Angular step (radians) such that rotating a point at `max_scan_range`
/// moves it by about one cell of size `resolution`.
///
/// `max_scan_range` must be at least `resolution / 2` for the step to be defined.
pub fn angular_step_size(resolution: f32, max_scan_range: f32) -> f32 {
    let resolution = f64::from(resolution);
    let range = f64::from(max_scan_range);
    let cos_step = 1.0 - (resolution * resolution) / (2.0 * range * range);
    (ANGULAR_STEP_SAFETY_MARGIN * cos_step.acos()) as f32
}

/// Inclusive integer bounds of the linear search at one rotation, in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinearBounds {
    /// Smallest x offset.
    pub min_x: i32,
    /// Largest x offset.
    pub max_x: i32,
    /// Smallest y offset.
    pub min_y: i32,
    /// Largest y offset.
    pub max_y: i32,
}

impl LinearBounds {
    /// Symmetric bounds of ±`n` cells in both axes.
    pub const fn symmetric(n: i32) -> Self {
        Self {
            min_x: -n,
            max_x: n,
            min_y: -n,
            max_y: n,
        }
    }

    /// Number of (x, y) offsets inside the bounds.
    pub fn num_candidates(&self) -> usize {
        let nx = (self.max_x - self.min_x + 1).max(0) as usize;
        let ny = (self.max_y - self.min_y + 1).max(0) as usize;
        nx * ny
    }
}

/// Discretized search window: rotation steps plus per-rotation linear bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchParameters {
    num_angular_perturbations: i32,
    angular_perturbation_step_size: f32,
    resolution: f32,
    num_scans: usize,
    linear_bounds: Vec<LinearBounds>,
}

impl SearchParameters {
    /// Derive search parameters from the configured windows, the scan and
    /// the grid resolution.
    ///
    /// The angular step is chosen so that the farthest scan point moves by
    /// about one cell per step; ranges below three cells are treated as three
    /// cells so the step stays well defined.
    pub fn new(
        linear_search_window: f32,
        angular_search_window: f32,
        point_cloud: &PointCloud,
        resolution: f32,
    ) -> Result<Self, MatchError> {
        if !(resolution > 0.0 && resolution.is_finite()) {
            return Err(MatchError::InvalidResolution(resolution));
        }
        if !(linear_search_window >= 0.0 && linear_search_window.is_finite()) {
            return Err(MatchError::InvalidConfig(format!(
                "linear search window must be finite and non-negative, got {linear_search_window}"
            )));
        }
        if !(angular_search_window >= 0.0 && angular_search_window.is_finite()) {
            return Err(MatchError::InvalidConfig(format!(
                "angular search window must be finite and non-negative, got {angular_search_window}"
            )));
        }

        let max_scan_range = point_cloud.max_range().max(3.0 * resolution);
        let angular_step = angular_step_size(resolution, max_scan_range);
        if angular_search_window > 0.0 && !(angular_step > 0.0) {
            return Err(MatchError::ScanRangeTooLarge(max_scan_range));
        }
        let num_angular_perturbations = (angular_search_window / angular_step).ceil() as i32;
        let num_linear_perturbations = (linear_search_window / resolution).ceil() as i32;

        Ok(Self::from_perturbations(
            num_linear_perturbations,
            num_angular_perturbations,
            angular_step,
            resolution,
        ))
    }

    /// Build parameters directly from perturbation counts.
    ///
    /// # Panics
    /// If either count is negative or `resolution` is not positive.
    pub fn from_perturbations(
        num_linear_perturbations: i32,
        num_angular_perturbations: i32,
        angular_perturbation_step_size: f32,
        resolution: f32,
    ) -> Self {
        assert!(num_linear_perturbations >= 0, "negative linear perturbations");
        assert!(num_angular_perturbations >= 0, "negative angular perturbations");
        assert!(resolution > 0.0, "resolution must be positive, got {resolution}");

        let num_scans = 2 * num_angular_perturbations as usize + 1;
        Self {
            num_angular_perturbations,
            angular_perturbation_step_size,
            resolution,
            num_scans,
            linear_bounds: vec![LinearBounds::symmetric(num_linear_perturbations); num_scans],
        }
    }

    /// Number of rotations searched (always odd, centred on zero rotation).
    #[inline]
    pub fn num_scans(&self) -> usize {
        self.num_scans
    }

    /// Rotations searched on each side of zero.
    #[inline]
    pub fn num_angular_perturbations(&self) -> i32 {
        self.num_angular_perturbations
    }

    /// Angle between consecutive rotations (radians).
    #[inline]
    pub fn angular_step(&self) -> f32 {
        self.angular_perturbation_step_size
    }

    /// Grid resolution the linear bounds are expressed in.
    #[inline]
    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    /// Linear bounds, one per rotation index.
    #[inline]
    pub fn linear_bounds(&self) -> &[LinearBounds] {
        &self.linear_bounds
    }

    /// Rotation angle assigned to `scan_index`.
    #[inline]
    pub fn orientation(&self, scan_index: usize) -> f32 {
        (scan_index as i32 - self.num_angular_perturbations) as f32
            * self.angular_perturbation_step_size
    }

    /// Total number of candidates over all rotations.
    pub fn num_candidates(&self) -> usize {
        self.linear_bounds
            .iter()
            .map(LinearBounds::num_candidates)
            .sum()
    }

    /// Tighten the linear bounds so every discretized point stays inside the
    /// grid for every offset searched.
    ///
    /// Offset (0, 0) is never removed: when a scan already sticks out of the
    /// grid at zero offset, the bound on that side stops at zero and
    /// out-of-range cells are scored as unknown.
    ///
    /// # Panics
    /// If `scans` does not hold one discrete scan per rotation.
    pub fn shrink_to_fit(&mut self, scans: &[DiscreteScan2D], cell_limits: CellLimits) {
        assert_eq!(
            scans.len(),
            self.num_scans,
            "expected one discrete scan per rotation"
        );
        let max_index = cell_limits.max_index();

        for (bounds, scan) in self.linear_bounds.iter_mut().zip(scans) {
            let Some(&first) = scan.cells().first() else {
                continue;
            };
            // Offsets o with cell + o inside [0, max_index] for every cell.
            let mut lower = first.saturating_neg();
            let mut upper = max_index.saturating_sub(first);
            for &cell in scan.iter() {
                lower = lower.max(cell.saturating_neg());
                upper = upper.min(max_index.saturating_sub(cell));
            }
            let lower = lower.min(GridCoord::default());
            let upper = upper.max(GridCoord::default());

            bounds.min_x = bounds.min_x.max(lower.x);
            bounds.max_x = bounds.max_x.min(upper.x);
            bounds.min_y = bounds.min_y.max(lower.y);
            bounds.max_y = bounds.max_y.min(upper.y);
        }
    }
}

/// A rotated, translated scan expressed as grid cell indices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiscreteScan2D {
    cells: Vec<GridCoord>,
}

impl DiscreteScan2D {
    /// Translate every point by `translation` and map it to its nearest cell.
    pub fn from_scan(limits: &MapLimits, scan: &PointCloud, translation: WorldPoint) -> Self {
        Self {
            cells: scan
                .iter()
                .map(|&point| limits.cell_index(point + translation))
                .collect(),
        }
    }

    /// Cell indices in point order.
    #[inline]
    pub fn cells(&self) -> &[GridCoord] {
        &self.cells
    }

    /// Iterate over cell indices.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, GridCoord> {
        self.cells.iter()
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Is the scan empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl From<Vec<GridCoord>> for DiscreteScan2D {
    fn from(cells: Vec<GridCoord>) -> Self {
        Self { cells }
    }
}

/// One copy of `point_cloud` per rotation index, rotated about the origin by
/// that index's orientation.
pub fn generate_rotated_scans(
    point_cloud: &PointCloud,
    search_parameters: &SearchParameters,
) -> Vec<PointCloud> {
    (0..search_parameters.num_scans())
        .map(|scan_index| point_cloud.rotated(search_parameters.orientation(scan_index)))
        .collect()
}

/// Parallel [`generate_rotated_scans`]; output order is identical.
pub fn generate_rotated_scans_par(
    point_cloud: &PointCloud,
    search_parameters: &SearchParameters,
) -> Vec<PointCloud> {
    (0..search_parameters.num_scans())
        .into_par_iter()
        .map(|scan_index| point_cloud.rotated(search_parameters.orientation(scan_index)))
        .collect()
}

/// Translate each rotated scan by `initial_translation` and convert it to
/// cell indices of `limits`.
pub fn discretize_scans(
    limits: &MapLimits,
    scans: &[PointCloud],
    initial_translation: WorldPoint,
) -> Vec<DiscreteScan2D> {
    scans
        .iter()
        .map(|scan| DiscreteScan2D::from_scan(limits, scan, initial_translation))
        .collect()
}

/// Parallel [`discretize_scans`]; output order is identical.
pub fn discretize_scans_par(
    limits: &MapLimits,
    scans: &[PointCloud],
    initial_translation: WorldPoint,
) -> Vec<DiscreteScan2D> {
    scans
        .par_iter()
        .map(|scan| DiscreteScan2D::from_scan(limits, scan, initial_translation))
        .collect()
}
