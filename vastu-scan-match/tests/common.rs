//! Test utilities for scan matching.
//!
//! This module provides helpers for creating rectangular room maps and the
//! scans a robot standing inside them would see.

#![allow(dead_code)]

use std::f32::consts::PI;
use vastu_scan_match::{
    CellLimits, Grid2D, GridCoord, MapLimits, PointCloud, Pose2D, ProbabilityGrid, TsdfGrid,
    WorldPoint,
};

/// Grid resolution used by the room maps.
pub const RESOLUTION: f32 = 0.05;

/// Cells of padding around the room walls.
const MARGIN_CELLS: usize = 10;

/// Map limits covering a `width` x `height` room with walls at x = 0,
/// x = width, y = 0 and y = height. Walls run through cell centers.
pub fn room_limits(width: f32, height: f32) -> MapLimits {
    let margin = (MARGIN_CELLS as f32 + 0.5) * RESOLUTION;
    let num_x_cells = (width / RESOLUTION).round() as usize + 2 * MARGIN_CELLS + 1;
    let num_y_cells = (height / RESOLUTION).round() as usize + 2 * MARGIN_CELLS + 1;
    MapLimits::new(
        RESOLUTION,
        WorldPoint::new(-margin, -margin),
        CellLimits::new(num_x_cells, num_y_cells),
    )
}

/// Points sampled densely along the four room walls (world frame).
pub fn room_walls(width: f32, height: f32) -> Vec<WorldPoint> {
    let step = RESOLUTION / 4.0;
    let nx = (width / step).round() as usize;
    let ny = (height / step).round() as usize;

    let mut points = Vec::with_capacity(2 * (nx + ny + 2));
    for i in 0..=nx {
        let x = i as f32 * step;
        points.push(WorldPoint::new(x, 0.0));
        points.push(WorldPoint::new(x, height));
    }
    for j in 0..=ny {
        let y = j as f32 * step;
        points.push(WorldPoint::new(0.0, y));
        points.push(WorldPoint::new(width, y));
    }
    points
}

/// Probability grid of a room: wall cells occupied, everything else unknown.
pub fn room_probability_grid(width: f32, height: f32) -> Grid2D {
    let limits = room_limits(width, height);
    let mut grid = ProbabilityGrid::new(limits);
    for point in room_walls(width, height) {
        grid.mark_occupied(limits.cell_index(point));
    }
    Grid2D::from(grid)
}

/// TSDF grid of a room, observed only within `truncation` of the walls.
///
/// Distances are positive inside the room and negative outside.
pub fn room_tsdf_grid(width: f32, height: f32, truncation: f32) -> Grid2D {
    let limits = room_limits(width, height);
    let mut grid = TsdfGrid::new(limits, truncation, 10.0);
    let cells = limits.cell_limits();

    for ix in 0..cells.num_x_cells as i32 {
        for iy in 0..cells.num_y_cells as i32 {
            let coord = GridCoord::new(ix, iy);
            let center = limits.cell_center(coord);
            let tsd = signed_wall_distance(center, width, height);
            if tsd.abs() < truncation {
                grid.set_tsd_and_weight(coord, tsd, 1.0);
            }
        }
    }
    Grid2D::from(grid)
}

/// Signed distance from `p` to the nearest room wall.
fn signed_wall_distance(p: WorldPoint, width: f32, height: f32) -> f32 {
    let inside = p.x >= 0.0 && p.x <= width && p.y >= 0.0 && p.y <= height;
    if inside {
        p.x.min(width - p.x).min(p.y).min(height - p.y)
    } else {
        let dx = (-p.x).max(p.x - width).max(0.0);
        let dy = (-p.y).max(p.y - height).max(0.0);
        -(dx * dx + dy * dy).sqrt()
    }
}

/// Create a scan that hits walls in a rectangular room.
///
/// Rays are spread evenly over 360° around the robot heading; the returned
/// points are in the robot frame.
pub fn room_scan(room_width: f32, room_height: f32, pose: Pose2D, num_points: usize) -> PointCloud {
    let angle_increment = 2.0 * PI / num_points as f32;
    let max_range = (room_width * room_width + room_height * room_height).sqrt();

    (0..num_points)
        .filter_map(|i| {
            let local_angle = i as f32 * angle_increment - PI;
            let world_angle = pose.theta + local_angle;
            let (sin_a, cos_a) = world_angle.sin_cos();
            let mut range = max_range;

            // Right wall (x = room_width)
            if cos_a > 0.0 {
                let t = (room_width - pose.x) / cos_a;
                let y = pose.y + t * sin_a;
                if t > 0.0 && t < range && (0.0..=room_height).contains(&y) {
                    range = t;
                }
            }
            // Left wall (x = 0)
            if cos_a < 0.0 {
                let t = -pose.x / cos_a;
                let y = pose.y + t * sin_a;
                if t > 0.0 && t < range && (0.0..=room_height).contains(&y) {
                    range = t;
                }
            }
            // Top wall (y = room_height)
            if sin_a > 0.0 {
                let t = (room_height - pose.y) / sin_a;
                let x = pose.x + t * cos_a;
                if t > 0.0 && t < range && (0.0..=room_width).contains(&x) {
                    range = t;
                }
            }
            // Bottom wall (y = 0)
            if sin_a < 0.0 {
                let t = -pose.y / sin_a;
                let x = pose.x + t * cos_a;
                if t > 0.0 && t < range && (0.0..=room_width).contains(&x) {
                    range = t;
                }
            }

            (range < max_range).then(|| {
                WorldPoint::new(range * local_angle.cos(), range * local_angle.sin())
            })
        })
        .collect()
}

/// Perturb a pose with deterministic pseudo-random noise.
pub fn add_noise(pose: Pose2D, trans_std: f32, rot_std: f32, seed: u64) -> Pose2D {
    use std::num::Wrapping;

    // Simple LCG PRNG for reproducibility
    let mut state = Wrapping(seed);
    let a = Wrapping(1664525u64);
    let c = Wrapping(1013904223u64);

    let mut random = || -> f32 {
        state = a * state + c;
        // Box-Muller transform for Gaussian
        let u1 = (state.0 & 0xFFFF) as f32 / 65536.0 + 0.0001;
        state = a * state + c;
        let u2 = (state.0 & 0xFFFF) as f32 / 65536.0;
        (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    };

    Pose2D::new(
        pose.x + random() * trans_std,
        pose.y + random() * trans_std,
        pose.theta + random() * rot_std,
    )
}
