//! Match a simulated scan against a small room map.
//!
//! ```bash
//! RUST_LOG=debug cargo run --example match_room
//! ```

use std::f32::consts::PI;

use vastu_scan_match::{
    CellLimits, Grid2D, GridCoord, MapLimits, PointCloud, Pose2D, ProbabilityGrid,
    RealTimeCorrelativeMatcher, VastuMatchConfig, WorldPoint,
};

const ROOM_WIDTH: f32 = 5.0;
const ROOM_HEIGHT: f32 = 4.0;
const RESOLUTION: f32 = 0.05;

fn build_room() -> Grid2D {
    let limits = MapLimits::new(
        RESOLUTION,
        WorldPoint::new(-0.525, -0.525),
        CellLimits::new(121, 101),
    );
    let mut grid = ProbabilityGrid::new(limits);
    let x_max = (ROOM_WIDTH / RESOLUTION).round() as i32 + 10;
    let y_max = (ROOM_HEIGHT / RESOLUTION).round() as i32 + 10;
    for x in 10..=x_max {
        grid.mark_occupied(GridCoord::new(x, 10));
        grid.mark_occupied(GridCoord::new(x, y_max));
    }
    for y in 10..=y_max {
        grid.mark_occupied(GridCoord::new(10, y));
        grid.mark_occupied(GridCoord::new(x_max, y));
    }
    Grid2D::from(grid)
}

/// Distance from `pose` to the nearest room wall along a world-frame ray.
fn ray_to_wall(pose: Pose2D, world_angle: f32) -> f32 {
    let (sin_a, cos_a) = world_angle.sin_cos();

    let tx = if cos_a > 0.0 {
        (ROOM_WIDTH - pose.x) / cos_a
    } else if cos_a < 0.0 {
        -pose.x / cos_a
    } else {
        f32::INFINITY
    };
    let ty = if sin_a > 0.0 {
        (ROOM_HEIGHT - pose.y) / sin_a
    } else if sin_a < 0.0 {
        -pose.y / sin_a
    } else {
        f32::INFINITY
    };
    tx.min(ty)
}

fn simulate_scan(pose: Pose2D, num_points: usize) -> PointCloud {
    (0..num_points)
        .map(|i| {
            let local = i as f32 * 2.0 * PI / num_points as f32 - PI;
            let range = ray_to_wall(pose, pose.theta + local);
            WorldPoint::new(range * local.cos(), range * local.sin())
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = VastuMatchConfig::load_default()?;
    let matcher = RealTimeCorrelativeMatcher::new(config.matcher_config());
    log::info!("Matcher config: {:?}", matcher.config());

    let grid = build_room();
    let truth = Pose2D::new(2.5, 2.0, 0.1);
    let scan = simulate_scan(truth, 360);

    let odometry = Pose2D::new(2.44, 2.06, 0.04);
    let result = matcher.match_scan(odometry, &scan, &grid)?;

    println!("truth:    {:?}", truth);
    println!("odometry: {:?}", odometry);
    println!(
        "matched:  {:?} (score {:.3}, {}, {} candidates over {} rotations)",
        result.pose, result.score, result.quality, result.candidates_evaluated, result.num_scans
    );
    Ok(())
}
