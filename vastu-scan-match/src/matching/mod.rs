//! Real-time correlative scan matching.
//!
//! Aligns a lidar scan to a 2D grid map by scoring every pose in a small
//! window around an initial estimate and keeping the best one.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                  REAL-TIME CORRELATIVE MATCHING                   │
//! │                                                                   │
//! │  PointCloud + Initial Pose                                       │
//! │       │                                                           │
//! │       ▼                                                           │
//! │  ┌───────────────┐    ┌───────────────┐    ┌──────────────────┐  │
//! │  │ Rotate scans  │ ──▶│  Discretize   │ ──▶│ Shrink window    │  │
//! │  │ (1 per step)  │    │ (cell coords) │    │ to grid bounds   │  │
//! │  └───────────────┘    └───────────────┘    └──────────────────┘  │
//! │                                                     │             │
//! │                                                     ▼             │
//! │  ┌───────────────┐    ┌───────────────┐    ┌──────────────────┐  │
//! │  │  Select best  │ ◀──│ Score × dist. │ ◀──│ Enumerate        │  │
//! │  │  (first max)  │    │   penalty     │    │ candidates       │  │
//! │  └───────────────┘    └───────────────┘    └──────────────────┘  │
//! │       │                                                           │
//! │       ▼                                                           │
//! │  ScanMatchResult                                                  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Components
//!
//! | Component | Purpose |
//! |-----------|---------|
//! | [`SearchParameters`] | Angular step, rotation count, per-rotation linear bounds |
//! | [`DiscreteScan2D`] | A rotated scan as grid cell coordinates |
//! | [`Candidate2D`] | One (rotation, x offset, y offset) hypothesis |
//! | [`RealTimeCorrelativeMatcher`] | Runs the full search |
//!
//! ## Scoring
//!
//! - Probability grids: mean occupancy probability of the scan cells
//! - TSDF grids: weighted mean of `(max_cost - |tsd|) / max_cost`
//!
//! Both are multiplied by
//! `exp(-(|t| * translation_weight + |θ| * rotation_weight)²)` so that, on a
//! flat map, the candidate closest to the initial estimate wins.
//!
//! ## Example
//!
//! ```rust
//! use vastu_scan_match::core::{PointCloud, Pose2D, WorldPoint};
//! use vastu_scan_match::grid::{CellLimits, Grid2D, MapLimits, ProbabilityGrid};
//! use vastu_scan_match::matching::{RealTimeCorrelativeMatcher, RealTimeMatcherConfig};
//!
//! let limits = MapLimits::new(0.05, WorldPoint::ZERO, CellLimits::new(5, 5));
//! let grid = Grid2D::from(ProbabilityGrid::uniform(limits, 0.6));
//!
//! let matcher = RealTimeCorrelativeMatcher::new(RealTimeMatcherConfig {
//!     linear_search_window: 0.0,
//!     angular_search_window: 0.0,
//!     ..Default::default()
//! });
//!
//! let scan = PointCloud::from_xy(&[(0.0, 0.0)]);
//! let initial = Pose2D::new(0.125, 0.125, 0.0);
//! let result = matcher.match_scan(initial, &scan, &grid).unwrap();
//! assert_eq!(result.pose, initial);
//! ```
//!
//! ## Performance Modes
//!
//! ```rust,ignore
//! // Fast: narrow window for accurate odometry
//! let config = RealTimeMatcherConfig::fast();
//!
//! // Thorough: wide window, rotations and candidates scored on rayon
//! let config = RealTimeMatcherConfig::thorough();
//! ```

mod candidate;
mod config;
mod error;
mod matcher;
mod scoring;
mod search;
mod traits;
mod types;

pub use candidate::{
    Candidate2D, ScoredCandidate2D, generate_exhaustive_search_candidates, select_best,
};
pub use config::RealTimeMatcherConfig;
pub use error::MatchError;
pub use matcher::RealTimeCorrelativeMatcher;
pub use scoring::{
    candidate_score, distance_penalty, normalized_tsd_score, probability_candidate_score,
    tsdf_candidate_score,
};
pub use search::{
    DiscreteScan2D, LinearBounds, SearchParameters, angular_step_size, discretize_scans,
    discretize_scans_par, generate_rotated_scans, generate_rotated_scans_par,
};
pub use traits::ScanMatcher;
pub use types::{MatchQuality, ScanMatchResult};
