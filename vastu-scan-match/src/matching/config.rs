//! Real-time correlative matcher configuration.

use serde::{Deserialize, Serialize};

use super::error::MatchError;
use super::search::angular_step_size;

/// Configuration for the real-time correlative scan matcher.
///
/// The matcher exhaustively evaluates every pose in a window of
/// ±`linear_search_window` × ±`linear_search_window` × ±`angular_search_window`
/// around the initial estimate. Linear steps are one grid cell; the angular
/// step is derived from the grid resolution and the scan's range.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RealTimeMatcherConfig {
    /// Half-width of the x/y search range (meters).
    #[serde(default = "default_linear_search_window")]
    pub linear_search_window: f32,

    /// Half-width of the rotation search range (radians).
    #[serde(default = "default_angular_search_window")]
    pub angular_search_window: f32,

    /// Penalty weight on linear displacement from the initial pose.
    /// Higher = trust the prior more.
    #[serde(default = "default_translation_delta_cost_weight")]
    pub translation_delta_cost_weight: f32,

    /// Penalty weight on angular displacement from the initial pose.
    #[serde(default = "default_rotation_delta_cost_weight")]
    pub rotation_delta_cost_weight: f32,

    /// Whether to use parallel search (rayon).
    /// Scores candidates and builds rotated scans across CPU cores.
    #[serde(default)]
    pub use_parallel: bool,
}

fn default_linear_search_window() -> f32 {
    0.1 // 10cm
}

fn default_angular_search_window() -> f32 {
    20.0_f32.to_radians()
}

fn default_translation_delta_cost_weight() -> f32 {
    0.1
}

fn default_rotation_delta_cost_weight() -> f32 {
    0.1
}

impl Default for RealTimeMatcherConfig {
    fn default() -> Self {
        Self {
            linear_search_window: default_linear_search_window(),
            angular_search_window: default_angular_search_window(),
            translation_delta_cost_weight: default_translation_delta_cost_weight(),
            rotation_delta_cost_weight: default_rotation_delta_cost_weight(),
            use_parallel: false,
        }
    }
}

impl RealTimeMatcherConfig {
    /// Small window for real-time use with accurate odometry.
    pub fn fast() -> Self {
        Self {
            linear_search_window: 0.05,
            angular_search_window: 10.0_f32.to_radians(),
            ..Default::default()
        }
    }

    /// Large window for poor odometry or after long gaps.
    pub fn thorough() -> Self {
        Self {
            linear_search_window: 0.3,
            angular_search_window: 30.0_f32.to_radians(),
            use_parallel: true,
            ..Default::default()
        }
    }

    /// Check that every value is finite and non-negative.
    pub fn validate(&self) -> Result<(), MatchError> {
        let fields = [
            ("linear_search_window", self.linear_search_window),
            ("angular_search_window", self.angular_search_window),
            (
                "translation_delta_cost_weight",
                self.translation_delta_cost_weight,
            ),
            ("rotation_delta_cost_weight", self.rotation_delta_cost_weight),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(MatchError::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Number of candidate poses for a grid resolution and scan range,
    /// before the window is clamped to the grid.
    pub fn search_space_size(&self, resolution: f32, max_scan_range: f32) -> usize {
        let angular_step = angular_step_size(resolution, max_scan_range.max(3.0 * resolution));
        let num_scans = 2 * (self.angular_search_window / angular_step).ceil() as usize + 1;
        let linear_steps = 2 * (self.linear_search_window / resolution).ceil() as usize + 1;
        num_scans * linear_steps * linear_steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RealTimeMatcherConfig::default();
        assert!((config.linear_search_window - 0.1).abs() < 1e-6);
        assert!((config.angular_search_window - 0.349_066).abs() < 1e-4);
        assert!(!config.use_parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_search_space_size() {
        let config = RealTimeMatcherConfig {
            linear_search_window: 0.05,
            angular_search_window: 0.0,
            ..Default::default()
        };
        // One rotation, 3 x 3 offsets at 5cm cells
        assert_eq!(config.search_space_size(0.05, 4.0), 9);
    }

    #[test]
    fn test_fast_config_is_smaller() {
        let fast = RealTimeMatcherConfig::fast();
        let thorough = RealTimeMatcherConfig::thorough();
        assert!(fast.search_space_size(0.05, 8.0) < thorough.search_space_size(0.05, 8.0));
    }

    #[test]
    fn test_validate_rejects_negative_window() {
        let config = RealTimeMatcherConfig {
            linear_search_window: -0.1,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(MatchError::InvalidConfig(_))));

        let config = RealTimeMatcherConfig {
            rotation_delta_cost_weight: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: RealTimeMatcherConfig =
            serde_yaml::from_str("linear_search_window: 0.2\nuse_parallel: true\n").unwrap();
        assert!((config.linear_search_window - 0.2).abs() < 1e-6);
        assert!(config.use_parallel);
        assert_eq!(
            config.translation_delta_cost_weight,
            RealTimeMatcherConfig::default().translation_delta_cost_weight
        );
    }
}
