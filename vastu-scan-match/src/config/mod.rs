//! Configuration loading for the scan matcher.
//!
//! Loads all configuration from a single YAML file with sensible defaults.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vastu_scan_match::config::VastuMatchConfig;
//! use vastu_scan_match::matching::RealTimeCorrelativeMatcher;
//!
//! // Load from default path (configs/config.yaml)
//! let config = VastuMatchConfig::load_default()?;
//!
//! // Or use built-in defaults (no file needed)
//! let config = VastuMatchConfig::default();
//!
//! let matcher = RealTimeCorrelativeMatcher::new(config.matcher_config());
//! ```
//!
//! ## Example YAML
//!
//! ```yaml
//! matcher:
//!   linear_search_window: 0.1            # meters
//!   angular_search_window: 0.349         # radians (~20deg)
//!   translation_delta_cost_weight: 0.1
//!   rotation_delta_cost_weight: 0.1
//!   use_parallel: false
//! ```
//!
//! Missing keys take their defaults, so an empty file is a valid config.

mod error;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::matching::RealTimeMatcherConfig;

pub use error::ConfigLoadError;

/// Default config location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "configs/config.yaml";

/// Full configuration loaded from YAML
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VastuMatchConfig {
    /// Real-time correlative matcher settings
    #[serde(default)]
    pub matcher: RealTimeMatcherConfig,
}

impl VastuMatchConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&contents)?;
        log::debug!("Loaded matcher config from {}", path.display());
        Ok(config)
    }

    /// Load from default config path (configs/config.yaml)
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("{} not found, using defaults", DEFAULT_CONFIG_PATH);
            Ok(Self::default())
        }
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        // An empty document deserializes to unit, not to an empty mapping.
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.matcher.validate()?;
        Ok(config)
    }

    /// Get the matcher config
    pub fn matcher_config(&self) -> RealTimeMatcherConfig {
        self.matcher.clone()
    }
}
