//! Startup configuration
//!
//! Fixed gameplay constants, overridable once at startup from JSON.
//! Partial JSON is fine: missing fields keep their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a configuration is rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("item size must be a positive number of pixels, got {0}")]
    InvalidItemSize(f32),
    #[error("at least one target item is required")]
    NoTargets,
    #[error("game duration must be at least one second")]
    ZeroDuration,
    #[error("motion offset range [{min}, {max}) is not a valid non-negative range")]
    InvalidMotionRange { min: f32, max: f32 },
    #[error(transparent)]
    Parse(#[from] serde_json::Error),
}

/// Gameplay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Rendered item width/height in pixels
    pub item_size: f32,
    /// Number of trash items to sweep
    pub target_count: u32,
    /// Number of fish to avoid
    pub hazard_count: u32,
    /// Countdown length in seconds
    pub duration_sec: u32,

    // === Motion ===
    /// Resting horizontal margin of a moving target (px)
    pub motion_base: f32,
    /// Lower bound of the random swing (px)
    pub motion_min: f32,
    /// Upper bound of the random swing (px, exclusive)
    pub motion_max: f32,

    // === Assets ===
    pub target_asset: String,
    pub hazard_asset: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            item_size: ITEM_SIZE,
            target_count: TARGET_COUNT,
            hazard_count: HAZARD_COUNT,
            duration_sec: GAME_DURATION_SEC,

            motion_base: MOTION_BASE,
            motion_min: MOTION_MIN,
            motion_max: MOTION_MAX,

            target_asset: TARGET_ASSET.to_string(),
            hazard_asset: HAZARD_ASSET.to_string(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON override
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values the game loop relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.item_size.is_finite() || self.item_size <= 0.0 {
            return Err(ConfigError::InvalidItemSize(self.item_size));
        }
        if self.target_count == 0 {
            return Err(ConfigError::NoTargets);
        }
        if self.duration_sec == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        let (min, max) = (self.motion_min, self.motion_max);
        if !min.is_finite() || !max.is_finite() || min < 0.0 || max < min {
            return Err(ConfigError::InvalidMotionRange { min, max });
        }
        Ok(())
    }

    /// Parse an optional override, falling back to defaults on any problem
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        let Some(json) = json.filter(|s| !s.trim().is_empty()) else {
            log::info!("Using default config");
            return Self::default();
        };

        match Self::from_json(json) {
            Ok(config) => {
                log::info!("Loaded config: {:?}", config);
                config
            }
            Err(e) => {
                log::warn!("Ignoring config override ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Environment variable holding a JSON override (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub const ENV_VAR: &'static str = "TRASH_SWEEP_CONFIG";

    /// Load from the environment (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let json = std::env::var(Self::ENV_VAR).ok();
        Self::from_json_or_default(json.as_deref())
    }
}
