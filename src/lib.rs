//! Trash Sweep - a timed click game
//!
//! Core modules:
//! - `sim`: Deterministic game pieces (placement, spawning, motion, countdown, session state)
//! - `game`: The controller that wires the pieces to a platform
//! - `platform`: Rendering/scheduling traits plus a headless implementation
//! - `config`: Startup configuration

pub mod config;
pub mod game;
pub mod platform;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use game::{ClickOutcome, GameController};

/// Game configuration constants
pub mod consts {
    /// Item width/height in pixels
    pub const ITEM_SIZE: f32 = 70.0;
    /// Trash items per session
    pub const TARGET_COUNT: u32 = 5;
    /// Fish per session
    pub const HAZARD_COUNT: u32 = 5;
    /// Countdown length
    pub const GAME_DURATION_SEC: u32 = 5;
    /// Clock tick period
    pub const TICK_INTERVAL_MS: u32 = 1000;

    /// Resting horizontal margin for moving targets (px)
    pub const MOTION_BASE: f32 = 30.0;
    /// Random swing range around the base (px)
    pub const MOTION_MIN: f32 = 10.0;
    pub const MOTION_MAX: f32 = 100.0;

    pub const TARGET_ASSET: &str = "img/trash.svg";
    pub const HAZARD_ASSET: &str = "img/fish.svg";

    /// Control label while a session is running
    pub const STOP_LABEL: &str = " stop ";
    /// Dialog messages
    pub const REPLAY_MESSAGE: &str = "REPLAY ?";
    pub const WIN_MESSAGE: &str = "YOU WON 🎉";
    pub const LOSE_MESSAGE: &str = "YOU LOST 😭";
}

/// Format seconds as `m:ss`
#[inline]
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(5), "0:05");
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(60), "1:00");
        assert_eq!(format_clock(125), "2:05");
    }
}
