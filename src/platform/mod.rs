//! Platform abstraction layer
//!
//! The controller talks to the outside world only through these traits:
//! - `Surface`: field items, HUD text, control button, end-of-game dialog
//! - `Scheduler`: the one-second clock interval and deferred work
//!
//! The browser implementation lives in the wasm entry point; `headless`
//! keeps everything in memory for tests and the native demo.

pub mod headless;

use glam::Vec2;

use crate::sim::{ClockTicket, Item, ItemId, MotionFrame};

pub use headless::{HeadlessScheduler, HeadlessSurface};

/// Rendering and display surface
pub trait Surface {
    /// Current field size in pixels
    fn field_size(&self) -> Vec2;

    /// Remove every item node
    fn clear_items(&mut self);
    /// Add a node for `item`
    fn add_item(&mut self, item: &Item);
    /// Remove the node for `id` (no-op if absent)
    fn remove_item(&mut self, id: ItemId);
    /// Apply one swing of the jitter animation
    fn apply_motion(&mut self, frame: MotionFrame);

    /// Score widget; `remaining` is what the player still has to sweep
    fn show_score(&mut self, score: u32, remaining: u32);
    /// Timer widget, already formatted as `m:ss`
    fn show_timer(&mut self, text: &str);
    /// Make the score and timer widgets visible
    fn show_hud(&mut self);

    fn show_control(&mut self, label: &str);
    fn hide_control(&mut self);

    fn show_dialog(&mut self, message: &str);
    fn hide_dialog(&mut self);
}

/// Timer and deferral primitives
pub trait Scheduler {
    /// Call `on_clock_tick(ticket)` every `period_ms` until cancelled
    fn start_interval(&mut self, ticket: ClockTicket, period_ms: u32);
    /// Stop the interval for `ticket`; unknown tickets are ignored
    fn cancel_interval(&mut self, ticket: ClockTicket);
    /// Call `on_motion_ready(session_id)` on the next scheduling turn
    fn defer_motion(&mut self, session_id: u64);
}
