//! In-memory platform
//!
//! Records what a browser would show and which callbacks are pending.
//! The owner pumps callbacks explicitly, so tests control time exactly.

use std::collections::BTreeMap;

use glam::Vec2;

use super::{Scheduler, Surface};
use crate::sim::{ClockTicket, Item, ItemId, MotionFrame, MotionPhase};

/// Surface state as a browser would display it
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    pub size: Vec2,
    /// Item nodes currently on the field
    pub items: BTreeMap<ItemId, Item>,
    /// Last motion applied per item
    pub motion: BTreeMap<ItemId, (MotionPhase, f32)>,
    pub score_text: String,
    pub timer_text: String,
    pub hud_visible: bool,
    /// Control label, `None` when hidden
    pub control: Option<String>,
    /// Dialog message, `None` when hidden
    pub dialog: Option<String>,
}

impl HeadlessSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            items: BTreeMap::new(),
            motion: BTreeMap::new(),
            score_text: String::new(),
            timer_text: String::new(),
            hud_visible: false,
            control: None,
            dialog: None,
        }
    }
}

impl Surface for HeadlessSurface {
    fn field_size(&self) -> Vec2 {
        self.size
    }

    fn clear_items(&mut self) {
        self.items.clear();
        self.motion.clear();
    }

    fn add_item(&mut self, item: &Item) {
        self.items.insert(item.id, item.clone());
    }

    fn remove_item(&mut self, id: ItemId) {
        self.items.remove(&id);
        self.motion.remove(&id);
    }

    fn apply_motion(&mut self, frame: MotionFrame) {
        if self.items.contains_key(&frame.id) {
            self.motion.insert(frame.id, (frame.phase, frame.margin));
        }
    }

    fn show_score(&mut self, _score: u32, remaining: u32) {
        self.score_text = remaining.to_string();
    }

    fn show_timer(&mut self, text: &str) {
        self.timer_text = text.to_string();
    }

    fn show_hud(&mut self) {
        self.hud_visible = true;
    }

    fn show_control(&mut self, label: &str) {
        self.control = Some(label.to_string());
    }

    fn hide_control(&mut self) {
        self.control = None;
    }

    fn show_dialog(&mut self, message: &str) {
        self.dialog = Some(message.to_string());
    }

    fn hide_dialog(&mut self) {
        self.dialog = None;
    }
}

/// Pending callbacks, delivered by whoever owns the game
#[derive(Debug, Clone, Default)]
pub struct HeadlessScheduler {
    /// Intervals still registered
    pub intervals: Vec<ClockTicket>,
    /// Deferred motion starts, oldest first
    pub deferred: Vec<u64>,
    /// Every ticket ever cancelled, in order
    pub cancelled: Vec<ClockTicket>,
}

impl HeadlessScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The interval that would fire next, if any
    pub fn active_interval(&self) -> Option<ClockTicket> {
        self.intervals.last().copied()
    }

    /// Hand over pending deferred work
    pub fn take_deferred(&mut self) -> Vec<u64> {
        std::mem::take(&mut self.deferred)
    }
}

impl Scheduler for HeadlessScheduler {
    fn start_interval(&mut self, ticket: ClockTicket, _period_ms: u32) {
        self.intervals.push(ticket);
    }

    fn cancel_interval(&mut self, ticket: ClockTicket) {
        self.intervals.retain(|t| *t != ticket);
        self.cancelled.push(ticket);
    }

    fn defer_motion(&mut self, session_id: u64) {
        self.deferred.push(session_id);
    }
}
