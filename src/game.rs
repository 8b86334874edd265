//! Game controller
//!
//! Owns the session, the field and the clock, and reacts to the discrete
//! events a platform delivers: button presses, field clicks, clock ticks,
//! deferred motion start and animation completions. Every handler runs to
//! completion; stale callbacks are recognised by their ticket or session
//! number and dropped.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::config::GameConfig;
use crate::consts::*;
use crate::format_clock;
use crate::platform::{Scheduler, Surface};
use crate::sim::{
    ClockEvent, ClockTicket, Field, GameClock, GameSession, GameStatus, ItemId, ItemKind,
    MotionAnimator, Outcome, spawn,
};

/// What a field click did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// No session running; click ignored
    NotRunning,
    /// Background or an unknown item
    Missed,
    /// Target swept; new score
    Scored(u32),
    /// Last target swept
    Won,
    /// Hazard clicked
    Lost,
}

/// Drives one game on one platform
pub struct GameController<S: Surface, T: Scheduler> {
    config: GameConfig,
    session: GameSession,
    field: Field,
    clock: GameClock,
    motion: MotionAnimator,
    rng: Pcg32,
    surface: S,
    scheduler: T,
}

impl<S: Surface, T: Scheduler> GameController<S, T> {
    /// Create an idle game; nothing is spawned until `start`
    pub fn new(config: GameConfig, surface: S, scheduler: T, seed: u64) -> Self {
        let size = surface.field_size();
        let motion = MotionAnimator::new(config.motion_base, config.motion_min, config.motion_max);
        Self {
            config,
            session: GameSession::default(),
            field: Field::new(size.x, size.y),
            clock: GameClock::new(),
            motion,
            rng: Pcg32::seed_from_u64(seed),
            surface,
            scheduler,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn status(&self) -> GameStatus {
        self.session.status
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn motion(&self) -> &MotionAnimator {
        &self.motion
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn scheduler(&self) -> &T {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut T {
        &mut self.scheduler
    }

    /// Start a fresh session, discarding whatever was on the field
    pub fn start(&mut self) {
        self.cancel_clock();

        let duration = self.config.duration_sec;
        self.session = GameSession::next(&self.session, duration);

        // Reset field
        self.motion.clear();
        self.field.clear();
        self.field.resize(self.surface.field_size());
        self.surface.clear_items();

        let size = self.config.item_size;
        spawn(
            &mut self.field,
            &mut self.rng,
            ItemKind::Target,
            self.config.target_count,
            size,
            &self.config.target_asset,
        );
        spawn(
            &mut self.field,
            &mut self.rng,
            ItemKind::Hazard,
            self.config.hazard_count,
            size,
            &self.config.hazard_asset,
        );
        for item in &self.field.items {
            self.surface.add_item(item);
        }

        // Let placement settle before targets start moving
        self.scheduler.defer_motion(self.session.id);

        let (ticket, _) = self.clock.start(duration);
        self.scheduler.start_interval(ticket, TICK_INTERVAL_MS);

        self.surface.show_score(0, self.config.target_count);
        self.surface.show_timer(&format_clock(duration));
        self.surface.show_hud();
        self.surface.hide_dialog();
        self.surface.show_control(STOP_LABEL);

        log::info!(
            "Session {} started: {} targets, {} hazards, {}s",
            self.session.id,
            self.config.target_count,
            self.config.hazard_count,
            duration
        );
    }

    /// Abort the running session
    pub fn stop(&mut self) {
        if !self.session.is_running() {
            log::debug!("Stop ignored, no session running");
            return;
        }

        self.session.status = GameStatus::Idle;
        self.cancel_clock();
        self.surface.hide_control();
        self.surface.show_dialog(REPLAY_MESSAGE);

        log::info!("Session {} stopped at score {}", self.session.id, self.session.score);
    }

    /// The single game button: stop when running, start otherwise
    pub fn toggle(&mut self) {
        if self.session.is_running() {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Dialog replay button
    pub fn replay(&mut self) {
        self.start();
    }

    /// End the running session; a second call in the same session does nothing
    pub fn finish(&mut self, win: bool) {
        if !self.session.is_running() {
            log::debug!("Finish ignored, session {} not running", self.session.id);
            return;
        }

        let outcome = Outcome::from_win(win);
        self.session.status = GameStatus::Finished(outcome);
        self.cancel_clock();
        self.surface.hide_control();
        self.surface.show_dialog(match outcome {
            Outcome::Win => WIN_MESSAGE,
            Outcome::Lose => LOSE_MESSAGE,
        });

        log::info!(
            "Session {} finished: {:?} with score {}/{}",
            self.session.id,
            outcome,
            self.session.score,
            self.config.target_count
        );
    }

    /// Resolve a click on the field; `target` is the clicked item, if any
    pub fn on_field_click(&mut self, target: Option<ItemId>) -> ClickOutcome {
        if !self.session.is_running() {
            log::info!("Game is not started");
            return ClickOutcome::NotRunning;
        }

        let Some(id) = target else {
            return ClickOutcome::Missed;
        };
        let Some(kind) = self.field.get(id).map(|item| item.kind) else {
            return ClickOutcome::Missed;
        };

        match kind {
            ItemKind::Hazard => {
                log::debug!("Hazard {} clicked", id);
                self.finish(false);
                ClickOutcome::Lost
            }
            ItemKind::Target => {
                self.field.remove(id);
                self.motion.detach(id);
                self.surface.remove_item(id);

                self.session.score += 1;
                let score = self.session.score;
                let total = self.config.target_count;
                self.surface.show_score(score, total.saturating_sub(score));
                log::debug!("Target {} swept, score {}/{}", id, score, total);

                if score == total {
                    self.finish(true);
                    ClickOutcome::Won
                } else {
                    ClickOutcome::Scored(score)
                }
            }
        }
    }

    /// One-second interval callback
    pub fn on_clock_tick(&mut self, ticket: ClockTicket) -> ClockEvent {
        let event = self.clock.tick(ticket);
        match event {
            ClockEvent::Stale => {
                log::debug!("Stale clock tick {:?}", ticket);
                self.scheduler.cancel_interval(ticket);
            }
            ClockEvent::Remaining(secs) => {
                self.session.remaining_secs = secs;
                self.surface.show_timer(&format_clock(secs));
            }
            ClockEvent::Expired => {
                self.scheduler.cancel_interval(ticket);
                log::debug!("Clock expired for session {}", self.session.id);
                self.finish(self.session.score == self.config.target_count);
            }
        }
        event
    }

    /// Deferred start of the target animation
    pub fn on_motion_ready(&mut self, session_id: u64) {
        if session_id != self.session.id {
            log::debug!("Dropping motion start for old session {}", session_id);
            return;
        }

        let targets = self.field.ids_of(ItemKind::Target);
        for frame in self.motion.start(&targets, &mut self.rng) {
            self.surface.apply_motion(frame);
        }
    }

    /// An item finished its current swing
    pub fn on_transition_end(&mut self, id: ItemId) {
        if let Some(frame) = self.motion.on_transition_end(id, &mut self.rng) {
            self.surface.apply_motion(frame);
        }
    }

    fn cancel_clock(&mut self) {
        if let Some(ticket) = self.clock.cancel() {
            self.scheduler.cancel_interval(ticket);
        }
    }
}
