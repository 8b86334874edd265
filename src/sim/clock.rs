//! Countdown clock
//!
//! The platform owns the actual interval; this side only counts. Every
//! run gets a new [`ClockTicket`] and ticks carrying any other ticket are
//! ignored, so a cancelled interval that still fires does nothing.

use serde::{Deserialize, Serialize};

/// Identifies one clock run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClockTicket(pub u64);

/// Result of delivering one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    /// Tick for a cancelled or replaced run
    Stale,
    /// One second passed; this many remain
    Remaining(u32),
    /// Remaining time had already reached zero; the run is over
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClockState {
    Idle,
    Running { ticket: ClockTicket, remaining: u32 },
}

/// Single countdown; at most one run active at a time
#[derive(Debug, Clone)]
pub struct GameClock {
    state: ClockState,
    generation: u64,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl GameClock {
    pub fn new() -> Self {
        Self {
            state: ClockState::Idle,
            generation: 0,
        }
    }

    /// Start a new run of `duration_sec`, replacing any active one
    ///
    /// Returns the new ticket and the ticket it replaced, if any.
    pub fn start(&mut self, duration_sec: u32) -> (ClockTicket, Option<ClockTicket>) {
        let replaced = self.cancel();
        self.generation += 1;
        let ticket = ClockTicket(self.generation);
        self.state = ClockState::Running {
            ticket,
            remaining: duration_sec,
        };
        (ticket, replaced)
    }

    /// Advance the run identified by `ticket` by one second
    pub fn tick(&mut self, ticket: ClockTicket) -> ClockEvent {
        match self.state {
            ClockState::Running {
                ticket: active,
                remaining,
            } if active == ticket => {
                if remaining == 0 {
                    self.state = ClockState::Idle;
                    ClockEvent::Expired
                } else {
                    let remaining = remaining - 1;
                    self.state = ClockState::Running { ticket, remaining };
                    ClockEvent::Remaining(remaining)
                }
            }
            _ => ClockEvent::Stale,
        }
    }

    /// Stop the active run; safe when nothing is running
    ///
    /// Returns the ticket that was active so the caller can release its interval.
    pub fn cancel(&mut self) -> Option<ClockTicket> {
        match std::mem::replace(&mut self.state, ClockState::Idle) {
            ClockState::Running { ticket, .. } => Some(ticket),
            ClockState::Idle => None,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, ClockState::Running { .. })
    }

    pub fn active_ticket(&self) -> Option<ClockTicket> {
        match self.state {
            ClockState::Running { ticket, .. } => Some(ticket),
            ClockState::Idle => None,
        }
    }

    pub fn remaining(&self) -> Option<u32> {
        match self.state {
            ClockState::Running { remaining, .. } => Some(remaining),
            ClockState::Idle => None,
        }
    }
}
