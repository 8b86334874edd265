//! Deterministic game pieces
//!
//! Nothing in here touches a platform:
//! - Seeded RNG only (passed in by the caller)
//! - Stable iteration order (spawn order / item ID)
//! - Time advances only through explicit clock ticks

pub mod clock;
pub mod motion;
pub mod placer;
pub mod spawner;
pub mod state;

pub use clock::{ClockEvent, ClockTicket, GameClock};
pub use motion::{MotionAnimator, MotionFrame, MotionHandle, MotionPhase};
pub use placer::{random_position, uniform};
pub use spawner::spawn;
pub use state::{Field, GameSession, GameStatus, Item, ItemId, ItemKind, Outcome};
