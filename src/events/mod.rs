//! Narration broadcast tree.
//!
//! Every action a role takes during the night may emit narration. The game
//! gives each actor a fresh group to emit into and files any non-empty
//! group under the night's root group. The orchestrator routes each event
//! by its `targets` and waits out the root's total duration.

mod event;

pub use event::{EventEntry, EventGroup, EventTargets, GameEvent};

/// Wait durations, in seconds, attached to event groups.
pub mod duration {
    pub const ZERO: u32 = 0;
    pub const MAFIA_KILL: u32 = 3;
    pub const SHOOTOUT: u32 = 3;
}

/// Event ids shared by more than one role.
pub mod common {
    pub const NIGHT_IMMUNE: &str = "night_immune";
    pub const KILLED_BY_MAFIA: &str = "killed_by_mafia";
}
