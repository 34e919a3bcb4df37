//! # mafia-engine
//!
//! Night/day resolution engine for a Mafia-style social deduction game.
//!
//! ## Design Principles
//!
//! 1. **Stateless Between Calls**: Actors are rebuilt from the player list
//!    and the last `GameState` on every call and thrown away afterwards.
//!
//! 2. **Correct, Don't Error**: Only malformed input is an error. Stale or
//!    illegal orders are cleared during resolution and logged.
//!
//! 3. **Deterministic**: Every random decision (role draft, Godfather proxy)
//!    draws from one injected, seedable `GameRng`.
//!
//! ## Architecture
//!
//! - **Closed Role Set**: `RoleKind` names every role and fixes the turn
//!   order; `Role` is a tagged union holding per-role state.
//!
//! - **Actor Arena**: Actors refer to each other by `ActorId`, so protector
//!   queues are plain index lists.
//!
//! - **Explicit Night Context**: Each action runs against a `Night` that
//!   borrows the arena, the scratch event group and the RNG.
//!
//! ## Modules
//!
//! - `core`: Players, configuration, persisted state, RNG, errors
//! - `events`: Narration events and duration-tagged groups
//! - `draft`: Weighted, quota-constrained role draft
//! - `roles`: Role framework, actors, the kill pipeline, concrete roles
//! - `game`: Day lifecycle and the engine entry points

pub mod core;
pub mod draft;
pub mod events;
pub mod game;
pub mod roles;

// Re-export commonly used types
pub use crate::core::{
    EngineError, GameConfig, GameRng, GameSettings, GameState, GraveyardRecord, Player,
    PlayerNumber, Result, RoleSettings, StatePlayer,
};

pub use crate::events::{EventEntry, EventGroup, EventTargets, GameEvent};

pub use crate::draft::{draft_roles, Draft, DraftPick};

pub use crate::roles::{Actor, ActorId, ActorView, Alignment, Role, RoleBehavior, RoleKind};

pub use crate::game::{
    lynch_game, load_game, new_game, resolve_game, EngineInput, EngineOptions, EngineResult, Game,
    WinnerSummary,
};
