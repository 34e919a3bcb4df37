//! Core engine types: players, configuration, persisted state, RNG, errors.
//!
//! These are the plain-data building blocks that cross the engine boundary.
//! Actors and events are built on top of them.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use config::{GameConfig, GameSettings, RoleSettings};
pub use error::{EngineError, Result};
pub use player::{Player, PlayerNumber, MAX_PLAYERS, MAX_TARGET_SLOTS};
pub use rng::GameRng;
pub use state::{GameState, GraveyardRecord, StatePlayer};
