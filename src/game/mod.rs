//! Game orchestration and the engine entry points.

pub mod engine;
mod game;

pub use engine::{
    lynch_game, load_game, new_game, next_input, players_from, resolve_game, EngineInput,
    EngineOptions, EngineResult, WinnerSummary,
};
pub use game::Game;
