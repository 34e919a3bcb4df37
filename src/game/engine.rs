//! Plain-data entry points for the orchestrator.
//!
//! Each call takes an [`EngineInput`], builds a [`Game`] for that one call,
//! and returns everything the caller must persist or forward as an
//! [`EngineResult`]. The seed in [`EngineOptions`] makes a call
//! reproducible; without one the stream is seeded from entropy.
//!
//! ```
//! use mafia_engine::core::{GameConfig, Player};
//! use mafia_engine::game::{new_game, EngineInput, EngineOptions};
//!
//! let players = (1..=5)
//!     .map(|i| Player::new(format!("u{i}"), format!("Name{i}"), format!("Alias{i}")))
//!     .collect();
//! let input = EngineInput {
//!     players,
//!     config: GameConfig::standard(5),
//!     state: None,
//!     options: EngineOptions { seed: Some(42) },
//! };
//!
//! let result = new_game(input).unwrap();
//! assert_eq!(result.state.day, 1);
//! assert_eq!(result.actors.len(), 5);
//! ```

use serde::{Deserialize, Serialize};

use super::Game;
use crate::core::{EngineError, GameConfig, GameRng, GameState, Player, PlayerNumber, Result};
use crate::events::EventGroup;
use crate::roles::{Actor, ActorView, Alignment};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Input to every engine call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineInput {
    pub players: Vec<Player>,
    pub config: GameConfig,
    /// Required by everything except [`new_game`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<GameState>,
    #[serde(default)]
    pub options: EngineOptions,
}

/// A winning actor, as reported to the orchestrator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnerSummary {
    pub id: String,
    pub name: String,
    pub alias: String,
    pub number: PlayerNumber,
    pub role: String,
    pub alignment: Alignment,
}

impl From<&Actor> for WinnerSummary {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.player.id.clone(),
            name: actor.player.name.clone(),
            alias: actor.player.alias.clone(),
            number: actor.number,
            role: actor.kind().to_string(),
            alignment: actor.alignment(),
        }
    }
}

/// Everything one engine call produces.
///
/// Diagnostics are not part of the result. They go through the `log`
/// facade to whatever logger the host installed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineResult {
    pub state: GameState,
    pub actors: Vec<ActorView>,
    /// Narration of the night just resolved; empty for other calls.
    pub events: EventGroup,
    /// `None` while the game continues.
    pub winners: Option<Vec<WinnerSummary>>,
}

impl EngineResult {
    fn from_game(game: &Game) -> Self {
        let winners = game.winners();
        Self {
            state: game.state(),
            actors: game.dump_actors(),
            events: game.events().clone(),
            winners: (!winners.is_empty()).then_some(winners),
        }
    }
}

/// Draft, shuffle and number a fresh roster.
pub fn new_game(input: EngineInput) -> Result<EngineResult> {
    let rng = GameRng::from_seed(input.options.seed);
    let game = Game::new(input.players, input.config, rng)?;
    Ok(EngineResult::from_game(&game))
}

/// Rebuild a game from a prior state and report on it.
pub fn load_game(input: EngineInput) -> Result<EngineResult> {
    let game = load(input)?;
    Ok(EngineResult::from_game(&game))
}

/// Resolve one night.
pub fn resolve_game(input: EngineInput) -> Result<EngineResult> {
    let mut game = load(input)?;
    game.resolve();
    Ok(EngineResult::from_game(&game))
}

/// Lynch the player numbered `number`.
pub fn lynch_game(input: EngineInput, number: u8) -> Result<EngineResult> {
    let mut game = load(input)?;
    game.lynch(PlayerNumber::new(number))?;
    Ok(EngineResult::from_game(&game))
}

fn load(input: EngineInput) -> Result<Game> {
    let state = input.state.ok_or(EngineError::MissingState)?;
    let rng = GameRng::from_seed(input.options.seed);
    Game::load(input.players, input.config, state, rng)
}

/// Turn a result's actor dump back into the player list for the next call.
#[must_use]
pub fn players_from(actors: Vec<ActorView>) -> Vec<Player> {
    actors.into_iter().map(ActorView::into_player).collect()
}

/// Input for the call that follows `result`.
#[must_use]
pub fn next_input(result: EngineResult, config: GameConfig, options: EngineOptions) -> EngineInput {
    EngineInput {
        players: players_from(result.actors),
        config,
        state: Some(result.state),
        options,
    }
}
