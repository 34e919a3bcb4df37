//! Persisted game state.
//!
//! The only piece of the engine that survives between invocations besides
//! the player list. Actors are rebuilt from both on every call.

use serde::{Deserialize, Serialize};

use super::player::PlayerNumber;

/// A player's public standing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatePlayer {
    pub number: PlayerNumber,
    pub alias: String,
    pub alive: bool,
}

/// One graveyard entry. Append-only across the life of a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraveyardRecord {
    pub number: PlayerNumber,
    pub alias: String,
    /// Cause of death.
    pub cod: String,
    /// Day of death.
    pub dod: u32,
    pub role: String,
    pub will: String,
}

/// Persisted snapshot of a game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    #[serde(default)]
    pub day: u32,
    #[serde(default)]
    pub players: Vec<StatePlayer>,
    #[serde(default)]
    pub graveyard: Vec<GraveyardRecord>,
}

impl GameState {
    /// Numbers of every living player in this snapshot.
    pub fn alive_numbers(&self) -> impl Iterator<Item = PlayerNumber> + '_ {
        self.players.iter().filter(|p| p.alive).map(|p| p.number)
    }

    /// Look up a player's standing by number.
    #[must_use]
    pub fn player(&self, number: PlayerNumber) -> Option<&StatePlayer> {
        self.players.iter().find(|p| p.number == number)
    }
}
