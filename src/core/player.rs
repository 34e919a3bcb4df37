//! Player identification and the external player record.
//!
//! ## PlayerNumber
//!
//! The in-game reference for a participant, 1..=15 and unique per game.
//! Distinct from the external `id`, which is only used to address
//! narration to connected clients.
//!
//! ## Player
//!
//! The wire representation handed to and returned from the engine. All
//! mutable per-day fields (alive, targets, role counters) round-trip
//! through it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::{EngineError, Result};

/// Highest player number, and the largest roster a game supports.
pub const MAX_PLAYERS: usize = 15;

/// Maximum number of parallel target slots a role may expose.
pub const MAX_TARGET_SLOTS: usize = 2;

/// In-game player number (1..=15).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerNumber(pub u8);

impl PlayerNumber {
    /// Create a new player number.
    #[must_use]
    pub const fn new(number: u8) -> Self {
        Self(number)
    }

    /// Get the raw number.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Check the number is within 1..=15.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 >= 1 && self.0 as usize <= MAX_PLAYERS
    }

    /// Numbers for a roster of `count` players, 1..=count.
    ///
    /// ```
    /// use mafia_engine::core::PlayerNumber;
    ///
    /// let numbers: Vec<_> = PlayerNumber::sequence(3).collect();
    /// assert_eq!(numbers, vec![PlayerNumber(1), PlayerNumber(2), PlayerNumber(3)]);
    /// ```
    pub fn sequence(count: usize) -> impl Iterator<Item = PlayerNumber> {
        (1..=count.min(MAX_PLAYERS) as u8).map(PlayerNumber)
    }
}

impl std::fmt::Display for PlayerNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

fn default_alive() -> bool {
    true
}

/// External player record.
///
/// `role` and `number` are absent before a game is created; both are
/// required to load one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// External id, used to address narration.
    pub id: String,
    /// Display name.
    pub name: String,
    /// In-game alias.
    pub alias: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<PlayerNumber>,
    #[serde(default = "default_alive")]
    pub alive: bool,
    /// Legal candidates per target slot, as last computed.
    #[serde(default)]
    pub possible_targets: Vec<Vec<PlayerNumber>>,
    /// Current selection, one number per slot.
    #[serde(default)]
    pub targets: Vec<PlayerNumber>,
    /// Per-role persisted counters, e.g. `remainingVests`.
    #[serde(default)]
    pub role_actions: Map<String, Value>,
    /// Last will, copied into the graveyard on death.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub will: Option<String>,
}

impl Player {
    /// Create a fresh, role-less player.
    pub fn new(id: impl Into<String>, name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            alias: alias.into(),
            role: None,
            number: None,
            alive: true,
            possible_targets: Vec::new(),
            targets: Vec::new(),
            role_actions: Map::new(),
            will: None,
        }
    }

    /// Set the role (builder pattern).
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Set the number (builder pattern).
    #[must_use]
    pub fn with_number(mut self, number: u8) -> Self {
        self.number = Some(PlayerNumber(number));
        self
    }

    /// Set the target selection (builder pattern).
    #[must_use]
    pub fn with_targets(mut self, targets: &[u8]) -> Self {
        self.targets = targets.iter().copied().map(PlayerNumber).collect();
        self
    }

    /// Set a role counter (builder pattern).
    #[must_use]
    pub fn with_role_action(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.role_actions.insert(key.into(), value.into());
        self
    }

    /// Mark the player dead (builder pattern).
    #[must_use]
    pub fn dead(mut self) -> Self {
        self.alive = false;
        self
    }

    /// Validate the record's shape.
    ///
    /// Checks number ranges and slot bounds. Whether the targets are legal
    /// for the day is decided later, during resolution.
    pub fn validate(&self) -> Result<()> {
        if let Some(number) = self.number {
            if !number.is_valid() {
                return Err(EngineError::NumberOutOfRange(number.0));
            }
        }

        if self.possible_targets.len() > MAX_TARGET_SLOTS {
            return Err(EngineError::invalid_player(
                &self.alias,
                format!("at most {MAX_TARGET_SLOTS} possible-target slots allowed"),
            ));
        }
        for slot in &self.possible_targets {
            if slot.len() > MAX_PLAYERS {
                return Err(EngineError::invalid_player(
                    &self.alias,
                    format!("a possible-target slot holds at most {MAX_PLAYERS} numbers"),
                ));
            }
        }
        if self.targets.len() > MAX_PLAYERS {
            return Err(EngineError::invalid_player(
                &self.alias,
                format!("at most {MAX_PLAYERS} targets allowed"),
            ));
        }

        let all_numbers = self
            .possible_targets
            .iter()
            .flatten()
            .chain(self.targets.iter());
        for number in all_numbers {
            if !number.is_valid() {
                return Err(EngineError::NumberOutOfRange(number.0));
            }
        }

        Ok(())
    }
}
