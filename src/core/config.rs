//! Game configuration types.
//!
//! A game is configured by:
//! - `tags`: ordered slots, one role to draft per tag
//! - `roles`: the role table (max instances, selection weight, settings)
//! - `settings`: game-wide switches
//!
//! Role-specific settings stay loosely typed on the wire and are parsed
//! into each role's own settings struct when actors are built.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::{EngineError, Result};
use super::player::MAX_PLAYERS;
use crate::roles::RoleKind;

/// Table entry for one role.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoleSettings {
    /// Maximum instances the draft may pick.
    pub max: u32,

    /// Relative selection weight.
    pub weight: f64,

    /// Role-specific settings, e.g. `maxVests` for the Citizen.
    #[serde(default)]
    pub settings: Map<String, Value>,
}

impl RoleSettings {
    /// Create a table entry with no role-specific settings.
    #[must_use]
    pub fn new(max: u32, weight: f64) -> Self {
        Self {
            max,
            weight,
            settings: Map::new(),
        }
    }

    /// Add a role-specific setting (builder pattern).
    #[must_use]
    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }
}

/// Game-wide switches.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSettings {
    /// Raise [`EngineError::DraftExhausted`] instead of falling back to
    /// the fallback role when a tag has no candidate left.
    #[serde(default)]
    pub strict_draft: bool,
}

/// Complete game configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Ordered draft slots.
    pub tags: Vec<String>,

    #[serde(default)]
    pub settings: GameSettings,

    /// Role table, keyed by role name.
    pub roles: BTreeMap<String, RoleSettings>,
}

impl GameConfig {
    /// Create an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard 8-3-3-1 setup, sliced to `player_count` slots.
    ///
    /// ```
    /// use mafia_engine::core::GameConfig;
    ///
    /// let config = GameConfig::standard(5);
    /// assert_eq!(config.tags.len(), 5);
    /// assert_eq!(config.tags[0], "town_protective");
    /// assert!(config.roles.contains_key("Godfather"));
    /// ```
    #[must_use]
    pub fn standard(player_count: usize) -> Self {
        const TAGS: [&str; MAX_PLAYERS] = [
            // Town
            "town_protective",
            "town_killing",
            "town_random",
            "town_random",
            "town_random",
            "town_random",
            "town_random",
            "town_random",
            // Mafia
            "mafia_killing",
            "mafia_random",
            "mafia_random",
            // Neutral, filled by the fallback role until neutral roles exist
            "neutral_random",
            "neutral_random",
            "neutral_random",
            // Any
            "any_random",
        ];

        TAGS.iter()
            .take(player_count)
            .fold(Self::new(), |config, tag| config.with_tag(*tag))
            .with_role(RoleKind::Citizen, RoleSettings::new(15, 1.0).with_setting("maxVests", 2))
            .with_role(RoleKind::Doctor, RoleSettings::new(2, 2.0))
            .with_role(RoleKind::Bodyguard, RoleSettings::new(2, 1.0))
            .with_role(RoleKind::Godfather, RoleSettings::new(1, 2.0).with_setting("nightImmune", 2))
            .with_role(RoleKind::Mafioso, RoleSettings::new(3, 1.0))
    }

    /// Append a draft slot (builder pattern).
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add or replace a role table entry (builder pattern).
    #[must_use]
    pub fn with_role(mut self, role: RoleKind, settings: RoleSettings) -> Self {
        self.roles.insert(role.to_string(), settings);
        self
    }

    /// Enable strict drafting (builder pattern).
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.settings.strict_draft = true;
        self
    }

    /// Get the table entry for a role.
    #[must_use]
    pub fn role(&self, role: RoleKind) -> Option<&RoleSettings> {
        self.roles.get(role.as_ref())
    }

    /// Parse a role's specific settings into its typed settings struct.
    ///
    /// Roles absent from the table get `T`'s serde defaults.
    pub fn role_settings<T: DeserializeOwned>(&self, role: RoleKind) -> Result<T> {
        let raw = self
            .role(role)
            .map(|entry| entry.settings.clone())
            .unwrap_or_default();

        serde_json::from_value(Value::Object(raw)).map_err(|source| EngineError::InvalidRoleSettings {
            role: role.to_string(),
            source,
        })
    }

    /// Validate the table: known role names, usable weights.
    pub fn validate(&self) -> Result<()> {
        for (name, entry) in &self.roles {
            RoleKind::from_str(name).map_err(|_| EngineError::UnknownRole(name.clone()))?;

            if !entry.weight.is_finite() || entry.weight < 0.0 {
                return Err(EngineError::InvalidConfig(format!(
                    "role {name} has weight {}, expected a finite non-negative number",
                    entry.weight
                )));
            }
        }
        Ok(())
    }
}
