//! Runtime actors.
//!
//! An actor wraps one player's record with the role behavior and the
//! per-night play-state (visits, protector queues, immunity). Actors exist
//! for one engine call only; everything that must outlive the call is
//! written back through [`ActorView`] and the game state.

use std::collections::VecDeque;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use smallvec::SmallVec;

use super::{Alignment, Role, RoleKind};
use crate::core::{EngineError, GameConfig, Player, PlayerNumber, Result, MAX_TARGET_SLOTS};

/// Index of an actor in the game's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActorId(pub usize);

impl ActorId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One participant's runtime state.
#[derive(Clone, Debug)]
pub struct Actor {
    pub id: ActorId,
    /// The record this actor was built from.
    pub player: Player,
    pub number: PlayerNumber,
    pub alive: bool,
    pub role: Role,

    pub allies: Vec<ActorId>,
    /// Legal candidates per slot for the current day.
    pub possible_targets: Vec<Vec<ActorId>>,
    /// Resolved selection, one actor per slot.
    pub targets: SmallVec<[ActorId; MAX_TARGET_SLOTS]>,

    pub visitors: Vec<ActorId>,
    pub visiting: Option<ActorId>,
    /// Bodyguards protecting this actor tonight, earliest first.
    pub bodyguards: VecDeque<ActorId>,
    /// Doctors healing this actor tonight, earliest first.
    pub doctors: VecDeque<ActorId>,
    pub night_immune: bool,

    pub cause_of_death: Option<String>,
}

impl Actor {
    /// Build an actor from a role-tagged, numbered player.
    ///
    /// Unknown role names fail here, before any resolution happens.
    pub fn new(id: ActorId, player: Player, config: &GameConfig) -> Result<Self> {
        player.validate()?;

        let role_name = player.role.as_deref().ok_or_else(|| EngineError::MissingRole {
            alias: player.alias.clone(),
        })?;
        let kind = RoleKind::from_str(role_name)
            .map_err(|_| EngineError::UnknownRole(role_name.to_string()))?;
        let number = player.number.ok_or_else(|| EngineError::MissingNumber {
            alias: player.alias.clone(),
        })?;

        let role = Role::build(kind, &player, config)?;
        let mut actor = Self {
            id,
            number,
            alive: player.alive,
            player,
            role,
            allies: Vec::new(),
            possible_targets: Vec::new(),
            targets: SmallVec::new(),
            visitors: Vec::new(),
            visiting: None,
            bodyguards: VecDeque::new(),
            doctors: VecDeque::new(),
            night_immune: false,
            cause_of_death: None,
        };
        actor.reset_night();
        Ok(actor)
    }

    /// Clear everything a previous night left behind. Role-granted
    /// immunity is permanent and survives the reset.
    pub fn reset_night(&mut self) {
        self.visitors.clear();
        self.visiting = None;
        self.bodyguards.clear();
        self.doctors.clear();
        self.night_immune = matches!(&self.role, Role::Godfather(godfather) if godfather.night_immune);
        if let Role::Bodyguard(bodyguard) = &mut self.role {
            bodyguard.guarding = None;
        }
    }

    #[must_use]
    pub fn kind(&self) -> RoleKind {
        self.role.kind()
    }

    #[must_use]
    pub fn alignment(&self) -> Alignment {
        self.kind().alignment()
    }

    #[must_use]
    pub fn alias(&self) -> &str {
        &self.player.alias
    }

    /// External id used to address narration.
    #[must_use]
    pub fn external_id(&self) -> &str {
        &self.player.id
    }

    /// Cause of death recorded when this actor kills someone.
    #[must_use]
    pub fn kill_reason(&self) -> &'static str {
        match self.alignment() {
            Alignment::Mafia => "They were found riddled with bullets",
            Alignment::Town => "How they died is unknown",
        }
    }

    /// Allies among `actors`, per this actor's alignment.
    #[must_use]
    pub fn find_allies(&self, actors: &[Actor]) -> Vec<ActorId> {
        self.alignment().allies_of(self, actors)
    }

    /// Possible targets among `actors`, per this actor's role.
    #[must_use]
    pub fn find_possible_targets(&self, actors: &[Actor]) -> Vec<Vec<ActorId>> {
        self.role.behavior().possible_targets(self, actors)
    }

    /// Win check against the living set.
    #[must_use]
    pub fn check_for_win(&self, living: &[&Actor]) -> bool {
        self.role.behavior().check_for_win(self, living)
    }

    /// Check every selected slot against the current pools.
    ///
    /// A selection with no pools at all, or one naming an actor outside the
    /// slot's pool, is invalid as a whole.
    #[must_use]
    pub fn targets_are_valid(&self) -> bool {
        !self.possible_targets.is_empty()
            && self.targets.iter().enumerate().all(|(slot, target)| {
                self.possible_targets
                    .get(slot)
                    .is_some_and(|pool| pool.contains(target))
            })
    }

    /// Per-player view for the actor dump.
    ///
    /// Current target selections are left out so a shared dump never leaks
    /// a player's pending choice.
    #[must_use]
    pub fn view(&self, actors: &[Actor]) -> ActorView {
        let mut role_actions = self.player.role_actions.clone();
        role_actions.extend(self.role.behavior().role_actions());

        ActorView {
            id: self.player.id.clone(),
            name: self.player.name.clone(),
            alias: self.player.alias.clone(),
            role: self.kind().to_string(),
            number: self.number,
            alive: self.alive,
            possible_targets: self
                .possible_targets
                .iter()
                .map(|pool| pool.iter().map(|id| actors[id.index()].number).collect())
                .collect(),
            targets: Vec::new(),
            allies: self
                .allies
                .iter()
                .map(|id| {
                    let ally = &actors[id.index()];
                    AllyView {
                        alias: ally.alias().to_string(),
                        number: ally.number,
                        role: ally.kind().to_string(),
                        alive: ally.alive,
                    }
                })
                .collect(),
            role_actions,
            will: self.player.will.clone(),
        }
    }
}

impl std::fmt::Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "|{}| {}({})", self.kind(), self.alias(), self.number.raw())
    }
}

/// What an actor knows about one ally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllyView {
    pub alias: String,
    pub number: PlayerNumber,
    pub role: String,
    pub alive: bool,
}

/// Dumped per-player view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorView {
    pub id: String,
    pub name: String,
    pub alias: String,
    pub role: String,
    pub number: PlayerNumber,
    pub alive: bool,
    pub possible_targets: Vec<Vec<PlayerNumber>>,
    /// Always empty in a dump.
    pub targets: Vec<PlayerNumber>,
    pub allies: Vec<AllyView>,
    pub role_actions: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub will: Option<String>,
}

impl ActorView {
    /// Turn the view back into a player record for the next invocation.
    #[must_use]
    pub fn into_player(self) -> Player {
        Player {
            id: self.id,
            name: self.name,
            alias: self.alias,
            role: Some(self.role),
            number: Some(self.number),
            alive: self.alive,
            possible_targets: self.possible_targets,
            targets: self.targets,
            role_actions: self.role_actions,
            will: self.will,
        }
    }
}
