//! Roles and the actor framework.
//!
//! ## Design
//!
//! The role set is closed: [`RoleKind`] names every role and fixes the turn
//! order, [`Role`] is a tagged union holding each role's own play-state,
//! and [`RoleBehavior`] is the capability surface every concrete role
//! implements (target discovery, the night action, the win check).
//!
//! Actors live in one arena owned by the game and refer to each other by
//! [`ActorId`]. A role's night action runs against a [`Night`] context that
//! borrows the arena, the scratch event group and the random stream for
//! the duration of that one action.

pub mod actor;
pub mod bodyguard;
pub mod citizen;
pub mod doctor;
pub mod godfather;
pub mod mafioso;
pub mod night;

pub use actor::{Actor, ActorId, ActorView, AllyView};
pub use bodyguard::Bodyguard;
pub use citizen::{Citizen, CitizenSettings};
pub use doctor::Doctor;
pub use godfather::{Godfather, GodfatherSettings};
pub use mafioso::Mafioso;
pub use night::{KillOutcome, Night};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::core::{GameConfig, Player, Result};

/// Role assigned to failed draft slots and to roster padding.
pub const FALLBACK_ROLE: RoleKind = RoleKind::Citizen;

/// Faction membership driving the default win condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Alignment {
    Town,
    Mafia,
}

impl Alignment {
    /// Allies of `me` among `actors`.
    ///
    /// The Mafia know each other: every other living Mafia-aligned actor.
    /// Town has no allies.
    #[must_use]
    pub fn allies_of(self, me: &Actor, actors: &[Actor]) -> Vec<ActorId> {
        match self {
            Alignment::Town => Vec::new(),
            Alignment::Mafia => actors
                .iter()
                .filter(|a| a.alive && a.id != me.id && a.alignment() == Alignment::Mafia)
                .map(|a| a.id)
                .collect(),
        }
    }

    /// Default faction win check against the living set.
    ///
    /// - Town wins once no living Mafia-aligned actor remains.
    /// - Mafia wins once no living actor other than itself and its allies remains.
    #[must_use]
    pub fn wins(self, me: &Actor, living: &[&Actor]) -> bool {
        match self {
            Alignment::Town => !living.iter().any(|a| a.alignment() == Alignment::Mafia),
            Alignment::Mafia => living
                .iter()
                .all(|a| a.id == me.id || me.allies.contains(&a.id)),
        }
    }
}

/// Every role the engine knows.
///
/// Declaration order is the turn order: self-protecting roles first, then
/// target-protecting roles, then killing roles.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, AsRefStr, EnumIter,
)]
pub enum RoleKind {
    // Self protecting
    Citizen,
    // Target protecting
    Doctor,
    Bodyguard,
    // Killing
    Godfather,
    Mafioso,
}

impl RoleKind {
    /// Faction of the role.
    #[must_use]
    pub const fn alignment(self) -> Alignment {
        match self {
            RoleKind::Citizen | RoleKind::Doctor | RoleKind::Bodyguard => Alignment::Town,
            RoleKind::Godfather | RoleKind::Mafioso => Alignment::Mafia,
        }
    }

    /// Draft tags the role can fill.
    #[must_use]
    pub const fn tags(self) -> &'static [&'static str] {
        match self {
            RoleKind::Citizen => &["any_random", "town_random", "town_government"],
            RoleKind::Doctor => &["any_random", "town_random", "town_protective"],
            RoleKind::Bodyguard => &["any_random", "town_random", "town_protective", "town_killing"],
            RoleKind::Godfather => &["any_random", "mafia_killing"],
            RoleKind::Mafioso => &["any_random", "mafia_random", "mafia_killing"],
        }
    }

    /// Check if the role can fill a draft tag. A tag naming the role also matches.
    #[must_use]
    pub fn fills(self, tag: &str) -> bool {
        self.tags().contains(&tag) || self.as_ref() == tag
    }

    /// Mafia roles whose action is a kill. Only one of these matures per night.
    #[must_use]
    pub const fn is_mafia_killing(self) -> bool {
        matches!(self, RoleKind::Godfather | RoleKind::Mafioso)
    }

    /// Id of the event group an actor of this role emits into.
    #[must_use]
    pub fn action_group_id(self) -> String {
        format!("{}_action", self.as_ref().to_lowercase())
    }
}

/// Capabilities every concrete role provides.
pub trait RoleBehavior {
    /// The role this behavior belongs to.
    fn kind(&self) -> RoleKind;

    /// Legal candidates per target slot, recomputed every day from the
    /// current living set.
    fn possible_targets(&self, me: &Actor, actors: &[Actor]) -> Vec<Vec<ActorId>>;

    /// Run the night action for actor `me`.
    fn act(night: &mut Night<'_>, me: ActorId)
    where
        Self: Sized;

    /// Win check against the living set. Defaults to the faction rule.
    fn check_for_win(&self, me: &Actor, living: &[&Actor]) -> bool {
        self.kind().alignment().wins(me, living)
    }

    /// Counters persisted through the player's `roleActions`.
    fn role_actions(&self) -> Map<String, Value> {
        Map::new()
    }
}

/// A role together with its play-state.
#[derive(Clone, Debug, PartialEq)]
pub enum Role {
    Citizen(Citizen),
    Doctor(Doctor),
    Bodyguard(Bodyguard),
    Godfather(Godfather),
    Mafioso(Mafioso),
}

impl Role {
    /// Build the role for a player from the config's settings.
    pub fn build(kind: RoleKind, player: &Player, config: &GameConfig) -> Result<Self> {
        Ok(match kind {
            RoleKind::Citizen => Role::Citizen(Citizen::new(player, config.role_settings(kind)?)),
            RoleKind::Doctor => Role::Doctor(Doctor),
            RoleKind::Bodyguard => Role::Bodyguard(Bodyguard::default()),
            RoleKind::Godfather => Role::Godfather(Godfather::new(config.role_settings(kind)?)),
            RoleKind::Mafioso => Role::Mafioso(Mafioso),
        })
    }

    /// The behavior behind this role.
    #[must_use]
    pub fn behavior(&self) -> &dyn RoleBehavior {
        match self {
            Role::Citizen(r) => r,
            Role::Doctor(r) => r,
            Role::Bodyguard(r) => r,
            Role::Godfather(r) => r,
            Role::Mafioso(r) => r,
        }
    }

    #[must_use]
    pub fn kind(&self) -> RoleKind {
        self.behavior().kind()
    }
}

/// Run the night action of `me`, dispatching on its role.
pub fn act(night: &mut Night<'_>, me: ActorId) {
    match night.actor(me).kind() {
        RoleKind::Citizen => Citizen::act(night, me),
        RoleKind::Doctor => Doctor::act(night, me),
        RoleKind::Bodyguard => Bodyguard::act(night, me),
        RoleKind::Godfather => Godfather::act(night, me),
        RoleKind::Mafioso => Mafioso::act(night, me),
    }
}

/// A single slot of every other living actor, shared by roles that may
/// target anyone but themselves.
pub(crate) fn anyone_else(me: &Actor, actors: &[Actor]) -> Vec<Vec<ActorId>> {
    vec![actors
        .iter()
        .filter(|a| a.alive && a.id != me.id)
        .map(|a| a.id)
        .collect()]
}

/// A single slot of every living actor outside `me`'s faction.
pub(crate) fn outsiders(me: &Actor, actors: &[Actor]) -> Vec<Vec<ActorId>> {
    vec![actors
        .iter()
        .filter(|a| a.alive && a.id != me.id && a.alignment() != me.alignment())
        .map(|a| a.id)
        .collect()]
}
