//! The Citizen: spends a limited supply of bulletproof vests on itself.

use log::{error, info};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Actor, ActorId, Night, Role, RoleBehavior, RoleKind};
use crate::core::Player;

/// Key under which the remaining vest count persists in `roleActions`.
pub const REMAINING_VESTS: &str = "remainingVests";

fn default_max_vests() -> u32 {
    2
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitizenSettings {
    #[serde(default = "default_max_vests")]
    pub max_vests: u32,
}

impl Default for CitizenSettings {
    fn default() -> Self {
        Self {
            max_vests: default_max_vests(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Citizen {
    pub remaining_vests: u32,
}

impl Citizen {
    /// Restore the vest count persisted on the player, or start full.
    pub fn new(player: &Player, settings: CitizenSettings) -> Self {
        let remaining_vests = player
            .role_actions
            .get(REMAINING_VESTS)
            .and_then(Value::as_u64)
            .map_or(settings.max_vests, |n| u32::try_from(n).unwrap_or(u32::MAX));
        Self { remaining_vests }
    }
}

impl RoleBehavior for Citizen {
    fn kind(&self) -> RoleKind {
        RoleKind::Citizen
    }

    fn possible_targets(&self, me: &Actor, _actors: &[Actor]) -> Vec<Vec<ActorId>> {
        if self.remaining_vests > 0 {
            vec![vec![me.id]]
        } else {
            Vec::new()
        }
    }

    fn act(night: &mut Night<'_>, me: ActorId)
    where
        Self: Sized,
    {
        let Some(&target) = night.actor(me).targets.first() else {
            return;
        };

        let actor = night.actor_mut(me);
        let Role::Citizen(citizen) = &mut actor.role else {
            return;
        };
        if citizen.remaining_vests == 0 {
            error!("{} tried to use a vest with none left", actor);
            return;
        }
        citizen.remaining_vests -= 1;
        let remaining = citizen.remaining_vests;
        info!("{} put on a vest, {} left", actor, remaining);

        night.actor_mut(target).night_immune = true;
    }

    /// Besides the faction rule, a Citizen wins a final two it is part of.
    fn check_for_win(&self, me: &Actor, living: &[&Actor]) -> bool {
        self.kind().alignment().wins(me, living)
            || (living.len() == 2 && living.iter().any(|a| a.kind() == RoleKind::Citizen))
    }

    fn role_actions(&self) -> Map<String, Value> {
        let mut actions = Map::new();
        actions.insert(REMAINING_VESTS.to_string(), self.remaining_vests.into());
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings: CitizenSettings = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(settings.max_vests, 2);

        let settings: CitizenSettings =
            serde_json::from_value(serde_json::json!({ "maxVests": 5, "other": true })).unwrap();
        assert_eq!(settings.max_vests, 5);
    }

    #[test]
    fn test_new_restores_vests() {
        let fresh = Player::new("u", "n", "a");
        assert_eq!(Citizen::new(&fresh, CitizenSettings::default()).remaining_vests, 2);

        let used = Player::new("u", "n", "a").with_role_action(REMAINING_VESTS, 0);
        assert_eq!(Citizen::new(&used, CitizenSettings::default()).remaining_vests, 0);
    }

    #[test]
    fn test_role_actions() {
        let citizen = Citizen { remaining_vests: 1 };
        assert_eq!(citizen.role_actions()[REMAINING_VESTS], 1);
    }
}
