//! The Godfather: orders the hit and lets a Mafioso carry it out.
//!
//! With a living Mafioso ally the Godfather hands its target to one of them,
//! chosen at random, and every ally is told who was picked. Without one it
//! kills personally.

use log::info;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::mafioso::{clear_sibling_targets, mafia_kill};
use super::{outsiders, Actor, ActorId, Night, RoleBehavior, RoleKind};
use crate::events::{EventGroup, EventTargets, GameEvent};

fn default_night_immune() -> u32 {
    2
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GodfatherSettings {
    /// Any positive value makes the Godfather night-immune.
    #[serde(default = "default_night_immune")]
    pub night_immune: u32,
}

impl Default for GodfatherSettings {
    fn default() -> Self {
        Self {
            night_immune: default_night_immune(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Godfather {
    pub night_immune: bool,
}

impl Godfather {
    pub fn new(settings: GodfatherSettings) -> Self {
        Self {
            night_immune: settings.night_immune > 0,
        }
    }
}

impl RoleBehavior for Godfather {
    fn kind(&self) -> RoleKind {
        RoleKind::Godfather
    }

    fn possible_targets(&self, me: &Actor, actors: &[Actor]) -> Vec<Vec<ActorId>> {
        outsiders(me, actors)
    }

    fn act(night: &mut Night<'_>, me: ActorId)
    where
        Self: Sized,
    {
        let Some(&target) = night.actor(me).targets.first() else {
            return;
        };

        let proxies: Vec<ActorId> = night
            .actor(me)
            .allies
            .iter()
            .copied()
            .filter(|ally| {
                let ally = night.actor(*ally);
                ally.alive && ally.kind() == RoleKind::Mafioso
            })
            .collect();

        let Some(&proxy) = night.rng().choose(&proxies) else {
            mafia_kill(night, me, target, "godfather", "godfather");
            return;
        };

        clear_sibling_targets(night, me);
        night.actor_mut(proxy).targets = SmallVec::from_slice(&[target]);
        info!("{} has chosen {} to act as a proxy", night.actor(me), night.actor(proxy));

        let allies = night
            .actor(me)
            .allies
            .iter()
            .map(|ally| night.actor(*ally).external_id().to_string())
            .collect();
        let group = EventGroup::new("godfather_proxy").with_event(GameEvent::new(
            "godfather_proxy_choice",
            EventTargets::Players(allies),
            format!(
                "The Godfather has chosen {} to carry out the hit",
                night.actor(proxy).alias()
            ),
        ));
        night.events().push_group(group);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_night_immune_setting() {
        assert!(Godfather::new(GodfatherSettings::default()).night_immune);
        assert!(!Godfather::new(GodfatherSettings { night_immune: 0 }).night_immune);

        let settings: GodfatherSettings =
            serde_json::from_value(serde_json::json!({ "nightImmune": 0 })).unwrap();
        assert_eq!(settings.night_immune, 0);
    }
}
