//! The Bodyguard: steps in front of the first attack on its charge.
//!
//! An intercepted attack becomes a shootout. The bodyguard and the attacker
//! both die for good, and the guarded player is told only that they were
//! protected.

use log::info;

use super::{anyone_else, Actor, ActorId, Night, Role, RoleBehavior, RoleKind};
use crate::events::{duration, EventGroup, GameEvent};

const SHOOTOUT_DEATH: &str = "Died in a shootout";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bodyguard {
    /// Who this bodyguard is protecting tonight.
    pub guarding: Option<ActorId>,
}

impl RoleBehavior for Bodyguard {
    fn kind(&self) -> RoleKind {
        RoleKind::Bodyguard
    }

    fn possible_targets(&self, me: &Actor, actors: &[Actor]) -> Vec<Vec<ActorId>> {
        anyone_else(me, actors)
    }

    fn act(night: &mut Night<'_>, me: ActorId)
    where
        Self: Sized,
    {
        let Some(&target) = night.actor(me).targets.first() else {
            return;
        };
        night.visit(me, target);
        night.actor_mut(target).bodyguards.push_back(me);
        if let Role::Bodyguard(bodyguard) = &mut night.actor_mut(me).role {
            bodyguard.guarding = Some(target);
        }
        info!("{} is guarding {}", night.actor(me), night.actor(target));
    }
}

/// Resolve an attack by `attacker` intercepted by `bodyguard`.
pub(crate) fn shootout(night: &mut Night<'_>, bodyguard: ActorId, attacker: ActorId) {
    let guarded = match &night.actor(bodyguard).role {
        Role::Bodyguard(b) => b.guarding,
        _ => None,
    };
    info!(
        "{} intercepted {} in a shootout",
        night.actor(bodyguard),
        night.actor(attacker)
    );

    let mut group = EventGroup::new("shootout")
        .with_duration(duration::SHOOTOUT)
        .with_event(GameEvent::broadcast(
            "bodyguard_shootout",
            "You hear sounds of a shootout",
        ));
    if let Some(target) = guarded {
        group.push_event(GameEvent::to_player(
            "bodyguard_protected",
            night.actor(target).external_id(),
            "You were protected by a bodyguard",
        ));
    }
    group.push_event(GameEvent::to_player(
        "bodyguard_protected",
        night.actor(attacker).external_id(),
        "You were killed by the Bodyguard defending your target",
    ));
    group.push_event(GameEvent::to_player(
        "bodyguard_protected",
        night.actor(bodyguard).external_id(),
        "You died defending your target",
    ));
    night.events().push_group(group);

    night.die(bodyguard, SHOOTOUT_DEATH, true);
    night.die(attacker, SHOOTOUT_DEATH, true);
}
