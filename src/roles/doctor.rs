//! The Doctor: heals one other player per night.

use log::info;

use super::{anyone_else, Actor, ActorId, Night, RoleBehavior, RoleKind};
use crate::events::{EventGroup, GameEvent};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Doctor;

impl RoleBehavior for Doctor {
    fn kind(&self) -> RoleKind {
        RoleKind::Doctor
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
        night.actor_mut(target).doctors.push_back(me);
        info!("{} is healing {}", night.actor(me), night.actor(target));
    }
}

/// Narrate a successful revive of `target` by `doctor`.
pub(crate) fn revive(night: &mut Night<'_>, doctor: ActorId, target: ActorId) {
    info!("{} revived {}", night.actor(doctor), night.actor(target));

    let group = EventGroup::new("doctor_revive")
        .with_event(GameEvent::to_player(
            "doctor_revive_success",
            night.actor(doctor).external_id(),
            "Your target was attacked last night, but you successfully revived them",
        ))
        .with_event(GameEvent::to_player(
            "revive_by_doctor",
            night.actor(target).external_id(),
            "You were revived by a doctor. Rock on",
        ));
    night.events().push_group(group);
}
