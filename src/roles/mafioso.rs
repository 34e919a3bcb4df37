//! The Mafioso: the Mafia's rank-and-file killer.

use log::debug;

use super::{outsiders, Actor, ActorId, KillOutcome, Night, RoleBehavior, RoleKind};
use crate::events::{common, duration, EventGroup, GameEvent};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Mafioso;

impl RoleBehavior for Mafioso {
    fn kind(&self) -> RoleKind {
        RoleKind::Mafioso
    }

    fn possible_targets(&self, me: &Actor, actors: &[Actor]) -> Vec<Vec<ActorId>> {
        outsiders(me, actors)
    }

    /// One Mafia kill per night: firing clears the other Mafiosos' orders.
    fn act(night: &mut Night<'_>, me: ActorId)
    where
        Self: Sized,
    {
        let Some(&target) = night.actor(me).targets.first() else {
            return;
        };
        clear_sibling_targets(night, me);
        mafia_kill(night, me, target, "mafioso", "mafia");
    }
}

/// Clear the targets of every other Mafioso allied with `me`.
pub(crate) fn clear_sibling_targets(night: &mut Night<'_>, me: ActorId) {
    let allies = night.actor(me).allies.clone();
    for ally in allies {
        let actor = night.actor_mut(ally);
        if actor.kind() == RoleKind::Mafioso {
            actor.targets.clear();
        }
    }
}

/// Run a Mafia kill, narrating into `{group}_action_success` or
/// `{group}_action_fail` with the broadcast `{event}_kill_success` or
/// `{event}_kill_fail`.
pub(crate) fn mafia_kill(
    night: &mut Night<'_>,
    me: ActorId,
    target: ActorId,
    group: &str,
    event: &str,
) -> KillOutcome {
    let target_id = night.actor(target).external_id().to_string();

    let outcome = night.kill(
        me,
        target,
        |events| {
            let success = EventGroup::new(format!("{group}_action_success"))
                .with_duration(duration::MAFIA_KILL)
                .with_event(GameEvent::broadcast(
                    format!("{event}_kill_success"),
                    "There are sounds of shots in the streets",
                ))
                .with_event(GameEvent::to_player(
                    common::KILLED_BY_MAFIA,
                    target_id,
                    "You were killed by a member of the Mafia",
                ));
            events.push_group(success);
        },
        |events| {
            let fail = EventGroup::new(format!("{group}_action_fail"))
                .with_duration(duration::MAFIA_KILL)
                .with_event(GameEvent::broadcast(format!("{event}_kill_fail"), ""));
            events.push_group(fail);
        },
        false,
    );
    debug!("{} kill on {} ended as {:?}", night.actor(me), night.actor(target), outcome);
    outcome
}
