//! The night action context and the kill pipeline.
//!
//! A [`Night`] borrows everything one action may touch: the actor arena,
//! the graveyard, the scratch event group and the random stream. Actions
//! mutate other actors through it (queueing protectors, granting
//! immunity, killing), so every cross-actor side effect goes through here.

use std::collections::VecDeque;

use log::info;

use super::{bodyguard, doctor, Actor, ActorId};
use crate::core::{GameRng, GraveyardRecord};
use crate::events::{common, EventGroup, GameEvent};

/// How a kill attempt ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KillOutcome {
    /// A bodyguard stepped in; the bodyguard and the attacker died.
    Intercepted { bodyguard: ActorId },
    /// The target was night-immune.
    Immune,
    /// The target died and a doctor brought them back.
    Healed { doctor: ActorId },
    /// The target is dead.
    Killed,
}

/// Everything one night action may touch.
pub struct Night<'a> {
    day: u32,
    actors: &'a mut [Actor],
    graveyard: &'a mut Vec<GraveyardRecord>,
    events: &'a mut EventGroup,
    rng: &'a mut GameRng,
}

impl<'a> Night<'a> {
    pub fn new(
        day: u32,
        actors: &'a mut [Actor],
        graveyard: &'a mut Vec<GraveyardRecord>,
        events: &'a mut EventGroup,
        rng: &'a mut GameRng,
    ) -> Self {
        Self {
            day,
            actors,
            graveyard,
            events,
            rng,
        }
    }

    #[must_use]
    pub fn day(&self) -> u32 {
        self.day
    }

    #[must_use]
    pub fn actor(&self, id: ActorId) -> &Actor {
        &self.actors[id.index()]
    }

    pub fn actor_mut(&mut self, id: ActorId) -> &mut Actor {
        &mut self.actors[id.index()]
    }

    #[must_use]
    pub fn actors(&self) -> &[Actor] {
        &*self.actors
    }

    /// The group this action emits narration into.
    pub fn events(&mut self) -> &mut EventGroup {
        &mut *self.events
    }

    pub fn rng(&mut self) -> &mut GameRng {
        &mut *self.rng
    }

    /// Record that `visitor` spends the night at `target`'s house.
    pub fn visit(&mut self, visitor: ActorId, target: ActorId) {
        info!("{} is visiting {}'s house", self.actor(visitor), self.actor(target));
        self.actor_mut(visitor).visiting = Some(target);
        self.actor_mut(target).visitors.push(visitor);
    }

    /// Attempt to kill `target`.
    ///
    /// A queued bodyguard intercepts first and neither callback fires. A
    /// night-immune target survives and `on_fail` fires. Otherwise
    /// `on_success` fires and the target dies, unless a doctor revives them
    /// (never for a true death).
    pub fn kill(
        &mut self,
        attacker: ActorId,
        target: ActorId,
        on_success: impl FnOnce(&mut EventGroup),
        on_fail: impl FnOnce(&mut EventGroup),
        true_death: bool,
    ) -> KillOutcome {
        info!("{} is attempting to kill {}", self.actor(attacker), self.actor(target));
        self.visit(attacker, target);

        if let Some(guard) = self.actor_mut(target).bodyguards.pop_front() {
            bodyguard::shootout(self, guard, attacker);
            return KillOutcome::Intercepted { bodyguard: guard };
        }

        if self.actor(target).night_immune {
            info!(
                "{} failed to kill {} because they are night-immune",
                self.actor(attacker),
                self.actor(target)
            );
            on_fail(&mut *self.events);

            let survived = EventGroup::new(common::NIGHT_IMMUNE).with_event(GameEvent::to_player(
                common::NIGHT_IMMUNE,
                self.actor(target).external_id(),
                "You were attacked tonight but survived due to Night Immunity",
            ));
            self.events.push_group(survived);
            return KillOutcome::Immune;
        }

        on_success(&mut *self.events);
        let reason = self.actor(attacker).kill_reason();
        let healer = self.die(target, reason, true_death);
        match healer {
            Some(doctor) => KillOutcome::Healed { doctor },
            None => KillOutcome::Killed,
        }
    }

    /// Kill `victim` outright.
    ///
    /// Without `true_death` the earliest living queued doctor revives them
    /// and is returned. Final deaths are recorded in the graveyard with the
    /// current day.
    pub fn die(&mut self, victim: ActorId, reason: &str, true_death: bool) -> Option<ActorId> {
        if !self.actor(victim).alive {
            return None;
        }

        let living_doctors: VecDeque<ActorId> = self
            .actor(victim)
            .doctors
            .iter()
            .copied()
            .filter(|d| self.actor(*d).alive)
            .collect();
        let actor = &mut self.actors[victim.index()];
        actor.doctors = living_doctors;
        actor.alive = false;

        if !true_death {
            if let Some(healer) = actor.doctors.pop_front() {
                actor.alive = true;
                doctor::revive(self, healer, victim);
                return Some(healer);
            }
        }

        actor.cause_of_death = Some(reason.to_string());
        info!("{} died. Cause of death: {}", actor, reason);
        self.graveyard.push(GraveyardRecord {
            number: actor.number,
            alias: actor.alias().to_string(),
            cod: reason.to_string(),
            dod: self.day,
            role: actor.kind().to_string(),
            will: actor.player.will.clone().unwrap_or_default(),
        });
        None
    }

    /// Lynch `victim`: a true death outside the kill pipeline.
    pub fn lynch(&mut self, victim: ActorId) {
        self.die(victim, "They were lynched", true);
    }
}
