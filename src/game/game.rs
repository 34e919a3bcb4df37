//! The day lifecycle.
//!
//! A [`Game`] is rebuilt on every engine call, either from a fresh roster
//! ([`Game::new`]) or from role-tagged players plus a prior state
//! ([`Game::load`]). It then resolves one night, lynches one player or just
//! reports, and is dropped.

use log::{error, info, warn};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use super::engine::WinnerSummary;
use crate::core::{
    EngineError, GameConfig, GameRng, GameState, GraveyardRecord, Player, PlayerNumber, Result,
    StatePlayer, MAX_PLAYERS, MAX_TARGET_SLOTS,
};
use crate::draft::draft_roles;
use crate::events::EventGroup;
use crate::roles::{self, Actor, ActorId, ActorView, Night, FALLBACK_ROLE};

const ROOT_GROUP: &str = "root";
const ACTION_GROUP: &str = "action";

/// One game, alive for the duration of one engine call.
pub struct Game {
    day: u32,
    config: GameConfig,
    /// Arena; an actor's index is its [`ActorId`].
    actors: Vec<Actor>,
    graveyard: Vec<GraveyardRecord>,
    /// Root narration group for the night just resolved.
    events: EventGroup,
    rng: GameRng,
    lookup: FxHashMap<PlayerNumber, ActorId>,
}

impl Game {
    /// Start a new game: draft roles, shuffle, and number the roster.
    pub fn new(players: Vec<Player>, config: GameConfig, mut rng: GameRng) -> Result<Self> {
        info!("--- Creating a new Game ---");
        check_player_count(players.len())?;
        for player in &players {
            player.validate()?;
        }
        config.validate()?;

        let draft = draft_roles(&config, &mut rng)?;
        let mut roles = draft.roles();
        let mut players = players;
        rng.shuffle(&mut players);
        rng.shuffle(&mut roles);
        if players.len() > roles.len() {
            roles.resize(players.len(), FALLBACK_ROLE);
        }

        info!("--- Allocating roles ---");
        for ((player, number), role) in players
            .iter_mut()
            .zip(PlayerNumber::sequence(MAX_PLAYERS))
            .zip(&roles)
        {
            player.number = Some(number);
            player.role = Some(role.to_string());
            info!("  |-> {:<38} {}", format!("{} ({}):", player.alias, player.name), role);
        }

        Self::build(1, players, config, Vec::new(), rng)
    }

    /// Rebuild a game from role-tagged players and a prior state.
    ///
    /// Each player's `alive` flag decides liveness. An order naming a number
    /// that matches no current actor is dropped.
    pub fn load(
        players: Vec<Player>,
        config: GameConfig,
        state: GameState,
        rng: GameRng,
    ) -> Result<Self> {
        info!("--- Loading Game ---");
        check_player_count(players.len())?;
        config.validate()?;

        for player in &players {
            info!(
                "  |-> {:<38} {} {}",
                format!("{} ({}):", player.alias, player.name),
                player.role.as_deref().unwrap_or("Unknown"),
                if player.alive { "" } else { "(DEAD)" }
            );
        }

        let GameState {
            day,
            players: standing,
            graveyard,
        } = state;
        let mut game = Self::build(day, players, config, graveyard, rng)?;
        for actor in &game.actors {
            if let Some(standing) = standing.iter().find(|p| p.number == actor.number) {
                if standing.alive != actor.alive {
                    warn!(
                        "{} is {} in the player list but {} in the state",
                        actor,
                        alive_label(actor.alive),
                        alive_label(standing.alive)
                    );
                }
            }
        }
        game.apply_targets_from_players();
        Ok(game)
    }

    fn build(
        day: u32,
        players: Vec<Player>,
        config: GameConfig,
        graveyard: Vec<GraveyardRecord>,
        rng: GameRng,
    ) -> Result<Self> {
        info!("Instantiating actors");
        let mut seen = FxHashSet::default();
        let mut actors = Vec::with_capacity(players.len());
        for (index, player) in players.into_iter().enumerate() {
            let actor = Actor::new(ActorId(index), player, &config)?;
            if !seen.insert(actor.number) {
                return Err(EngineError::DuplicateNumber(actor.number.raw()));
            }
            actors.push(actor);
        }

        let lookup: FxHashMap<_, _> = actors.iter().map(|a| (a.number, a.id)).collect();
        let mut game = Self {
            day,
            config,
            actors,
            graveyard,
            events: EventGroup::new(ROOT_GROUP),
            rng,
            lookup,
        };
        game.refresh();
        Ok(game)
    }

    /// Resolve stored target numbers slot by slot. A number that matches no
    /// current actor leaves the order without a target for that slot, which
    /// voids the whole order.
    fn apply_targets_from_players(&mut self) {
        for index in 0..self.actors.len() {
            let resolved: Option<SmallVec<[ActorId; MAX_TARGET_SLOTS]>> = self.actors[index]
                .player
                .targets
                .iter()
                .map(|number| self.lookup.get(number).copied())
                .collect();

            let targets = resolved.unwrap_or_else(|| {
                warn!(
                    "{} targets unknown players ({:?}), clearing the order",
                    self.actors[index],
                    self.actors[index].player.targets
                );
                SmallVec::new()
            });
            self.actors[index].targets = targets;
        }
    }

    /// Recompute allies and possible targets from the current living set.
    /// The dead get neither.
    pub fn refresh(&mut self) {
        for index in 0..self.actors.len() {
            let actor = &self.actors[index];
            let (allies, possible_targets) = if actor.alive {
                (
                    actor.find_allies(&self.actors),
                    actor.find_possible_targets(&self.actors),
                )
            } else {
                (Vec::new(), Vec::new())
            };
            let actor = &mut self.actors[index];
            actor.allies = allies;
            actor.possible_targets = possible_targets;
        }
    }

    /// Actor ids in turn order: by role, then by number.
    fn turn_order(&self) -> Vec<ActorId> {
        let mut order: Vec<ActorId> = self.actors.iter().map(|a| a.id).collect();
        order.sort_by_key(|id| {
            let actor = &self.actors[id.index()];
            (actor.kind(), actor.number)
        });
        order
    }

    fn target_numbers(&self, actor: &Actor) -> Vec<u8> {
        actor
            .targets
            .iter()
            .map(|id| self.actors[id.index()].number.raw())
            .collect()
    }

    /// Resolve one night.
    ///
    /// Stale selections are cleared first, then every living actor with a
    /// target acts in turn order. An actor killed earlier in the pass does
    /// not act. Pools are recomputed once more at the end so the dump shows
    /// the coming day's choices.
    pub fn resolve(&mut self) {
        info!("--- Resolving all player actions ---");
        self.day += 1;
        self.events.reset(Some(ROOT_GROUP));
        for actor in &mut self.actors {
            actor.reset_night();
        }
        self.refresh();
        let order = self.turn_order();

        for &id in &order {
            let actor = &self.actors[id.index()];
            if actor.targets.is_empty() || actor.targets_are_valid() {
                continue;
            }
            error!("{} invalid targets ({:?})", actor, self.target_numbers(actor));
            info!("Clearing targets");
            self.actors[id.index()].targets.clear();
        }

        let mut scratch = EventGroup::new(ACTION_GROUP);
        for id in order {
            let actor = &self.actors[id.index()];
            if !actor.alive || actor.targets.is_empty() {
                continue;
            }
            info!("{} is targetting {:?}", actor, self.target_numbers(actor));

            scratch.reset(Some(&actor.kind().action_group_id()));
            let mut night = Night::new(
                self.day,
                &mut self.actors,
                &mut self.graveyard,
                &mut scratch,
                &mut self.rng,
            );
            roles::act(&mut night, id);

            if !scratch.is_empty() {
                self.events.push_group(scratch.clone());
            }
        }

        // Pools for the coming day
        self.refresh();
    }

    /// Lynch the player with `number`. Always a true death.
    pub fn lynch(&mut self, number: PlayerNumber) -> Result<()> {
        let id = self
            .lookup
            .get(&number)
            .copied()
            .ok_or(EngineError::ActorNotFound(number.raw()))?;
        if !self.actors[id.index()].alive {
            return Err(EngineError::ActorDead(number.raw()));
        }

        info!("--- Lynching {} ---", self.actors[id.index()]);
        let mut scratch = EventGroup::new(ACTION_GROUP);
        let mut night = Night::new(
            self.day,
            &mut self.actors,
            &mut self.graveyard,
            &mut scratch,
            &mut self.rng,
        );
        night.lynch(id);
        self.refresh();
        Ok(())
    }

    /// Ids of every living actor whose win condition holds. Empty while the
    /// game continues.
    #[must_use]
    pub fn check_for_win(&self) -> Vec<ActorId> {
        info!("--- Checking for win conditions ---");
        let living: Vec<&Actor> = self.actors.iter().filter(|a| a.alive).collect();
        let winners: Vec<ActorId> = living
            .iter()
            .filter(|actor| actor.check_for_win(&living))
            .map(|actor| actor.id)
            .collect();

        if winners.is_empty() {
            info!("No winners found");
        } else {
            let aliases: Vec<&str> = winners.iter().map(|id| self.actors[id.index()].alias()).collect();
            info!("Winners: {}", aliases.join(", "));
        }
        winners
    }

    /// Win check projected for the orchestrator.
    #[must_use]
    pub fn winners(&self) -> Vec<WinnerSummary> {
        self.check_for_win()
            .into_iter()
            .map(|id| WinnerSummary::from(&self.actors[id.index()]))
            .collect()
    }

    /// Persisted snapshot of the game.
    #[must_use]
    pub fn state(&self) -> GameState {
        GameState {
            day: self.day,
            players: self
                .actors
                .iter()
                .map(|actor| StatePlayer {
                    number: actor.number,
                    alias: actor.alias().to_string(),
                    alive: actor.alive,
                })
                .collect(),
            graveyard: self.graveyard.clone(),
        }
    }

    /// Per-player views for the actor dump.
    #[must_use]
    pub fn dump_actors(&self) -> Vec<ActorView> {
        self.actors.iter().map(|actor| actor.view(&self.actors)).collect()
    }

    /// Narration of the night just resolved.
    #[must_use]
    pub fn events(&self) -> &EventGroup {
        &self.events
    }

    #[must_use]
    pub fn day(&self) -> u32 {
        self.day
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    #[must_use]
    pub fn graveyard(&self) -> &[GraveyardRecord] {
        &self.graveyard
    }

    #[must_use]
    pub fn actor(&self, id: ActorId) -> &Actor {
        &self.actors[id.index()]
    }

    #[must_use]
    pub fn actor_by_number(&self, number: PlayerNumber) -> Option<&Actor> {
        self.lookup.get(&number).map(|id| &self.actors[id.index()])
    }
}

fn check_player_count(count: usize) -> Result<()> {
    if (1..=MAX_PLAYERS).contains(&count) {
        Ok(())
    } else {
        Err(EngineError::PlayerCount { count })
    }
}

fn alive_label(alive: bool) -> &'static str {
    if alive {
        "alive"
    } else {
        "dead"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::RoleKind;

    fn roster(count: usize) -> Vec<Player> {
        (1..=count)
            .map(|i| Player::new(format!("u{i}"), format!("Name{i}"), format!("Alias{i}")))
            .collect()
    }

    #[test]
    fn test_new_assigns_numbers_and_roles() {
        let game = Game::new(roster(7), GameConfig::standard(7), GameRng::new(11)).unwrap();

        assert_eq!(game.day(), 1);
        let numbers: Vec<u8> = game.actors().iter().map(|a| a.number.raw()).collect();
        assert_eq!(numbers, (1..=7).collect::<Vec<_>>());
        assert!(game.actors().iter().all(|a| a.alive));
        assert!(game.actors().iter().all(|a| !a.possible_targets.is_empty()));
    }

    #[test]
    fn test_new_pads_with_fallback() {
        let config = GameConfig::standard(2);
        let game = Game::new(roster(4), config, GameRng::new(2)).unwrap();
        let fallbacks = game.actors().iter().filter(|a| a.kind() == FALLBACK_ROLE).count();
        assert!(fallbacks >= 2);
    }

    #[test]
    fn test_player_count_bounds() {
        let config = GameConfig::standard(15);
        assert!(matches!(
            Game::new(Vec::new(), config.clone(), GameRng::new(0)),
            Err(EngineError::PlayerCount { count: 0 })
        ));
        assert!(matches!(
            Game::new(roster(16), config, GameRng::new(0)),
            Err(EngineError::PlayerCount { count: 16 })
        ));
    }

    #[test]
    fn test_load_rejects_duplicate_numbers() {
        let players = vec![
            Player::new("u1", "n", "a").with_role("Citizen").with_number(1),
            Player::new("u2", "n", "b").with_role("Doctor").with_number(1),
        ];
        let result = Game::load(players, GameConfig::standard(2), GameState::default(), GameRng::new(0));
        assert!(matches!(result, Err(EngineError::DuplicateNumber(1))));
    }

    #[test]
    fn test_load_drops_unknown_target_numbers() {
        let players = vec![
            Player::new("u1", "n", "a").with_role("Mafioso").with_number(1).with_targets(&[9]),
            Player::new("u2", "n", "b").with_role("Citizen").with_number(2),
        ];
        let game = Game::load(players, GameConfig::standard(2), GameState::default(), GameRng::new(0)).unwrap();
        assert!(game.actors()[0].targets.is_empty());
    }

    #[test]
    fn test_load_unknown_number_voids_whole_order() {
        let players = vec![
            Player::new("u1", "n", "a").with_role("Mafioso").with_number(1).with_targets(&[9, 3]),
            Player::new("u2", "n", "b").with_role("Citizen").with_number(2),
            Player::new("u3", "n", "c").with_role("Citizen").with_number(3),
        ];
        let mut game = Game::load(players, GameConfig::standard(3), GameState::default(), GameRng::new(0)).unwrap();
        assert!(game.actors()[0].targets.is_empty());

        game.resolve();
        assert!(game.actors().iter().all(|a| a.alive));
        assert!(game.graveyard().is_empty());
    }

    #[test]
    fn test_load_keeps_state_graveyard_and_day() {
        let players = vec![
            Player::new("u1", "n", "a").with_role("Mafioso").with_number(1),
            Player::new("u2", "n", "b").with_role("Citizen").with_number(2).dead(),
            Player::new("u3", "n", "c").with_role("Citizen").with_number(3),
        ];
        let record = GraveyardRecord {
            number: PlayerNumber(2),
            alias: "b".into(),
            cod: "They were lynched".into(),
            dod: 2,
            role: "Citizen".into(),
            will: String::new(),
        };
        let state = GameState {
            day: 3,
            // Disagrees with the player list: the player list wins
            players: vec![StatePlayer {
                number: PlayerNumber(2),
                alias: "b".into(),
                alive: true,
            }],
            graveyard: vec![record.clone()],
        };

        let game = Game::load(players, GameConfig::standard(3), state, GameRng::new(0)).unwrap();
        assert_eq!(game.day(), 3);
        assert_eq!(game.graveyard(), &[record]);
        assert!(!game.actor_by_number(PlayerNumber(2)).unwrap().alive);
    }

    #[test]
    fn test_turn_order_by_role_then_number() {
        let players = vec![
            Player::new("u1", "n", "a").with_role("Mafioso").with_number(1),
            Player::new("u2", "n", "b").with_role("Citizen").with_number(2),
            Player::new("u3", "n", "c").with_role("Doctor").with_number(3),
            Player::new("u4", "n", "d").with_role("Citizen").with_number(4),
        ];
        let game = Game::load(players, GameConfig::standard(4), GameState::default(), GameRng::new(0)).unwrap();
        let kinds: Vec<(RoleKind, u8)> = game
            .turn_order()
            .iter()
            .map(|id| (game.actor(*id).kind(), game.actor(*id).number.raw()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (RoleKind::Citizen, 2),
                (RoleKind::Citizen, 4),
                (RoleKind::Doctor, 3),
                (RoleKind::Mafioso, 1),
            ]
        );
    }

    #[test]
    fn test_refresh_clears_dead_pools() {
        let players = vec![
            Player::new("u1", "n", "a").with_role("Mafioso").with_number(1).dead(),
            Player::new("u2", "n", "b").with_role("Doctor").with_number(2),
            Player::new("u3", "n", "c").with_role("Citizen").with_number(3),
        ];
        let game = Game::load(players, GameConfig::standard(3), GameState::default(), GameRng::new(0)).unwrap();
        assert!(game.actors()[0].possible_targets.is_empty());
        // The dead are not healable
        assert_eq!(game.actors()[1].possible_targets, vec![vec![ActorId(2)]]);
    }
}
