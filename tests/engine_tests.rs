//! Engine facade integration tests.
//!
//! These tests drive the plain-data entry points the way an orchestrator
//! does: create a game, persist the dumps, feed them back into the next call.

use mafia_engine::core::{EngineError, GameConfig, Player, PlayerNumber};
use mafia_engine::events::EventEntry;
use mafia_engine::game::{
    load_game, lynch_game, new_game, next_input, resolve_game, EngineInput, EngineOptions,
    EngineResult,
};
use mafia_engine::roles::{Alignment, RoleKind};

fn roster(count: usize) -> Vec<Player> {
    (1..=count)
        .map(|i| Player::new(format!("u{i}"), format!("Name{i}"), format!("Alias{i}")))
        .collect()
}

fn seeded(seed: u64) -> EngineOptions {
    EngineOptions { seed: Some(seed) }
}

fn fresh(count: usize, seed: u64) -> EngineResult {
    new_game(EngineInput {
        players: roster(count),
        config: GameConfig::standard(count),
        state: None,
        options: seeded(seed),
    })
    .unwrap()
}

fn alive_set(result: &EngineResult) -> Vec<(PlayerNumber, bool)> {
    result.state.players.iter().map(|p| (p.number, p.alive)).collect()
}

/// A new game numbers everyone and starts on day one with no narration.
#[test]
fn test_new_game() {
    let result = fresh(9, 5);

    assert_eq!(result.state.day, 1);
    assert_eq!(result.actors.len(), 9);
    assert!(result.state.graveyard.is_empty());
    assert!(result.events.is_empty());
    assert!(result.winners.is_none());
    assert!(result.actors.iter().all(|a| a.targets.is_empty()));

    let mut numbers: Vec<u8> = result.actors.iter().map(|a| a.number.raw()).collect();
    numbers.sort_unstable();
    assert_eq!(numbers, (1..=9).collect::<Vec<_>>());
}

/// The same seed produces the same game.
#[test]
fn test_new_game_reproducible() {
    let a = fresh(12, 99);
    let b = fresh(12, 99);
    assert_eq!(a.actors, b.actors);
}

/// Loading a fresh dump reproduces the alive set and the day.
#[test]
fn test_round_trip() {
    let config = GameConfig::standard(8);
    let created = fresh(8, 3);
    let expected = alive_set(&created);
    let day = created.state.day;

    let loaded = load_game(next_input(created, config, seeded(4))).unwrap();
    assert_eq!(alive_set(&loaded), expected);
    assert_eq!(loaded.state.day, day);
}

/// Two win checks without a resolve or lynch in between agree.
#[test]
fn test_win_check_idempotent() {
    let config = GameConfig::standard(6);
    let created = fresh(6, 21);

    let first = load_game(next_input(created.clone(), config.clone(), seeded(0))).unwrap();
    let second = load_game(next_input(created, config, seeded(1))).unwrap();
    assert_eq!(first.winners, second.winners);
}

/// Only `new_game` works without a prior state.
#[test]
fn test_missing_state() {
    let input = EngineInput {
        players: roster(3),
        config: GameConfig::standard(3),
        state: None,
        options: EngineOptions::default(),
    };
    assert!(matches!(resolve_game(input), Err(EngineError::MissingState)));
}

/// Resolving advances the day and carries out the Mafia's order.
#[test]
fn test_resolve_across_calls() {
    let config = GameConfig::standard(9);
    let created = fresh(9, 17);

    // Point the Mafia killer at a Citizen
    let mut input = next_input(created, config, seeded(2));
    let victim = input
        .players
        .iter()
        .find(|p| p.role.as_deref() == Some("Citizen"))
        .and_then(|p| p.number)
        .unwrap();
    for player in &mut input.players {
        let kind = player.role.as_deref().and_then(|r| r.parse::<RoleKind>().ok());
        if kind.is_some_and(RoleKind::is_mafia_killing) {
            player.targets = vec![victim];
        }
    }

    let result = resolve_game(input).unwrap();
    assert_eq!(result.state.day, 2);
    assert_eq!(result.state.graveyard.len(), 1);
    assert_eq!(result.state.graveyard[0].number, victim);
    assert!(!result.state.players.iter().find(|p| p.number == victim).unwrap().alive);

    let children: u32 = result
        .events
        .events
        .iter()
        .map(|entry| match entry {
            EventEntry::Group(group) => group.duration,
            EventEntry::Event(_) => 0,
        })
        .sum();
    assert_eq!(result.events.group_id.as_deref(), Some("root"));
    assert_eq!(result.events.duration, children);
    assert_eq!(children, 3);
}

/// A lynch always kills, lands in the graveyard and can end the game.
#[test]
fn test_lynch_game() {
    let players = vec![
        Player::new("u1", "Ann", "Alpha").with_role("Godfather").with_number(1),
        Player::new("u2", "Bob", "Bravo").with_role("Citizen").with_number(2),
        Player::new("u3", "Cat", "Charlie").with_role("Doctor").with_number(3),
    ];
    let config = GameConfig::standard(3);
    let state = load_game(EngineInput {
        players: players.clone(),
        config: config.clone(),
        state: Some(Default::default()),
        options: seeded(0),
    })
    .unwrap()
    .state;

    let input = EngineInput {
        players,
        config,
        state: Some(state),
        options: seeded(0),
    };
    assert!(matches!(
        lynch_game(input.clone(), 7),
        Err(EngineError::ActorNotFound(7))
    ));

    let result = lynch_game(input, 1).unwrap();
    assert!(result.events.is_empty());
    assert_eq!(result.state.graveyard.len(), 1);
    assert_eq!(result.state.graveyard[0].cod, "They were lynched");
    assert_eq!(result.state.graveyard[0].role, "Godfather");

    let winners = result.winners.unwrap();
    assert_eq!(winners.len(), 2);
    assert!(winners.iter().all(|w| w.alignment == Alignment::Town));
}

/// Lynching the dead is refused.
#[test]
fn test_lynch_dead() {
    let players = vec![
        Player::new("u1", "Ann", "Alpha").with_role("Mafioso").with_number(1),
        Player::new("u2", "Bob", "Bravo").with_role("Citizen").with_number(2).dead(),
        Player::new("u3", "Cat", "Charlie").with_role("Citizen").with_number(3),
    ];
    let input = EngineInput {
        players,
        config: GameConfig::standard(3),
        state: Some(Default::default()),
        options: seeded(0),
    };
    assert!(matches!(lynch_game(input, 2), Err(EngineError::ActorDead(2))));
}

/// Unknown roles fail at construction.
#[test]
fn test_unknown_role() {
    let players = vec![Player::new("u1", "Ann", "Alpha").with_role("Jester").with_number(1)];
    let input = EngineInput {
        players,
        config: GameConfig::standard(1),
        state: Some(Default::default()),
        options: seeded(0),
    };
    let err = load_game(input).unwrap_err();
    assert!(matches!(err, EngineError::UnknownRole(ref name) if name == "Jester"));
    assert!(err.is_validation());
}

/// The wire shape an orchestrator sends and receives.
#[test]
fn test_wire_json() {
    let input: EngineInput = serde_json::from_value(serde_json::json!({
        "players": [
            { "id": "u1", "name": "Ann", "alias": "Alpha", "role": "Mafioso", "number": 1, "targets": [2] },
            { "id": "u2", "name": "Bob", "alias": "Bravo", "role": "Citizen", "number": 2,
              "roleActions": { "remainingVests": 0 }, "will": "It was Alpha" },
            { "id": "u3", "name": "Cat", "alias": "Charlie", "role": "Citizen", "number": 3 }
        ],
        "config": {
            "tags": ["mafia_killing", "town_random", "town_random"],
            "roles": {
                "Citizen": { "max": 15, "weight": 1, "settings": { "maxVests": 2 } },
                "Mafioso": { "max": 3, "weight": 1 }
            }
        },
        "state": { "day": 1, "players": [], "graveyard": [] },
        "options": { "seed": 7 }
    }))
    .unwrap();

    let result = resolve_game(input).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["state"]["day"], 2);
    assert_eq!(json["state"]["graveyard"][0]["number"], 2);
    assert_eq!(json["state"]["graveyard"][0]["will"], "It was Alpha");
    assert_eq!(json["state"]["graveyard"][0]["dod"], 2);
    assert_eq!(json["events"]["groupId"], "root");
    assert_eq!(json["events"]["duration"], 3);
    assert_eq!(json["events"]["events"][0]["groupId"], "mafioso_action");

    let success = &json["events"]["events"][0]["events"][0];
    assert_eq!(success["groupId"], "mafioso_action_success");
    assert_eq!(success["events"][0]["eventId"], "mafia_kill_success");
    assert_eq!(success["events"][0]["targets"], serde_json::json!(["*"]));
    assert_eq!(success["events"][1]["eventId"], "killed_by_mafia");
    assert_eq!(success["events"][1]["targets"], serde_json::json!(["u2"]));

    // No transcript rides along with the result
    assert!(json.get("log").is_none());
    assert_eq!(json.as_object().unwrap().len(), 4);

    // Dumps carry pools and counters but never the pending selection
    let dumped = &json["actors"][0];
    assert_eq!(dumped["possibleTargets"], serde_json::json!([[3]]));
    assert_eq!(dumped["targets"], serde_json::json!([]));
    assert_eq!(json["actors"][1]["roleActions"]["remainingVests"], 0);

    // One Mafioso and one Citizen left: the Citizen takes the final two
    let winners = json["winners"].as_array().unwrap();
    assert_eq!(winners.len(), 1);
    assert_eq!(winners[0]["role"], "Citizen");
    assert_eq!(winners[0]["alignment"], "Town");
}
