mod common;

use bisca_core::game::{
    GamePhase, GameSnapshot, MemoryStore, RestoreError, SnapshotStore, StoreError, TaskKind,
};
use bisca_core::model::player::PlayerId;
use bisca_core::model::rules::RuleVariant;
use common::new_game;

#[test]
fn every_mutation_is_persisted() {
    let store = MemoryStore::new();
    let mut game = new_game(RuleVariant::AbsoluteRank, 11).with_store(Box::new(store.clone()));
    game.start_game("Ada", 3).unwrap();
    let saved = GameSnapshot::from_json(&store.raw().unwrap()).unwrap();
    assert_eq!(saved, game.snapshot());

    game.submit_declaration(PlayerId(0), 2).unwrap();
    let saved = GameSnapshot::from_json(&store.raw().unwrap()).unwrap();
    assert_eq!(saved.players[0].declaration, Some(2));
    assert_eq!(saved.current_player, PlayerId(1));
}

#[test]
fn loading_a_snapshot_twice_gives_the_same_state() {
    let mut game = new_game(RuleVariant::TrumpFollowSuit, 2);
    game.start_game("Ada", 4).unwrap();
    game.submit_declaration(PlayerId(0), 1).unwrap();
    game.run_until_idle();
    let snapshot = game.snapshot();

    let mut other = new_game(RuleVariant::TrumpFollowSuit, 500);
    other.load(snapshot.clone()).unwrap();
    let once = other.state().clone();
    other.load(snapshot).unwrap();
    assert_eq!(other.state(), &once);
    assert_eq!(other.state(), game.state());
}

#[test]
fn saved_game_resumes_with_the_pending_bot() {
    let store = MemoryStore::new();
    let mut game = new_game(RuleVariant::AbsoluteRank, 8).with_store(Box::new(store.clone()));
    game.start_game("Ada", 3).unwrap();
    game.submit_declaration(PlayerId(0), 0).unwrap();
    drop(game);

    let mut resumed = new_game(RuleVariant::AbsoluteRank, 8).with_store(Box::new(store));
    assert!(resumed.resume_saved().unwrap());
    assert_eq!(resumed.state().phase(), GamePhase::Declaration);
    let pending: Vec<_> = resumed.scheduler().pending().map(|t| t.kind).collect();
    assert_eq!(pending, vec![TaskKind::BotDeclare(PlayerId(1))]);

    resumed.run_until_idle();
    assert_eq!(resumed.state().phase(), GamePhase::Playing);
}

#[test]
fn nothing_to_resume_without_a_saved_game() {
    let mut game = new_game(RuleVariant::AbsoluteRank, 8).with_store(Box::new(MemoryStore::new()));
    assert!(!game.resume_saved().unwrap());
    assert_eq!(game.state().phase(), GamePhase::Login);
}

#[test]
fn tasks_scheduled_before_a_restart_are_ignored() {
    let store = MemoryStore::new();
    let mut game = new_game(RuleVariant::AbsoluteRank, 4).with_store(Box::new(store.clone()));
    game.start_game("Ada", 3).unwrap();
    game.submit_declaration(PlayerId(0), 1).unwrap();
    let task = game.scheduler_mut().pop_next().unwrap();
    assert_eq!(task.kind, TaskKind::BotDeclare(PlayerId(1)));

    game.restart();
    assert!(!game.run_task(task));
    assert_eq!(game.state().phase(), GamePhase::Login);
    assert!(game.scheduler().is_empty());
    assert!(store.raw().is_none());
}

#[test]
fn tasks_scheduled_before_a_load_are_ignored() {
    let mut game = new_game(RuleVariant::AbsoluteRank, 4);
    game.start_game("Ada", 3).unwrap();
    let fresh = game.snapshot();
    game.submit_declaration(PlayerId(0), 1).unwrap();
    let task = game.scheduler_mut().pop_next().unwrap();

    game.load(fresh).unwrap();
    assert!(!game.run_task(task));
    assert_eq!(game.state().current_player(), PlayerId(0));
    assert_eq!(game.state().players()[1].declaration, None);
}

#[test]
fn scoring_snapshot_reschedules_the_next_round() {
    let mut game = new_game(RuleVariant::AbsoluteRank, 6);
    game.start_game("Ada", 2).unwrap();
    while game.state().phase() != GamePhase::Scoring {
        match game.state().phase() {
            GamePhase::Declaration if game.state().is_human_turn() => {
                game.submit_declaration(PlayerId(0), 2).unwrap();
            }
            GamePhase::Playing if game.state().is_human_turn() => {
                let card = game.playable_cards()[0];
                game.play_card(PlayerId(0), card.id).unwrap();
            }
            _ => {
                game.run_next_task().unwrap();
            }
        }
    }
    let snapshot = game.snapshot();

    let mut other = new_game(RuleVariant::AbsoluteRank, 6);
    other.load(snapshot).unwrap();
    let pending: Vec<_> = other.scheduler().pending().map(|t| t.kind).collect();
    assert_eq!(pending, vec![TaskKind::NextRound]);
    other.run_until_idle();
    assert_eq!(other.state().round_number(), 2);
    assert_eq!(other.state().cards_per_round(), 4);
}

#[test]
fn corrupted_storage_is_reported() {
    let store = MemoryStore::new();
    store.put_raw("{\"players\": 7");
    let mut game = new_game(RuleVariant::AbsoluteRank, 1).with_store(Box::new(store));
    assert!(matches!(
        game.resume_saved(),
        Err(RestoreError::Store(StoreError::Encoding(_)))
    ));
    assert_eq!(game.state().phase(), GamePhase::Login);
}

#[test]
fn impossible_snapshot_is_rejected_and_state_kept() {
    let mut game = new_game(RuleVariant::AbsoluteRank, 1);
    game.start_game("Ada", 3).unwrap();
    let before = game.state().clone();

    let mut snapshot = game.snapshot();
    snapshot.round_number = 2;
    assert!(matches!(game.load(snapshot), Err(RestoreError::InvalidState(_))));

    let mut snapshot = game.snapshot();
    snapshot.players[2].is_human = true;
    assert!(matches!(game.load(snapshot), Err(RestoreError::InvalidState(_))));

    assert_eq!(game.state(), &before);
}

#[test]
fn snapshot_that_could_never_advance_is_rejected() {
    let mut game = new_game(RuleVariant::AbsoluteRank, 5);
    game.start_game("Ada", 3).unwrap();
    game.submit_declaration(PlayerId(0), 1).unwrap();
    game.run_until_idle();
    let card = game.playable_cards()[0];
    game.play_card(PlayerId(0), card.id).unwrap();
    let before = game.state().clone();

    // Seat 0 has already led; handing it the turn again would stall the game.
    let mut snapshot = game.snapshot();
    assert_eq!(snapshot.current_player, PlayerId(1));
    snapshot.current_player = PlayerId(0);
    assert!(matches!(game.load(snapshot), Err(RestoreError::InvalidState(_))));

    let mut snapshot = game.snapshot();
    snapshot.deck.clear();
    assert!(matches!(game.load(snapshot), Err(RestoreError::InvalidState(_))));

    assert_eq!(game.state(), &before);
    assert!(game.load(game.snapshot()).is_ok());
}

#[test]
fn store_roundtrip_through_the_trait() {
    let mut store = MemoryStore::new();
    let mut game = new_game(RuleVariant::TrumpFollowSuit, 13);
    game.start_game("Ada", 2).unwrap();
    store.save(&game.snapshot()).unwrap();
    assert_eq!(store.load().unwrap(), Some(game.snapshot()));
    store.clear().unwrap();
    assert_eq!(store.load().unwrap(), None);
}
