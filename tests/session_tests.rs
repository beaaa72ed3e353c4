//! End-to-end session tests.
//!
//! These drive a `SessionManager` through whole games against in-memory
//! collaborators:
//! - Fallback deck when the card store is down
//! - Turn flow and the boost economy
//! - Snapshot persistence, restore, and reset

mod common;

use std::sync::Arc;

use serde_json::json;
use truth_or_dare::cards::seed_deck_for;
use truth_or_dare::session::{FETCH_FAILED_MESSAGE, NO_CARDS_MESSAGE};
use truth_or_dare::{
    AddCardError, Card, CardId, CardType, FileSnapshotStore, GameMode, InMemoryCardStore,
    IntensityLevel, MemorySnapshotStore, Phase, SessionConfig, SessionError, SessionManager,
    SessionState, SnapshotStore, StartOptions,
};

use common::{init_logging, manager, memory_snapshots, roster, GROUP, MEDIO};

const KEY: &str = truth_or_dare::core::DEFAULT_SNAPSHOT_KEY;

/// Remote down, three players, medio: play one truth and reset.
#[tokio::test]
async fn test_group_session_with_offline_deck() {
    init_logging();
    let snapshots = memory_snapshots();
    let mut session = manager(Arc::new(InMemoryCardStore::failing()), snapshots.clone(), 11);

    let outcome = session
        .start(GROUP, MEDIO, roster(&["Ana", "Bia", "Caio"]), StartOptions::default())
        .await
        .unwrap();

    assert!(!outcome.success);
    assert!(outcome.used_fallback);
    assert_eq!(outcome.error_message.as_deref(), Some(FETCH_FAILED_MESSAGE));

    let offline: Vec<Card> = seed_deck_for(MEDIO);
    let deck: Vec<Card> = session.state().available_cards.iter().cloned().collect();
    assert_eq!(deck, offline);

    let player = session.draw_next_player().unwrap();
    let seat = session.state().current_player_index.unwrap();
    assert_eq!(session.state().players[seat], player);

    let card = session.draw_card(CardType::Truth).unwrap();
    assert_eq!(card.card_type, CardType::Truth);
    assert_eq!(card.level, MEDIO);
    assert!(offline.contains(&card));
    assert_eq!(session.current_card(), Some(&card));

    session.fulfill_card();
    {
        let state = session.state();
        assert!(state.used_cards.contains(&card.id));
        assert!(!state.available_cards.contains(&card.id));
        assert_eq!(state.players[seat].boost_points, 4);
        assert!(state.current_card.is_none());
        assert!(state.current_player_index.is_none());
    }
    assert!(snapshots.peek(KEY).is_some());

    session.reset();

    assert_eq!(session.state(), &SessionState::initial());
    assert_eq!(
        serde_json::to_value(session.state()).unwrap(),
        json!({
            "phase": "setup",
            "mode": null,
            "intensity": null,
            "players": [],
            "currentPlayerIndex": null,
            "availableCards": [],
            "usedCards": [],
            "currentCard": null,
        })
    );
    assert_eq!(snapshots.peek(KEY), None);
}

/// A couple session with no deck at all still starts and grows through custom cards.
#[tokio::test]
async fn test_empty_deck_start_then_custom_cards() {
    init_logging();
    let mut session = SessionManager::new(
        Arc::new(InMemoryCardStore::failing()),
        memory_snapshots(),
        SessionConfig::default().with_seed(3).without_fallback_deck(),
    );

    let outcome = session
        .start(GameMode::Casal, IntensityLevel::Extremo, roster(&["Ana", "Bia"]), StartOptions::keep_order())
        .await
        .unwrap();

    assert!(!outcome.success);
    assert_eq!(outcome.error_message.as_deref(), Some(NO_CARDS_MESSAGE));
    assert_eq!(session.state().phase, Phase::Playing);
    assert!(session.state().available_cards.is_empty());

    session.draw_next_player().unwrap();
    assert_eq!(session.draw_card(CardType::Dare), None);

    // The store is only down for reads.
    let card = session
        .add_custom_card(CardType::Dare, "Say something nice", true)
        .await
        .unwrap();
    assert_eq!(card.level, IntensityLevel::Extremo);

    assert_eq!(session.draw_card(CardType::Dare), Some(card.clone()));
    session.fulfill_card();

    // Boosted cards are consumed, not archived.
    assert!(session.state().available_cards.is_empty());
    assert!(session.state().used_cards.is_empty());
}

/// Boosted custom cards: 3 points buy one, fulfilling earns one back.
#[tokio::test]
async fn test_boost_economy() {
    init_logging();
    let store = Arc::new(InMemoryCardStore::with_cards(seed_deck_for(MEDIO)));
    let mut session = manager(store, memory_snapshots(), 5);
    session
        .start(GROUP, MEDIO, roster(&["Ana", "Bia", "Caio"]), StartOptions::keep_order())
        .await
        .unwrap();

    session.draw_next_player().unwrap();
    let seat = session.state().current_player_index.unwrap();

    let boosted = session.add_custom_card(CardType::Truth, "Who here would you call at 3am?", true).await.unwrap();
    assert_eq!(session.state().players[seat].boost_points, 1);

    let refused = session.add_custom_card(CardType::Truth, "Another one", true).await;
    assert_eq!(
        refused,
        Err(AddCardError::InsufficientBoost {
            available: 1,
            required: 2
        })
    );

    // The boosted card jumps the queue.
    assert_eq!(session.draw_card(CardType::Truth), Some(boosted));
    session.fulfill_card();
    assert_eq!(session.state().players[seat].boost_points, 2);
    assert_eq!(session.deck_summary().boosted, 0);
}

#[tokio::test]
async fn test_unexpected_fetch_fault_propagates() {
    init_logging();
    let store = Arc::new(InMemoryCardStore::new());
    store.set_fetch_behavior(truth_or_dare::remote::FetchBehavior::Fault);
    let snapshots = memory_snapshots();
    let mut session = manager(store, snapshots.clone(), 1);

    let result = session
        .start(GROUP, MEDIO, roster(&["Ana", "Bia", "Caio"]), StartOptions::default())
        .await;

    assert!(matches!(result, Err(SessionError::Transport(_))));
    assert_eq!(session.state(), &SessionState::initial());
    assert_eq!(snapshots.peek(KEY), None);
}

#[tokio::test]
async fn test_restore_resumes_session() {
    init_logging();
    let snapshots = memory_snapshots();
    let cards: Arc<InMemoryCardStore> = Arc::new(InMemoryCardStore::failing());

    let expected = {
        let mut session = manager(cards.clone(), snapshots.clone(), 21);
        session
            .start(GROUP, IntensityLevel::Pesado, roster(&["Ana", "Bia", "Caio", "Duda"]), StartOptions::default())
            .await
            .unwrap();
        session.draw_next_player();
        session.draw_card(CardType::Dare).unwrap();
        session.state().clone()
    };

    let restored = SessionManager::restore(cards, snapshots, SessionConfig::default());

    assert_eq!(restored.state(), &expected);
    assert!(restored.current_card().is_some());
}

#[test]
fn test_restore_discards_corrupt_snapshot() {
    init_logging();
    let snapshots = Arc::new(MemorySnapshotStore::new());
    snapshots
        .save(
            KEY,
            &json!({
                "phase": "playing",
                "mode": "grupo",
                "intensity": "medio",
                "players": [{"id": "p0", "name": "Ana", "boostPoints": 3}],
                "currentPlayerIndex": 4,
                "availableCards": [],
                "usedCards": [],
                "currentCard": null,
            })
            .to_string(),
        )
        .unwrap();

    let session = SessionManager::restore(Arc::new(InMemoryCardStore::new()), snapshots.clone(), SessionConfig::default());

    assert_eq!(session.state(), &SessionState::initial());
    assert_eq!(snapshots.peek(KEY), None);
}

#[test]
fn test_restore_discards_unparseable_snapshot() {
    init_logging();
    let snapshots = Arc::new(MemorySnapshotStore::new());
    snapshots.save(KEY, "{\"phase\": \"playing\", ").unwrap();

    let session = SessionManager::restore(Arc::new(InMemoryCardStore::new()), snapshots.clone(), SessionConfig::default());

    assert_eq!(session.state(), &SessionState::initial());
    assert_eq!(snapshots.peek(KEY), None);
}

#[test]
fn test_restore_clamps_recoverable_fields() {
    init_logging();
    let snapshots = Arc::new(MemorySnapshotStore::new());
    snapshots
        .save(
            KEY,
            &json!({
                "phase": "playing",
                "mode": "casal",
                "intensity": "leve",
                "players": [
                    {"id": "p0", "name": "Ana", "boostPoints": 7},
                    {"id": "p1", "name": "Bia", "boostPoints": -3},
                ],
                "currentPlayerIndex": null,
                "availableCards": [
                    {"id": "leve-v1", "type": "truth", "text": "Q?", "level": "leve"},
                ],
                "usedCards": [],
            })
            .to_string(),
        )
        .unwrap();

    let session = SessionManager::restore(Arc::new(InMemoryCardStore::new()), snapshots, SessionConfig::default());
    let state = session.state();

    assert_eq!(state.players[0].boost_points, 5);
    assert_eq!(state.players[1].boost_points, 0);
    let card = state.available_cards.iter().next().unwrap();
    assert_eq!(card.id, CardId::new("leve-v1"));
    assert!(!card.is_boosted && !card.is_custom);
}

#[tokio::test]
async fn test_file_snapshots_survive_restart() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let cards = Arc::new(InMemoryCardStore::with_cards(seed_deck_for(IntensityLevel::Leve)));

    let expected = {
        let snapshots = Arc::new(FileSnapshotStore::new(dir.path()));
        let mut session = manager(cards.clone(), snapshots, 8);
        session
            .start(GameMode::Casal, IntensityLevel::Leve, roster(&["Ana", "Bia"]), StartOptions::default())
            .await
            .unwrap();
        session.draw_next_player();
        session.draw_card(CardType::Truth).unwrap();
        session.fulfill_card();
        session.state().clone()
    };

    let restored = SessionManager::restore(cards, Arc::new(FileSnapshotStore::new(dir.path())), SessionConfig::default());
    assert_eq!(restored.state(), &expected);
    assert_eq!(restored.state().used_cards.len(), 1);
}
