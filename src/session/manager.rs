//! The session state machine.
//!
//! `SessionManager` owns the authoritative `SessionState`. Every operation
//! builds the complete next state from a clone of the current one and
//! commits it in a single assignment, so no caller ever observes a
//! half-applied transition. Operations with remote I/O (`start`,
//! `add_custom_card`) await the store before touching state.
//!
//! Each commit is followed by a best-effort snapshot write.
//!
//! ## Turn flow
//!
//! ```text
//! draw_next_player -> draw_card -> fulfill_card | pass_card
//! ```
//!
//! A drawn card is checked out, not removed: it stays in the deck until
//! fulfilled, and passing simply ends the turn.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::reconcile::{load_deck, DeckLoad};
use super::{AddCardError, SessionError, StartOptions, StartOutcome};
use crate::cards::{is_valid_text, seed_deck, Card, CardId, CardType, Deck, DeckSummary, IntensityLevel};
use crate::core::{
    validate_setup, GameMode, GameRng, Phase, Player, PlayerId, SessionConfig, SessionState,
    BOOST_COST, STARTING_BOOST_POINTS,
};
use crate::persistence::{best_effort, sanitize_json, SnapshotStore, StorageError};
use crate::remote::{CardStore, NewCard, StoreError};

/// Owner of one session.
pub struct SessionManager {
    state: SessionState,
    cards: Arc<dyn CardStore>,
    snapshots: Arc<dyn SnapshotStore>,
    config: SessionConfig,
    rng: GameRng,
    fallback_deck: Vec<Card>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("fallback_cards", &self.fallback_deck.len())
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Create a manager in the initial setup state.
    ///
    /// The snapshot slot is neither read nor written until the first
    /// operation.
    pub fn new(cards: Arc<dyn CardStore>, snapshots: Arc<dyn SnapshotStore>, config: SessionConfig) -> Self {
        let rng = GameRng::from_seed_option(config.rng_seed);
        let fallback_deck = if config.use_fallback_deck {
            seed_deck()
        } else {
            Vec::new()
        };

        Self {
            state: SessionState::initial(),
            cards,
            snapshots,
            config,
            rng,
            fallback_deck,
        }
    }

    /// Create a manager from the persisted snapshot, if one survives
    /// sanitization. A corrupted snapshot is cleared and the session
    /// starts fresh.
    pub fn restore(cards: Arc<dyn CardStore>, snapshots: Arc<dyn SnapshotStore>, config: SessionConfig) -> Self {
        let mut manager = Self::new(cards, snapshots, config);
        if let Some(state) = manager.load_snapshot() {
            manager.state = state;
        }
        manager
    }

    /// Replace the embedded fallback deck.
    #[must_use]
    pub fn with_fallback_deck(mut self, deck: Vec<Card>) -> Self {
        self.fallback_deck = deck;
        self
    }

    // === Queries ===

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.state.current_player()
    }

    #[must_use]
    pub fn current_card(&self) -> Option<&Card> {
        self.state.current_card.as_ref()
    }

    /// Counts for the live deck.
    #[must_use]
    pub fn deck_summary(&self) -> DeckSummary {
        self.state.available_cards.summary()
    }

    // === Operations ===

    /// Start a session.
    ///
    /// Names are trimmed, every player gets a fresh allowance of boost
    /// points, and the roster is shuffled unless the options (or config)
    /// say otherwise. The deck comes from `load_deck`; a fallback or empty
    /// deck is reported in the outcome but never blocks the transition.
    ///
    /// Errors leave the state untouched: `InvalidSetup` before any I/O,
    /// `Transport` when the fetch fails outside its modeled failures.
    pub async fn start(
        &mut self,
        mode: GameMode,
        intensity: IntensityLevel,
        players: Vec<Player>,
        options: StartOptions,
    ) -> Result<StartOutcome, SessionError> {
        let pending = self.prepare_start(mode, intensity, players, options)?;
        let load = pending.load_deck().await;
        self.finish_start(pending, load)
    }

    /// Validate and seat the roster. No I/O, no state change.
    pub(crate) fn prepare_start(
        &mut self,
        mode: GameMode,
        intensity: IntensityLevel,
        players: Vec<Player>,
        options: StartOptions,
    ) -> Result<PendingStart, SessionError> {
        let players: Vec<Player> = players
            .into_iter()
            .map(|p| Player {
                name: p.name.trim().to_string(),
                boost_points: STARTING_BOOST_POINTS,
                ..p
            })
            .collect();
        validate_setup(mode, &players)?;

        let players = if options.shuffle_players.unwrap_or(self.config.shuffle_players) {
            self.rng.shuffled(&players)
        } else {
            players
        };

        Ok(PendingStart {
            mode,
            intensity,
            players,
            cards: Arc::clone(&self.cards),
            fallback: self.fallback_deck.iter().filter(|c| c.level == intensity).cloned().collect(),
        })
    }

    /// Commit a prepared start once its deck has loaded.
    ///
    /// A start replaces the whole state, so nothing that happened while
    /// the deck was loading needs re-checking.
    pub(crate) fn finish_start(
        &mut self,
        pending: PendingStart,
        load: Result<DeckLoad, StoreError>,
    ) -> Result<StartOutcome, SessionError> {
        let PendingStart {
            mode,
            intensity,
            players,
            ..
        } = pending;

        let load = match load {
            Ok(load) => load,
            Err(error) => {
                warn!(%error, level = %intensity, "unexpected failure loading deck");
                return Err(error.into());
            }
        };

        let outcome = StartOutcome {
            success: load.success(),
            used_fallback: load.used_fallback,
            error_message: load.error_message,
        };

        let next = SessionState {
            phase: Phase::Playing,
            mode: Some(mode),
            intensity: Some(intensity),
            players: players.into_iter().collect(),
            current_player_index: None,
            available_cards: Deck::from(load.cards),
            used_cards: Deck::new(),
            current_card: None,
        };

        info!(
            mode = %mode,
            level = %intensity,
            players = next.players.len(),
            cards = next.available_cards.len(),
            used_fallback = outcome.used_fallback,
            "session started"
        );
        self.commit(next);

        Ok(outcome)
    }

    /// Pick the next player uniformly from the whole roster.
    ///
    /// Draws are independent: the previous player can be picked again.
    /// Returns `None` without changes when the roster is empty.
    pub fn draw_next_player(&mut self) -> Option<Player> {
        let index = self.rng.gen_index(self.state.players.len())?;

        let mut next = self.state.clone();
        next.current_player_index = Some(index);
        let player = next.players.get(index).cloned();

        debug!(index, player = ?player.as_ref().map(|p| &p.name), "next player drawn");
        self.commit(next);

        player
    }

    /// Check out a card of `card_type` for the current player.
    ///
    /// Boosted cards of the type and tier always win over the general
    /// pool. Returns `None` without changes when no player is selected or
    /// the type is exhausted for the tier.
    pub fn draw_card(&mut self, card_type: CardType) -> Option<Card> {
        if self.state.current_player_index.is_none() {
            return None;
        }
        let level = self.state.intensity?;

        let selected = {
            let deck = &self.state.available_cards;
            let boosted = deck.boosted_candidates(card_type, level);
            let pool = if boosted.is_empty() {
                deck.candidates(card_type, level)
            } else {
                boosted
            };
            let index = self.rng.gen_index(pool.len())?;
            pool[index].clone()
        };

        let mut next = self.state.clone();
        next.current_card = Some(selected.clone());

        debug!(card = %selected.id, boosted = selected.is_boosted, "card drawn");
        self.commit(next);

        Some(selected)
    }

    /// Resolve the checked-out card as done.
    ///
    /// The card leaves the deck. Plain cards go to the archive; boosted
    /// cards are consumed without a trace. The current player earns a boost
    /// point and the turn ends. Returns the resolved card, or `None` when
    /// nothing was checked out.
    pub fn fulfill_card(&mut self) -> Option<Card> {
        let card = self.state.current_card.clone()?;

        let mut next = self.state.clone();
        next.available_cards.remove(&card.id);
        if !card.is_boosted {
            next.used_cards.push(card.clone());
        }
        if let Some(player) = next.current_player_mut() {
            player.reward();
        }
        next.clear_turn();

        debug!(card = %card.id, boosted = card.is_boosted, "card fulfilled");
        self.commit(next);

        Some(card)
    }

    /// End the turn without resolving the checked-out card.
    ///
    /// The card stays in the deck for anyone to draw later; nobody is
    /// rewarded. Returns the card that was checked out, if any.
    pub fn pass_card(&mut self) -> Option<Card> {
        let mut next = self.state.clone();
        let passed = next.current_card.take();
        next.clear_turn();

        debug!(card = ?passed.as_ref().map(|c| &c.id), "card passed");
        self.commit(next);

        passed
    }

    /// Create a custom card at the session's tier and add it to the deck.
    ///
    /// With `apply_boost`, the current player must hold at least 2 points;
    /// they are debited once the store confirms the card. Every rejection
    /// leaves the state unchanged.
    pub async fn add_custom_card(
        &mut self,
        card_type: CardType,
        text: &str,
        apply_boost: bool,
    ) -> Result<Card, AddCardError> {
        let pending = self.prepare_custom_card(card_type, text, apply_boost)?;
        let created = pending.create().await;
        self.finish_custom_card(pending, created)
    }

    /// Check a custom card against the current state. No I/O, no state
    /// change.
    pub(crate) fn prepare_custom_card(
        &self,
        card_type: CardType,
        text: &str,
        apply_boost: bool,
    ) -> Result<PendingCard, AddCardError> {
        let level = self.state.intensity.ok_or(AddCardError::NoActiveIntensity)?;

        let text = text.trim();
        if !is_valid_text(text) {
            return Err(AddCardError::InvalidText {
                len: text.chars().count(),
            });
        }

        let booster = if apply_boost {
            let player = self.state.current_player().ok_or(AddCardError::NoCurrentPlayer)?;
            check_boost(player)?;
            Some(player.id.clone())
        } else {
            None
        };

        Ok(PendingCard {
            request: NewCard {
                card_type,
                text: text.to_string(),
                level,
                is_custom: true,
            },
            booster,
            cards: Arc::clone(&self.cards),
        })
    }

    /// Add a card the store has answered for.
    ///
    /// The state may have moved while the store was working, so the
    /// preconditions are checked again: same tier, and for a boosted card
    /// the same player still in turn and still able to pay.
    pub(crate) fn finish_custom_card(
        &mut self,
        pending: PendingCard,
        created: Result<CardId, StoreError>,
    ) -> Result<Card, AddCardError> {
        let PendingCard { request, booster, .. } = pending;

        let id = match created {
            Ok(id) => id,
            Err(error) => {
                warn!(%error, "custom card was not saved");
                return Err(error.into());
            }
        };

        if self.state.intensity != Some(request.level) {
            warn!(card = %id, "session changed while creating custom card; card not added");
            return Err(AddCardError::SessionChanged);
        }
        if self.state.available_cards.contains(&id) || self.state.used_cards.contains(&id) {
            warn!(card = %id, "card store returned an id already in the session");
            return Err(StoreError::InvalidResponse(format!("duplicate card id {}", id)).into());
        }

        let mut next = self.state.clone();
        if let Some(booster) = &booster {
            let player = next
                .current_player_mut()
                .filter(|p| &p.id == booster)
                .ok_or(AddCardError::SessionChanged)?;
            check_boost(player)?;
            let spent = player.spend_boost();
            debug_assert!(spent, "boost balance checked above");
        }

        let card = Card::custom(id, request.card_type, request.text, request.level, booster.is_some());
        next.available_cards.push(card.clone());

        info!(card = %card.id, boosted = card.is_boosted, "custom card added");
        self.commit(next);

        Ok(card)
    }

    /// Return to the initial setup state and clear the snapshot slot.
    ///
    /// Always succeeds; a failed clear is logged and ignored.
    pub fn reset(&mut self) {
        self.state = SessionState::initial();
        best_effort("clear", self.snapshots.clear(&self.config.snapshot_key));
        info!("session reset");
    }

    // === Internals ===

    fn commit(&mut self, next: SessionState) {
        debug_assert_eq!(next.validate(), Ok(()));
        self.state = next;
        self.persist();
    }

    fn persist(&self) {
        let key = &self.config.snapshot_key;
        let result = serde_json::to_string(&self.state)
            .map_err(StorageError::from)
            .and_then(|json| self.snapshots.save(key, &json));
        best_effort("save", result);
    }

    fn load_snapshot(&self) -> Option<SessionState> {
        let key = &self.config.snapshot_key;

        let raw = match self.snapshots.load(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(error) => {
                warn!(%error, "could not read snapshot; starting fresh");
                return None;
            }
        };

        match sanitize_json(&raw) {
            Ok(state) => {
                info!(phase = ?state.phase, players = state.players.len(), "session restored");
                Some(state)
            }
            Err(rejection) => {
                warn!(%rejection, "discarding unusable snapshot");
                best_effort("clear", self.snapshots.clear(key));
                None
            }
        }
    }
}

fn check_boost(player: &Player) -> Result<(), AddCardError> {
    if player.can_afford_boost() {
        Ok(())
    } else {
        Err(AddCardError::InsufficientBoost {
            available: player.boost_points,
            required: BOOST_COST,
        })
    }
}

/// A validated start waiting for its deck.
pub(crate) struct PendingStart {
    mode: GameMode,
    intensity: IntensityLevel,
    players: Vec<Player>,
    cards: Arc<dyn CardStore>,
    fallback: Vec<Card>,
}

impl PendingStart {
    pub(crate) async fn load_deck(&self) -> Result<DeckLoad, StoreError> {
        load_deck(self.cards.as_ref(), self.intensity, &self.fallback).await
    }
}

/// A validated custom card waiting for the store.
pub(crate) struct PendingCard {
    request: NewCard,
    booster: Option<PlayerId>,
    cards: Arc<dyn CardStore>,
}

impl PendingCard {
    pub(crate) async fn create(&self) -> Result<CardId, StoreError> {
        self.cards.create_card(self.request.clone()).await
    }
}
