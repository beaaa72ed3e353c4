//! A session shared between tasks.
//!
//! `SessionManager` relies on `&mut self` for exclusivity. When several
//! tasks drive the same session, `SharedSession` puts the manager behind a
//! `tokio::sync::Mutex`.
//!
//! The lock is never held across a store call. `start` and
//! `add_custom_card` run in three steps:
//!
//! 1. Lock, validate, capture the request, unlock.
//! 2. Await the store. Readers see the state from before the operation.
//! 3. Lock, re-check against the current state, commit, unlock.
//!
//! A slow or hung store therefore stalls only the caller waiting on it.

use std::sync::Arc;

use tokio::sync::Mutex;

use super::{AddCardError, SessionError, SessionManager, StartOptions, StartOutcome};
use crate::cards::{Card, CardType, DeckSummary, IntensityLevel};
use crate::core::{GameMode, Player, SessionState};

/// Cloneable handle to one session.
#[derive(Clone, Debug)]
pub struct SharedSession {
    inner: Arc<Mutex<SessionManager>>,
}

impl SharedSession {
    pub fn new(manager: SessionManager) -> Self {
        Self {
            inner: Arc::new(Mutex::new(manager)),
        }
    }

    /// A copy of the current state.
    pub async fn snapshot(&self) -> SessionState {
        self.inner.lock().await.state().clone()
    }

    pub async fn deck_summary(&self) -> DeckSummary {
        self.inner.lock().await.deck_summary()
    }

    pub async fn start(
        &self,
        mode: GameMode,
        intensity: IntensityLevel,
        players: Vec<Player>,
        options: StartOptions,
    ) -> Result<StartOutcome, SessionError> {
        let pending = self
            .inner
            .lock()
            .await
            .prepare_start(mode, intensity, players, options)?;
        let load = pending.load_deck().await;
        self.inner.lock().await.finish_start(pending, load)
    }

    pub async fn draw_next_player(&self) -> Option<Player> {
        self.inner.lock().await.draw_next_player()
    }

    pub async fn draw_card(&self, card_type: CardType) -> Option<Card> {
        self.inner.lock().await.draw_card(card_type)
    }

    pub async fn fulfill_card(&self) -> Option<Card> {
        self.inner.lock().await.fulfill_card()
    }

    pub async fn pass_card(&self) -> Option<Card> {
        self.inner.lock().await.pass_card()
    }

    pub async fn add_custom_card(
        &self,
        card_type: CardType,
        text: &str,
        apply_boost: bool,
    ) -> Result<Card, AddCardError> {
        let pending = self
            .inner
            .lock()
            .await
            .prepare_custom_card(card_type, text, apply_boost)?;
        let created = pending.create().await;
        self.inner.lock().await.finish_custom_card(pending, created)
    }

    pub async fn reset(&self) {
        self.inner.lock().await.reset();
    }
}
