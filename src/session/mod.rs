//! Session engine: the state machine and its collaborators.
//!
//! - `SessionManager`: owns the authoritative `SessionState`, applies every
//!   operation as a whole-state replacement, and persists after each one
//! - `SharedSession`: a manager behind an async mutex for multi-threaded
//!   callers
//! - `load_deck`: remote/fallback deck reconciliation used by `start`

pub mod manager;
pub mod reconcile;
pub mod shared;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::SetupError;
use crate::remote::StoreError;

pub use manager::SessionManager;
pub use reconcile::{load_deck, DeckLoad, FETCH_FAILED_MESSAGE, NO_CARDS_MESSAGE, REMOTE_EMPTY_MESSAGE};
pub use shared::SharedSession;

/// Options for `start`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartOptions {
    /// Shuffle the roster before seating. `None` uses the config default.
    pub shuffle_players: Option<bool>,
}

impl StartOptions {
    /// Seat players in the given order.
    #[must_use]
    pub fn keep_order() -> Self {
        Self {
            shuffle_players: Some(false),
        }
    }

    /// Shuffle the roster regardless of config.
    #[must_use]
    pub fn shuffled() -> Self {
        Self {
            shuffle_players: Some(true),
        }
    }
}

/// What `start` reports back for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartOutcome {
    /// False when the fallback deck was used or the deck is empty.
    pub success: bool,
    pub used_fallback: bool,
    pub error_message: Option<String>,
}

/// Errors from `start`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The roster does not fit the mode. Nothing changed.
    #[error("invalid setup: {0}")]
    InvalidSetup(#[from] SetupError),

    /// The deck fetch failed outside its modeled failures. Nothing changed.
    #[error("card store fault: {0}")]
    Transport(#[from] StoreError),
}

/// Why `add_custom_card` refused. Session state is unchanged in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddCardError {
    #[error("no active intensity")]
    NoActiveIntensity,

    #[error("card text must be 1..=500 characters, got {len}")]
    InvalidText { len: usize },

    #[error("boosting requires a current player")]
    NoCurrentPlayer,

    #[error("boosting costs {required} points, player has {available}")]
    InsufficientBoost { available: u8, required: u8 },

    #[error("card store rejected the card: {0}")]
    Store(#[from] StoreError),

    /// The session moved on while the store was creating the card: it was
    /// reset, or the boosting player's turn ended.
    #[error("session changed while the card was being created")]
    SessionChanged,
}
