//! # truth-or-dare
//!
//! Session engine for a truth-or-dare party game.
//!
//! Players take turns drawing truth or dare cards at the session's
//! intensity tier. Fulfilling a card earns a boost point; spending two
//! points creates a boosted custom card that jumps ahead of the general
//! pool on every draw of its type.
//!
//! ## Design Principles
//!
//! 1. **Whole-State Transitions**: Every operation builds the next
//!    `SessionState` from a clone and commits it at once. Callers never
//!    see half-applied changes.
//!
//! 2. **Degrade, Don't Block**: A dead card store means the embedded deck;
//!    an empty deck means custom cards only; a corrupt snapshot means a
//!    fresh start. The game stays playable.
//!
//! 3. **Untrusted Inputs**: Snapshots and remote records pass the same
//!    sanitizer before they reach the state.
//!
//! ## Modules
//!
//! - `core`: Players, session state, RNG, shuffle, configuration
//! - `cards`: Card types, decks, embedded fallback deck
//! - `remote`: Card store trait and an in-memory implementation
//! - `persistence`: Snapshot slots and the sanitizer
//! - `session`: The state machine, deck reconciliation, shared handle

pub mod core;
pub mod cards;
pub mod remote;
pub mod persistence;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    GameMode, GameRng, InvariantViolation, Phase, Player, PlayerId, SessionConfig, SessionState,
    SetupError,
};

pub use crate::cards::{Card, CardId, CardType, Deck, DeckFilter, DeckSummary, IntensityLevel};

pub use crate::remote::{CardStore, InMemoryCardStore, NewCard, RemoteFetch, StoreError};

pub use crate::persistence::{
    sanitize, FileSnapshotStore, MemorySnapshotStore, Rejection, SnapshotStore, StorageError,
};

pub use crate::session::{
    AddCardError, DeckLoad, SessionError, SessionManager, SharedSession, StartOptions, StartOutcome,
};
