//! Session configuration.
//!
//! Operational knobs only. The boost economy and card text limits are
//! fixed constants (see `core::player` and `cards::definition`).
//!
//! ```
//! use truth_or_dare::core::SessionConfig;
//!
//! let config = SessionConfig::default().with_seed(42).without_shuffle();
//!
//! assert_eq!(config.rng_seed, Some(42));
//! assert!(!config.shuffle_players);
//! ```

use serde::{Deserialize, Serialize};

/// Name of the durable slot holding the session snapshot.
pub const DEFAULT_SNAPSHOT_KEY: &str = "verdade-ou-desafio-game";

/// Configuration for a `SessionManager`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    /// Durable slot name for the snapshot.
    pub snapshot_key: String,

    /// Fixed seed for reproducible sessions. `None` uses OS entropy.
    pub rng_seed: Option<u64>,

    /// Default for `StartOptions::shuffle_players`.
    pub shuffle_players: bool,

    /// Consult the embedded deck when the remote deck is unavailable.
    pub use_fallback_deck: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            snapshot_key: DEFAULT_SNAPSHOT_KEY.to_string(),
            rng_seed: None,
            shuffle_players: true,
            use_fallback_deck: true,
        }
    }
}

impl SessionConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn with_snapshot_key(mut self, key: impl Into<String>) -> Self {
        self.snapshot_key = key.into();
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Keep the roster in the order the caller gave it.
    #[must_use]
    pub fn without_shuffle(mut self) -> Self {
        self.shuffle_players = false;
        self
    }

    /// Start with an empty deck instead of the embedded one when the
    /// remote deck is unavailable.
    #[must_use]
    pub fn without_fallback_deck(mut self) -> Self {
        self.use_fallback_deck = false;
        self
    }
}
