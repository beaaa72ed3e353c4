//! Remote card store.
//!
//! The store is an opaque collaborator with two operations: fetch the cards
//! of one tier, and create a card. Transport (REST, RPC, ...) belongs to
//! the implementation.
//!
//! ## Failure model
//!
//! - `fetch_by_intensity` reports expected failures (network error, bad
//!   status) as `Ok(RemoteFetch { failed: true, .. })`. An `Err` means a
//!   fault outside that model and is propagated by `start`.
//! - `create_card` reports any failure as `Err`; the caller treats it as
//!   a recoverable per-call rejection.
//!
//! Records come back as raw JSON and are validated by the deck loader.

pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::cards::{CardId, CardType, IntensityLevel};

pub use memory::{FetchBehavior, InMemoryCardStore};

/// Remote store failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("store rejected the request with status {status}")]
    Rejected { status: u16 },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("unexpected store fault: {0}")]
    Fault(String),
}

/// Result of a tier fetch.
///
/// `failed` marks an expected failure; `records` is then empty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RemoteFetch {
    pub records: Vec<Value>,
    pub failed: bool,
}

impl RemoteFetch {
    /// A fetch that reached the store.
    #[must_use]
    pub fn succeeded(records: Vec<Value>) -> Self {
        Self { records, failed: false }
    }

    /// A fetch that could not reach the store or got an error status.
    #[must_use]
    pub fn failed() -> Self {
        Self {
            records: Vec::new(),
            failed: true,
        }
    }
}

/// Payload for creating a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCard {
    #[serde(rename = "type")]
    pub card_type: CardType,
    pub text: String,
    pub level: IntensityLevel,
    pub is_custom: bool,
}

/// Remote card store operations.
#[async_trait]
pub trait CardStore: Send + Sync {
    /// Fetch every card of one tier.
    async fn fetch_by_intensity(&self, level: IntensityLevel) -> Result<RemoteFetch, StoreError>;

    /// Persist a new card and return its durable identifier.
    async fn create_card(&self, card: NewCard) -> Result<CardId, StoreError>;
}
