//! In-process `CardStore`.
//!
//! Holds raw JSON records, so tests can plant malformed data, and lets
//! callers switch fetches and creates into their failure modes.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use super::{CardStore, NewCard, RemoteFetch, StoreError};
use crate::cards::{Card, CardId, IntensityLevel};

/// How `fetch_by_intensity` behaves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FetchBehavior {
    /// Return stored records of the requested tier.
    #[default]
    Normal,
    /// Report an expected failure (`RemoteFetch::failed`).
    Fail,
    /// Return an unexpected `StoreError::Fault`.
    Fault,
}

/// Card store backed by a list of JSON records.
#[derive(Debug, Default)]
pub struct InMemoryCardStore {
    records: Mutex<Vec<Value>>,
    fetch_behavior: Mutex<FetchBehavior>,
    fail_creates: AtomicBool,
    fetches: AtomicUsize,
}

impl InMemoryCardStore {
    /// An empty, healthy store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A healthy store holding `cards`.
    pub fn with_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let store = Self::new();
        for card in cards {
            store.push_card(&card);
        }
        store
    }

    /// A store whose fetches fail.
    #[must_use]
    pub fn failing() -> Self {
        let store = Self::new();
        store.set_fetch_behavior(FetchBehavior::Fail);
        store
    }

    pub fn push_card(&self, card: &Card) {
        if let Ok(value) = serde_json::to_value(card) {
            self.push_record(value);
        }
    }

    /// Store a raw record as-is, valid or not.
    pub fn push_record(&self, record: Value) {
        if let Ok(mut records) = self.records.lock() {
            records.push(record);
        }
    }

    pub fn set_fetch_behavior(&self, behavior: FetchBehavior) {
        if let Ok(mut current) = self.fetch_behavior.lock() {
            *current = behavior;
        }
    }

    pub fn set_fail_creates(&self, fail: bool) {
        self.fail_creates.store(fail, Ordering::SeqCst);
    }

    /// Number of records held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().map_or(0, |r| r.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of fetches served so far.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn behavior(&self) -> FetchBehavior {
        self.fetch_behavior.lock().map_or(FetchBehavior::Fail, |b| *b)
    }

    fn records(&self) -> Result<std::sync::MutexGuard<'_, Vec<Value>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Fault("record lock poisoned".to_string()))
    }
}

#[async_trait]
impl CardStore for InMemoryCardStore {
    async fn fetch_by_intensity(&self, level: IntensityLevel) -> Result<RemoteFetch, StoreError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        match self.behavior() {
            FetchBehavior::Fail => return Ok(RemoteFetch::failed()),
            FetchBehavior::Fault => return Err(StoreError::Fault("fetch pipeline crashed".to_string())),
            FetchBehavior::Normal => {}
        }

        let records: Vec<Value> = self
            .records()?
            .iter()
            .filter(|r| r.get("level").and_then(Value::as_str) == Some(level.as_str()))
            .cloned()
            .collect();

        debug!(level = %level, count = records.len(), "served remote fetch");
        Ok(RemoteFetch::succeeded(records))
    }

    async fn create_card(&self, card: NewCard) -> Result<CardId, StoreError> {
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(StoreError::Rejected { status: 503 });
        }

        let id = CardId::new(uuid::Uuid::new_v4().to_string());
        // The store never records the boost; that lives in the session.
        self.records()?.push(json!({
            "id": id.as_str(),
            "type": card.card_type,
            "text": card.text,
            "level": card.level,
            "isBoosted": false,
            "isCustom": card.is_custom,
        }));

        Ok(id)
    }
}
