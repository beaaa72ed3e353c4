//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;
use tracing_subscriber::{fmt, EnvFilter};
use truth_or_dare::{
    CardId, CardStore, GameMode, InMemoryCardStore, IntensityLevel, MemorySnapshotStore, NewCard,
    Player, PlayerId, RemoteFetch, SessionConfig, SessionManager, SnapshotStore, StoreError,
};

/// Install a test subscriber once.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, then `warn`.
pub fn init_logging() {
    let filter = std::env::var("TEST_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .without_time()
        .try_init()
        .ok();
}

pub fn roster(names: &[&str]) -> Vec<Player> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| Player::with_id(PlayerId::new(format!("p{}", i)), *name))
        .collect()
}

pub fn manager(cards: Arc<dyn CardStore>, snapshots: Arc<dyn SnapshotStore>, seed: u64) -> SessionManager {
    SessionManager::new(cards, snapshots, SessionConfig::default().with_seed(seed))
}

pub fn memory_snapshots() -> Arc<MemorySnapshotStore> {
    Arc::new(MemorySnapshotStore::new())
}

pub const GROUP: GameMode = GameMode::Grupo;
pub const MEDIO: IntensityLevel = IntensityLevel::Medio;

/// Card store whose calls park until the test releases them.
///
/// Starts closed. `entered` fires each time a call reaches the gate.
pub struct GatedStore {
    inner: InMemoryCardStore,
    closed: AtomicBool,
    entered: Notify,
    release: Notify,
}

impl GatedStore {
    pub fn new(inner: InMemoryCardStore) -> Self {
        Self {
            inner,
            closed: AtomicBool::new(true),
            entered: Notify::new(),
            release: Notify::new(),
        }
    }

    /// Let calls through without parking.
    pub fn open(&self) {
        self.closed.store(false, Ordering::SeqCst);
    }

    /// Park calls again.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    /// Wait until a call is parked at the gate.
    pub async fn wait_entered(&self) {
        self.entered.notified().await;
    }

    /// Release one parked call.
    pub fn release(&self) {
        self.release.notify_one();
    }

    pub fn inner(&self) -> &InMemoryCardStore {
        &self.inner
    }

    async fn gate(&self) {
        if self.closed.load(Ordering::SeqCst) {
            self.entered.notify_one();
            self.release.notified().await;
        }
    }
}

#[async_trait]
impl CardStore for GatedStore {
    async fn fetch_by_intensity(&self, level: IntensityLevel) -> Result<RemoteFetch, StoreError> {
        self.gate().await;
        self.inner.fetch_by_intensity(level).await
    }

    async fn create_card(&self, card: NewCard) -> Result<CardId, StoreError> {
        self.gate().await;
        self.inner.create_card(card).await
    }
}
