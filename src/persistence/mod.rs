//! Snapshot persistence: durable slots and the sanitizer that guards them.
//!
//! Every committed state is serialized to one named slot. On startup the
//! slot is read back through `sanitize`; anything it rejects is discarded
//! and the session starts fresh.

pub mod sanitize;
pub mod store;

pub use sanitize::{clamp_boost_points, sanitize, sanitize_card, sanitize_json, CardRejection, Rejection};
pub use store::{best_effort, FileSnapshotStore, MemorySnapshotStore, SnapshotStore, StorageError};
