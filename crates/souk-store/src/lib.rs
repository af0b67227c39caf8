//! Souk Store Library
//!
//! Lifecycle-scoped draft state and its durable recovery snapshot: the
//! `DraftStore` that step controllers mutate, the `SnapshotStore` trait with
//! local-filesystem and in-memory backends, and the recovery adapter that
//! reconciles in-memory state against a durable snapshot at wizard entry.

pub mod recovery;
pub mod snapshot;
pub mod store;

pub use recovery::{reconcile, RecoveryAdapter};
pub use snapshot::{LocalSnapshotStore, MemorySnapshotStore, SnapshotError, SnapshotStore};
pub use store::{DraftPatch, DraftStore};
