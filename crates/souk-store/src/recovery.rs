//! Recovery adapter: reconciles in-memory draft state against the durable
//! snapshot at wizard entry.
//!
//! The resolution order is local, then snapshot, then server seed, then
//! blank. An in-progress edit always wins over a freshly fetched server
//! copy: the user navigates between wizard steps on separate routes, and a
//! naive always-refetch policy would erase step 1 edits when step 2 loads.

use std::sync::Arc;

use souk_core::models::{Draft, PublishedAd};

use crate::snapshot::SnapshotStore;

/// Resolve to `local` if it is non-blank, else `remote`, else a blank draft.
pub fn reconcile(remote: Option<Draft>, local: Option<Draft>) -> Draft {
    match local {
        Some(local) if !local.is_blank() => local,
        _ => remote.unwrap_or_else(Draft::blank),
    }
}

/// Wizard-entry recovery over a snapshot store.
pub struct RecoveryAdapter {
    snapshot: Arc<dyn SnapshotStore>,
    snapshot_key: String,
}

impl RecoveryAdapter {
    pub fn new(snapshot: Arc<dyn SnapshotStore>, snapshot_key: impl Into<String>) -> Self {
        RecoveryAdapter {
            snapshot,
            snapshot_key: snapshot_key.into(),
        }
    }

    /// Read the durable snapshot. Storage errors are logged and treated as
    /// "no recovery data", like corrupt snapshots.
    pub async fn load(&self) -> Option<Draft> {
        match self.snapshot.load(&self.snapshot_key).await {
            Ok(draft) => draft,
            Err(e) => {
                tracing::warn!(key = %self.snapshot_key, error = %e, "snapshot load failed; starting without recovery data");
                None
            }
        }
    }

    /// Resolve the draft to resume with: the in-memory draft if one is
    /// carried over, else the snapshot, else a seed built from the fetched
    /// ad (edit flow), else blank.
    pub async fn recover(&self, in_memory: Option<Draft>, fetched: Option<&PublishedAd>) -> Draft {
        let seed = fetched.map(Draft::seeded_from);
        let local = reconcile(self.load().await, in_memory);
        reconcile(seed, Some(local))
    }
}
