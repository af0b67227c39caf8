//! The draft store: lifecycle-scoped mutable state for the ad being composed.
//!
//! There is exactly one writer (the current UI flow), so the store is an
//! explicitly owned handle passed to the step controllers rather than an
//! ambient global. Every mutation persists the snapshot; persistence
//! failures are logged and never fail the mutation (the caller's update
//! already happened in memory and must not be rolled back over a disk
//! hiccup).

use std::sync::Arc;

use souk_core::config::WizardConfig;
use souk_core::models::{AdType, Draft, PaymentMode, PendingImage, PublishedAd, VariantDetails};

use crate::snapshot::SnapshotStore;

/// Shallow partial update over the draft's common fields. `None` leaves the
/// field untouched, so steps can update disjoint fields without clobbering
/// each other.
#[derive(Debug, Clone, Default)]
pub struct DraftPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location_same_as_profile: Option<bool>,
    pub city: Option<String>,
    pub neighbourhood: Option<String>,
    pub phone: Option<String>,
    pub show_phone: Option<bool>,
    pub payment_mode: Option<PaymentMode>,
    /// Replaces the active variant's details wholesale. Must carry the same
    /// ad type as the draft; type switches go through `select_type`.
    pub details: Option<VariantDetails>,
}

impl DraftPatch {
    fn apply(self, draft: &mut Draft) {
        if let Some(v) = self.title {
            draft.title = v;
        }
        if let Some(v) = self.description {
            draft.description = v;
        }
        if let Some(v) = self.location_same_as_profile {
            draft.location_same_as_profile = v;
        }
        if let Some(v) = self.city {
            draft.city = v;
        }
        if let Some(v) = self.neighbourhood {
            draft.neighbourhood = v;
        }
        if let Some(v) = self.phone {
            draft.phone = v;
        }
        if let Some(v) = self.show_phone {
            draft.show_phone = v;
        }
        if let Some(v) = self.payment_mode {
            draft.payment_mode = v;
        }
        if let Some(v) = self.details {
            draft.details = Some(v);
        }
    }
}

/// Owned draft state plus its durable snapshot.
pub struct DraftStore {
    draft: Draft,
    snapshot: Arc<dyn SnapshotStore>,
    snapshot_key: String,
    error_message: Option<String>,
    is_loading: bool,
    max_images: usize,
}

impl DraftStore {
    /// Blank store (create flow entry).
    pub fn new(snapshot: Arc<dyn SnapshotStore>, snapshot_key: impl Into<String>) -> Self {
        DraftStore {
            draft: Draft::blank(),
            snapshot,
            snapshot_key: snapshot_key.into(),
            error_message: None,
            is_loading: false,
            max_images: WizardConfig::default().max_images,
        }
    }

    /// Override the image limit (wired from `SOUK_MAX_IMAGES`).
    pub fn with_max_images(mut self, max_images: usize) -> Self {
        self.max_images = max_images;
        self
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn snapshot_key(&self) -> &str {
        &self.snapshot_key
    }

    /// Install a recovered or seeded draft, replacing the current one.
    pub async fn install(&mut self, draft: Draft) {
        self.draft = draft;
        self.persist().await;
    }

    /// Seed the store from a fetched published ad (edit flow).
    pub async fn seed_from(&mut self, ad: &PublishedAd) {
        self.install(Draft::seeded_from(ad)).await;
    }

    /// Shallow-merge a patch into the draft and persist.
    pub async fn update(&mut self, patch: DraftPatch) {
        patch.apply(&mut self.draft);
        self.persist().await;
    }

    /// Select or switch the ad type; switching resets variant fields.
    pub async fn select_type(&mut self, ad_type: AdType) {
        self.draft.select_type(ad_type);
        self.persist().await;
    }

    /// Add a pending image (create mode). Returns false in edit mode, where
    /// new images must go through `push_new_image` to reach the diff, and
    /// when the image limit is reached.
    pub async fn push_image(&mut self, image: PendingImage) -> bool {
        if self.draft.is_edit_mode() || self.image_count() >= self.max_images {
            return false;
        }
        self.draft.images.push(image);
        self.persist().await;
        true
    }

    /// Remove a pending image by position. Returns false if out of range.
    pub async fn remove_image(&mut self, index: usize) -> bool {
        if index >= self.draft.images.len() {
            return false;
        }
        self.draft.images.remove(index);
        self.persist().await;
        true
    }

    /// Add a newly selected image in edit mode. Retained existing images
    /// count toward the limit.
    pub async fn push_new_image(&mut self, image: PendingImage) -> bool {
        if self.image_count() >= self.max_images {
            return false;
        }
        match self.draft.image_diff.as_mut() {
            Some(diff) => {
                diff.new_images.push(image);
                self.persist().await;
                true
            }
            None => false,
        }
    }

    /// Mark an existing image (by its index in the original ad's list) as
    /// removed. Returns false outside edit mode or out of range.
    pub async fn remove_existing_image(&mut self, original_index: usize) -> bool {
        match self.draft.image_diff.as_mut() {
            Some(diff) if original_index < diff.original_image_count => {
                diff.removed_existing.insert(original_index);
                self.persist().await;
                true
            }
            _ => false,
        }
    }

    /// Undo the removal of an existing image.
    pub async fn restore_existing_image(&mut self, original_index: usize) -> bool {
        match self.draft.image_diff.as_mut() {
            Some(diff) => {
                let restored = diff.removed_existing.remove(&original_index);
                if restored {
                    self.persist().await;
                }
                restored
            }
            None => false,
        }
    }

    /// Reset to a type-less blank draft and clear the snapshot. The clear
    /// happens after the in-memory reset, so a reset always writes last.
    pub async fn reset(&mut self) {
        self.draft = Draft::blank();
        self.error_message = None;
        if let Err(e) = self.snapshot.clear(&self.snapshot_key).await {
            tracing::warn!(key = %self.snapshot_key, error = %e, "failed to clear draft snapshot");
        }
    }

    /// Reset the draft but keep the currently selected ad type.
    pub async fn reset_keeping_type(&mut self) {
        let ad_type = self.draft.ad_type();
        self.draft = Draft::blank();
        if let Some(ad_type) = ad_type {
            self.draft.select_type(ad_type);
        }
        self.error_message = None;
        self.persist().await;
    }

    /// Attach a surfaced error message (e.g. a gateway rejection).
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    pub fn take_error(&mut self) -> Option<String> {
        self.error_message.take()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Loading flag for wizard entry (seed fetch or snapshot load in
    /// progress). UI-facing; nothing in the pipeline branches on it.
    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Images counting toward the limit: pending uploads in create mode,
    /// retained plus newly added ones in edit mode.
    fn image_count(&self) -> usize {
        match &self.draft.image_diff {
            Some(diff) => diff.retained_count() + diff.new_images.len(),
            None => self.draft.images.len(),
        }
    }

    async fn persist(&self) {
        if let Err(e) = self.snapshot.save(&self.snapshot_key, &self.draft).await {
            tracing::warn!(key = %self.snapshot_key, error = %e, "failed to persist draft snapshot");
        }
    }
}
