//! The draft record: the in-progress, not-yet-submitted representation of an
//! ad being created or edited.
//!
//! A draft accumulates input across independently routed wizard steps. The
//! common fields are present for every variant; variant-specific fields live
//! behind `details` so exactly one ad type is ever active. File blobs are
//! kept only in memory (`#[serde(skip)]`) and do not survive a full reload;
//! the durable snapshot carries everything else.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use super::ad::PublishedAd;
use super::variant::VariantDetails;

/// Ad type discriminant. Determines which fields and validation rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdType {
    Product,
    Service,
    Event,
    Offer,
    Explore,
}

impl AdType {
    /// Wire name used in multipart payloads and field errors.
    pub fn as_str(&self) -> &'static str {
        match self {
            AdType::Product => "product",
            AdType::Service => "service",
            AdType::Event => "event",
            AdType::Offer => "offer",
            AdType::Explore => "explore",
        }
    }

    pub const ALL: [AdType; 5] = [
        AdType::Product,
        AdType::Service,
        AdType::Event,
        AdType::Offer,
        AdType::Explore,
    ];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    #[default]
    Monthly,
    Annual,
}

impl PaymentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Monthly => "monthly",
            PaymentMode::Annual => "annual",
        }
    }
}

/// A newly selected image file waiting to be uploaded with the submission.
/// The blob never reaches the snapshot, so pending images are lost on a full
/// page reload (documented limitation, not a bug).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl PendingImage {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        PendingImage {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }
}

/// Edit-mode image bookkeeping, kept disjoint from the create-mode `images`
/// field so the encoder can compute a diff instead of a full replace.
///
/// `removed_existing` holds indices into the original ad's image list as it
/// was at load time, never into a mutated list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageDiff {
    pub original_image_count: usize,
    pub removed_existing: BTreeSet<usize>,
    #[serde(skip)]
    pub new_images: Vec<PendingImage>,
}

impl ImageDiff {
    /// Existing images the user has not removed.
    pub fn retained_count(&self) -> usize {
        self.original_image_count
            .saturating_sub(self.removed_existing.len())
    }
}

/// The central entity of the pipeline. Mutated exclusively through the draft
/// store; destroyed (reset to blank) on successful submission or explicit
/// cancellation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Draft {
    pub title: String,
    pub description: String,
    #[serde(skip)]
    pub images: Vec<PendingImage>,
    pub location_same_as_profile: bool,
    pub city: String,
    pub neighbourhood: String,
    pub phone: String,
    pub show_phone: bool,
    pub payment_mode: PaymentMode,
    pub details: Option<VariantDetails>,
    pub image_diff: Option<ImageDiff>,
    pub editing_ad_id: Option<Uuid>,
}

impl Draft {
    /// Type-less blank draft, the starting point of a create flow.
    pub fn blank() -> Self {
        Draft::default()
    }

    /// Draft seeded from a fetched, already-published ad (edit flow). The
    /// image diff starts zeroed against the ad's stored image list.
    pub fn seeded_from(ad: &PublishedAd) -> Self {
        Draft {
            title: ad.title.clone(),
            description: ad.description.clone(),
            images: Vec::new(),
            location_same_as_profile: ad.location_same_as_profile,
            city: ad.city.clone(),
            neighbourhood: ad.neighbourhood.clone(),
            phone: ad.phone.clone(),
            show_phone: ad.show_phone,
            payment_mode: ad.payment_mode,
            details: Some(ad.details.clone()),
            image_diff: Some(ImageDiff {
                original_image_count: ad.image_urls.len(),
                ..Default::default()
            }),
            editing_ad_id: Some(ad.id),
        }
    }

    pub fn ad_type(&self) -> Option<AdType> {
        self.details.as_ref().map(VariantDetails::ad_type)
    }

    /// Select or switch the ad type. Switching resets all variant-specific
    /// fields so stale cross-variant data cannot leak; re-selecting the
    /// already active type keeps its fields.
    pub fn select_type(&mut self, ad_type: AdType) {
        if self.ad_type() != Some(ad_type) {
            self.details = Some(VariantDetails::blank(ad_type));
        }
    }

    pub fn is_blank(&self) -> bool {
        *self == Draft::blank()
    }

    pub fn is_edit_mode(&self) -> bool {
        self.image_diff.is_some()
    }

    /// Whether the draft carries at least one image: a pending upload in
    /// create mode, or a retained existing or newly added one in edit mode.
    pub fn has_images(&self) -> bool {
        match &self.image_diff {
            Some(diff) => diff.retained_count() > 0 || !diff.new_images.is_empty(),
            None => !self.images.is_empty(),
        }
    }
}
