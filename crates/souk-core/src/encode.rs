//! Submission encoder: pure transformation from a completed draft into a
//! flat multipart payload.
//!
//! The encoder produces a transport-free `SubmissionPayload` so it can be
//! unit-tested without a network stack; `souk-client` turns it into a
//! `reqwest` multipart form. Field inclusion rules:
//!
//! - only defined, non-empty values are included; booleans are always
//!   included as `"true"`/`"false"`;
//! - `quantity` is omitted entirely when `recurring` is false, and the
//!   discount percent fields when the discount flag is off;
//! - nested structures (`socialLinks`, `features`, `removedImages`) are
//!   JSON-stringified into a single field;
//! - in edit mode only newly added blobs are appended; retained existing
//!   images are never re-uploaded;
//! - variant fields of inactive ad types cannot leak because the draft's
//!   details are a tagged union.
//!
//! The encoder never fails silently: a required field absent at encode time
//! raises `AppError::DraftIncomplete` naming the field.

use bytes::Bytes;
use serde_json::json;

use crate::error::AppError;
use crate::models::{
    Draft, EventDetails, ExploreDetails, OfferDetails, ProductDetails, ServiceDetails,
    VariantDetails,
};
use uuid::Uuid;

/// Shared multipart key for image blobs.
pub const IMAGES_KEY: &str = "images";

/// Where the payload should be sent: ad creation or an edit of an existing ad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionTarget {
    Create,
    Update(Uuid),
}

/// One file part of the multipart payload.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    pub field_name: &'static str,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Flat multipart payload: ordered text fields plus file parts.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionPayload {
    pub target: SubmissionTarget,
    pub fields: Vec<(String, String)>,
    pub files: Vec<FilePart>,
}

impl SubmissionPayload {
    /// First value for the given field key, for inspection and tests.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }
}

/// Encode a completed draft into its multipart payload.
pub fn encode(draft: &Draft) -> Result<SubmissionPayload, AppError> {
    let details = draft
        .details
        .as_ref()
        .ok_or(AppError::DraftIncomplete { field: "adType" })?;

    let mut fields: Vec<(String, String)> = Vec::new();
    let mut files: Vec<FilePart> = Vec::new();

    push_field(&mut fields, "adType", details.ad_type().as_str());
    push_required(&mut fields, "title", &draft.title)?;
    push_required(&mut fields, "description", &draft.description)?;
    push_bool(
        &mut fields,
        "locationSameAsProfile",
        draft.location_same_as_profile,
    );
    if draft.location_same_as_profile {
        push_optional(&mut fields, "city", &draft.city);
        push_optional(&mut fields, "neighbourhood", &draft.neighbourhood);
    } else {
        push_required(&mut fields, "city", &draft.city)?;
        push_required(&mut fields, "neighbourhood", &draft.neighbourhood)?;
    }
    push_bool(&mut fields, "showPhone", draft.show_phone);
    if draft.show_phone {
        push_required(&mut fields, "phone", &draft.phone)?;
    } else {
        push_optional(&mut fields, "phone", &draft.phone);
    }
    push_field(&mut fields, "paymentMode", draft.payment_mode.as_str());

    match details {
        VariantDetails::Product(p) => encode_product(&mut fields, p)?,
        VariantDetails::Service(s) => encode_service(&mut fields, s)?,
        VariantDetails::Event(e) => encode_event(&mut fields, e)?,
        VariantDetails::Offer(o) => encode_offer(&mut fields, o)?,
        VariantDetails::Explore(x) => encode_explore(&mut fields, x)?,
    }

    encode_images(draft, &mut fields, &mut files)?;

    let target = match draft.editing_ad_id {
        Some(id) => SubmissionTarget::Update(id),
        None => SubmissionTarget::Create,
    };

    Ok(SubmissionPayload {
        target,
        fields,
        files,
    })
}

fn encode_product(fields: &mut Vec<(String, String)>, p: &ProductDetails) -> Result<(), AppError> {
    push_required(fields, "category", &p.category)?;
    push_required(fields, "subCategory", &p.sub_category)?;
    push_positive(fields, "askingPrice", p.asking_price)?;
    push_bool(fields, "recurring", p.recurring);
    if p.recurring {
        // Quantity is meaningless for one-off products and is omitted there.
        match p.quantity {
            Some(q) if q > 0 => push_field(fields, "quantity", q.to_string()),
            _ => return Err(AppError::DraftIncomplete { field: "quantity" }),
        }
    }
    push_bool(fields, "discount", p.discount);
    if p.discount {
        push_percent(fields, "discountPercent", p.discount_percent)?;
    }
    Ok(())
}

fn encode_service(fields: &mut Vec<(String, String)>, s: &ServiceDetails) -> Result<(), AppError> {
    push_required(fields, "category", &s.category)?;
    push_required(fields, "subCategory", &s.sub_category)?;
    push_required(fields, "serviceType", &s.service_type)?;
    push_positive(fields, "servicePrice", s.service_price)
}

fn encode_event(fields: &mut Vec<(String, String)>, e: &EventDetails) -> Result<(), AppError> {
    push_required(fields, "eventType", &e.event_type)?;
    let date = e
        .event_date
        .ok_or(AppError::DraftIncomplete { field: "eventDate" })?;
    let start = e
        .event_time
        .ok_or(AppError::DraftIncomplete { field: "eventTime" })?;
    let end = e
        .end_time
        .ok_or(AppError::DraftIncomplete { field: "endTime" })?;
    push_field(fields, "eventDate", date.format("%Y-%m-%d").to_string());
    push_field(fields, "eventTime", start.format("%H:%M").to_string());
    push_field(fields, "endTime", end.format("%H:%M").to_string());
    if !e.features.is_empty() {
        let features: Vec<&str> = e.features.iter().map(String::as_str).collect();
        push_field(fields, "features", json!(features).to_string());
    }
    Ok(())
}

fn encode_offer(fields: &mut Vec<(String, String)>, o: &OfferDetails) -> Result<(), AppError> {
    let expiry = o.expiry_date.ok_or(AppError::DraftIncomplete {
        field: "expiryDate",
    })?;
    push_field(fields, "expiryDate", expiry.format("%Y-%m-%d").to_string());
    push_required(fields, "category", &o.category)?;
    push_positive(fields, "fullPrice", o.full_price)?;
    push_bool(fields, "discountDeal", o.discount_deal);
    if o.discount_deal {
        push_percent(fields, "discountPercent", o.discount_percent)?;
    } else {
        push_required(fields, "offerDetail", &o.offer_detail)?;
    }
    Ok(())
}

fn encode_explore(fields: &mut Vec<(String, String)>, x: &ExploreDetails) -> Result<(), AppError> {
    push_required(fields, "exploreName", &x.explore_name)?;
    push_required(fields, "exploreDescription", &x.explore_description)?;
    let start = x
        .start_time
        .ok_or(AppError::DraftIncomplete { field: "startTime" })?;
    let end = x
        .end_time
        .ok_or(AppError::DraftIncomplete { field: "endTime" })?;
    push_field(fields, "startTime", start.format("%H:%M").to_string());
    push_field(fields, "endTime", end.format("%H:%M").to_string());
    if let Some(links) = &x.social_links {
        let encoded = serde_json::to_string(links).map_err(|e| AppError::InternalWithSource {
            message: "failed to serialize social links".to_string(),
            source: e.into(),
        })?;
        push_field(fields, "socialLinks", encoded);
    }
    Ok(())
}

fn encode_images(
    draft: &Draft,
    fields: &mut Vec<(String, String)>,
    files: &mut Vec<FilePart>,
) -> Result<(), AppError> {
    if !draft.has_images() {
        return Err(AppError::DraftIncomplete { field: "images" });
    }
    match &draft.image_diff {
        Some(diff) => {
            let removed: Vec<usize> = diff.removed_existing.iter().copied().collect();
            push_field(fields, "removedImages", json!(removed).to_string());
            for image in &diff.new_images {
                files.push(to_file_part(image));
            }
        }
        None => {
            for image in &draft.images {
                files.push(to_file_part(image));
            }
        }
    }
    Ok(())
}

fn to_file_part(image: &crate::models::PendingImage) -> FilePart {
    FilePart {
        field_name: IMAGES_KEY,
        file_name: image.file_name.clone(),
        content_type: image.content_type.clone(),
        bytes: image.bytes.clone(),
    }
}

fn push_field(fields: &mut Vec<(String, String)>, name: &str, value: impl Into<String>) {
    fields.push((name.to_string(), value.into()));
}

fn push_bool(fields: &mut Vec<(String, String)>, name: &str, value: bool) {
    push_field(fields, name, if value { "true" } else { "false" });
}

fn push_required(
    fields: &mut Vec<(String, String)>,
    name: &'static str,
    value: &str,
) -> Result<(), AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::DraftIncomplete { field: name });
    }
    push_field(fields, name, trimmed);
    Ok(())
}

fn push_optional(fields: &mut Vec<(String, String)>, name: &str, value: &str) {
    let trimmed = value.trim();
    if !trimmed.is_empty() {
        push_field(fields, name, trimmed);
    }
}

fn push_positive(
    fields: &mut Vec<(String, String)>,
    name: &'static str,
    value: Option<f64>,
) -> Result<(), AppError> {
    match value {
        Some(v) if v > 0.0 => {
            push_field(fields, name, format_number(v));
            Ok(())
        }
        _ => Err(AppError::DraftIncomplete { field: name }),
    }
}

fn push_percent(
    fields: &mut Vec<(String, String)>,
    name: &'static str,
    value: Option<f64>,
) -> Result<(), AppError> {
    match value {
        // 0 is a legal percent; only out-of-bounds and absent values fail.
        Some(v) if (0.0..=100.0).contains(&v) => {
            push_field(fields, name, format_number(v));
            Ok(())
        }
        _ => Err(AppError::DraftIncomplete { field: name }),
    }
}

/// Integral values print without a trailing `.0` so `25.0` encodes as `25`.
fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}
