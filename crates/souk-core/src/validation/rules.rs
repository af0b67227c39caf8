//! Per-variant validation rules.
//!
//! All rules are total functions of the draft: they never panic and a
//! missing optional field is never an error. Empty strings and missing
//! fields are treated identically (both invalid where the field is
//! required). Bounds are explicit rather than truthiness-based: strictly
//! positive for prices and quantity, inclusive 0..=100 for discount
//! percents (a 0% discount is valid, a price of 0 is not).

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::models::{Draft, EventDetails, ExploreDetails, OfferDetails, ProductDetails};
use crate::models::{AdType, ServiceDetails, VariantDetails};

pub const MAX_TITLE_LEN: usize = 70;
pub const MAX_DESCRIPTION_LEN: usize = 1000;
pub const MAX_OFFER_DETAIL_LEN: usize = 70;

/// A single unmet field requirement. Field names use the wire (camelCase)
/// spelling so they match the submission payload keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        FieldError {
            field,
            message: message.into(),
        }
    }

    fn required(field: &'static str) -> Self {
        Self::new(field, format!("{field} is required"))
    }
}

/// Required fields per ad type, the registry's fixed tag-to-fields mapping.
/// Conditionally required fields (e.g. `quantity` when recurring) are not
/// listed; they are enforced by the rule functions below.
pub fn required_fields(ad_type: AdType) -> &'static [&'static str] {
    match ad_type {
        AdType::Product => &["category", "subCategory", "askingPrice"],
        AdType::Service => &["category", "subCategory", "serviceType", "servicePrice"],
        AdType::Event => &["eventType", "eventDate", "eventTime", "endTime"],
        AdType::Offer => &["expiryDate", "category", "fullPrice"],
        AdType::Explore => &["exploreName", "exploreDescription", "startTime", "endTime"],
    }
}

/// All unmet requirements of the draft, common fields first, evaluated
/// against the given wall-clock time.
pub fn field_errors_at(draft: &Draft, now: DateTime<Utc>) -> Vec<FieldError> {
    let mut errors = common_field_errors(draft);
    errors.extend(variant_field_errors_at(draft, now));
    errors
}

pub fn field_errors(draft: &Draft) -> Vec<FieldError> {
    field_errors_at(draft, Utc::now())
}

pub fn is_valid_at(draft: &Draft, now: DateTime<Utc>) -> bool {
    field_errors_at(draft, now).is_empty()
}

/// Whether the draft is submittable: every required field for its active
/// variant validates and at least one image exists.
pub fn is_valid(draft: &Draft) -> bool {
    is_valid_at(draft, Utc::now())
}

/// First unmet requirement, used for step-gating toasts.
pub fn first_unmet(draft: &Draft) -> Option<FieldError> {
    field_errors(draft).into_iter().next()
}

/// Rules for the shared general-info step: title, description, images,
/// location, phone. City and neighbourhood are only required when the
/// location differs from the profile; the phone only when it is shown.
pub fn common_field_errors(draft: &Draft) -> Vec<FieldError> {
    let mut errors = Vec::new();

    check_text(&mut errors, "title", &draft.title, MAX_TITLE_LEN);
    check_text(
        &mut errors,
        "description",
        &draft.description,
        MAX_DESCRIPTION_LEN,
    );

    if !draft.has_images() {
        errors.push(FieldError::new("images", "at least one image is required"));
    }

    if !draft.location_same_as_profile {
        if draft.city.trim().is_empty() {
            errors.push(FieldError::required("city"));
        }
        if draft.neighbourhood.trim().is_empty() {
            errors.push(FieldError::required("neighbourhood"));
        }
    }

    if draft.show_phone && draft.phone.trim().is_empty() {
        errors.push(FieldError::required("phone"));
    }

    errors
}

/// Rules for the active variant's step. A draft with no selected type fails
/// with a single `adType` error.
pub fn variant_field_errors_at(draft: &Draft, now: DateTime<Utc>) -> Vec<FieldError> {
    match &draft.details {
        None => vec![FieldError::new("adType", "an ad type must be selected")],
        Some(VariantDetails::Product(p)) => product_errors(p),
        Some(VariantDetails::Service(s)) => service_errors(s),
        Some(VariantDetails::Event(e)) => event_errors(e, now),
        Some(VariantDetails::Offer(o)) => offer_errors(o, now),
        Some(VariantDetails::Explore(x)) => explore_errors(x),
    }
}

pub fn variant_field_errors(draft: &Draft) -> Vec<FieldError> {
    variant_field_errors_at(draft, Utc::now())
}

fn product_errors(p: &ProductDetails) -> Vec<FieldError> {
    let mut errors = Vec::new();

    check_required(&mut errors, "category", &p.category);
    check_required(&mut errors, "subCategory", &p.sub_category);
    check_positive(&mut errors, "askingPrice", p.asking_price);

    if p.recurring && !p.quantity.is_some_and(|q| q > 0) {
        errors.push(FieldError::new("quantity", "quantity must be greater than 0"));
    }
    if p.discount {
        check_percent(&mut errors, "discountPercent", p.discount_percent);
    }

    errors
}

fn service_errors(s: &ServiceDetails) -> Vec<FieldError> {
    let mut errors = Vec::new();

    check_required(&mut errors, "category", &s.category);
    check_required(&mut errors, "subCategory", &s.sub_category);
    check_required(&mut errors, "serviceType", &s.service_type);
    check_positive(&mut errors, "servicePrice", s.service_price);

    errors
}

fn event_errors(e: &EventDetails, now: DateTime<Utc>) -> Vec<FieldError> {
    let mut errors = Vec::new();

    check_required(&mut errors, "eventType", &e.event_type);

    match (e.event_date, e.event_time) {
        (Some(date), Some(time)) => {
            let starts_at = NaiveDateTime::new(date, time);
            if starts_at <= now.naive_utc() {
                errors.push(FieldError::new(
                    "eventDate",
                    "the event must start in the future",
                ));
            }
        }
        (date, time) => {
            if date.is_none() {
                errors.push(FieldError::required("eventDate"));
            }
            if time.is_none() {
                errors.push(FieldError::required("eventTime"));
            }
        }
    }

    match e.end_time {
        None => errors.push(FieldError::required("endTime")),
        Some(end) => {
            if e.event_time.is_some_and(|start| end <= start) {
                errors.push(FieldError::new(
                    "endTime",
                    "end time must be after the start time",
                ));
            }
        }
    }

    errors
}

fn offer_errors(o: &OfferDetails, now: DateTime<Utc>) -> Vec<FieldError> {
    let mut errors = Vec::new();

    match o.expiry_date {
        None => errors.push(FieldError::required("expiryDate")),
        Some(expiry) => {
            if expiry <= now.date_naive() {
                errors.push(FieldError::new(
                    "expiryDate",
                    "expiry date must be in the future",
                ));
            }
        }
    }

    check_required(&mut errors, "category", &o.category);
    check_positive(&mut errors, "fullPrice", o.full_price);

    if o.discount_deal {
        check_percent(&mut errors, "discountPercent", o.discount_percent);
    } else {
        check_text(
            &mut errors,
            "offerDetail",
            &o.offer_detail,
            MAX_OFFER_DETAIL_LEN,
        );
    }

    errors
}

fn explore_errors(x: &ExploreDetails) -> Vec<FieldError> {
    let mut errors = Vec::new();

    check_text(&mut errors, "exploreName", &x.explore_name, MAX_TITLE_LEN);
    check_text(
        &mut errors,
        "exploreDescription",
        &x.explore_description,
        MAX_DESCRIPTION_LEN,
    );

    match (x.start_time, x.end_time) {
        (Some(start), Some(end)) => {
            if end <= start {
                errors.push(FieldError::new(
                    "endTime",
                    "end time must be after the start time",
                ));
            }
        }
        (start, end) => {
            if start.is_none() {
                errors.push(FieldError::required("startTime"));
            }
            if end.is_none() {
                errors.push(FieldError::required("endTime"));
            }
        }
    }

    errors
}

fn check_required(errors: &mut Vec<FieldError>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::required(field));
    }
}

fn check_text(errors: &mut Vec<FieldError>, field: &'static str, value: &str, max_len: usize) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(FieldError::required(field));
    } else if trimmed.chars().count() > max_len {
        errors.push(FieldError::new(
            field,
            format!("{field} must be at most {max_len} characters"),
        ));
    }
}

fn check_positive(errors: &mut Vec<FieldError>, field: &'static str, value: Option<f64>) {
    match value {
        None => errors.push(FieldError::required(field)),
        Some(v) if v <= 0.0 => errors.push(FieldError::new(
            field,
            format!("{field} must be greater than 0"),
        )),
        Some(_) => {}
    }
}

fn check_percent(errors: &mut Vec<FieldError>, field: &'static str, value: Option<f64>) {
    match value {
        None => errors.push(FieldError::required(field)),
        Some(v) if !(0.0..=100.0).contains(&v) => errors.push(FieldError::new(
            field,
            format!("{field} must be between 0 and 100"),
        )),
        Some(_) => {}
    }
}
