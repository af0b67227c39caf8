//! Variant schema registry: the fixed mapping from ad type to required
//! fields and their validators.

pub mod rules;

pub use rules::{
    common_field_errors, field_errors, field_errors_at, first_unmet, is_valid, is_valid_at,
    required_fields, variant_field_errors, variant_field_errors_at, FieldError,
    MAX_DESCRIPTION_LEN, MAX_OFFER_DETAIL_LEN, MAX_TITLE_LEN,
};
