//! Terminal billing/submit step.
//!
//! The billing step re-validates the entire draft, not just its own fields:
//! the user may have navigated backward and invalidated an earlier step's
//! data since it was last gated.

use souk_core::models::{Draft, PaymentMode};
use souk_core::validation::{field_errors, FieldError};
use souk_store::DraftPatch;

#[derive(Debug, Clone, Default)]
pub struct BillingInput {
    pub payment_mode: Option<PaymentMode>,
}

impl BillingInput {
    pub fn into_patch(self) -> DraftPatch {
        DraftPatch {
            payment_mode: self.payment_mode,
            ..Default::default()
        }
    }
}

/// Whole-draft readiness check, run immediately before encoding.
pub fn ready_to_submit(draft: &Draft) -> Result<(), FieldError> {
    match field_errors(draft).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
