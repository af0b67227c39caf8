//! Offer step: expiry, price and the discount-or-detail choice.

use chrono::NaiveDate;
use souk_core::models::{AdType, Draft, OfferDetails, VariantDetails};
use souk_core::validation::variant_field_errors;
use souk_store::DraftPatch;

#[derive(Debug, Clone, Default)]
pub struct OfferInput {
    pub expiry_date: Option<NaiveDate>,
    pub category: String,
    pub full_price: Option<f64>,
    pub discount_deal: bool,
    pub discount_percent: Option<f64>,
    pub offer_detail: String,
}

impl OfferInput {
    pub fn into_patch(self) -> DraftPatch {
        DraftPatch {
            details: Some(VariantDetails::Offer(OfferDetails {
                expiry_date: self.expiry_date,
                category: self.category,
                full_price: self.full_price,
                discount_deal: self.discount_deal,
                discount_percent: self.discount_percent,
                offer_detail: self.offer_detail,
            })),
            ..Default::default()
        }
    }
}

pub fn can_advance(draft: &Draft) -> bool {
    draft.ad_type() == Some(AdType::Offer) && variant_field_errors(draft).is_empty()
}
