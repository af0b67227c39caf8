//! Product step: category, price, recurring quantity, discount.

use souk_core::models::{AdType, Draft, ProductDetails, VariantDetails};
use souk_core::validation::variant_field_errors;
use souk_store::DraftPatch;

#[derive(Debug, Clone, Default)]
pub struct ProductInput {
    pub category: String,
    pub sub_category: String,
    pub asking_price: Option<f64>,
    pub recurring: bool,
    pub quantity: Option<u32>,
    pub discount: bool,
    pub discount_percent: Option<f64>,
}

impl ProductInput {
    pub fn into_patch(self) -> DraftPatch {
        DraftPatch {
            details: Some(VariantDetails::Product(ProductDetails {
                category: self.category,
                sub_category: self.sub_category,
                asking_price: self.asking_price,
                recurring: self.recurring,
                quantity: self.quantity,
                discount: self.discount,
                discount_percent: self.discount_percent,
            })),
            ..Default::default()
        }
    }
}

pub fn can_advance(draft: &Draft) -> bool {
    draft.ad_type() == Some(AdType::Product) && variant_field_errors(draft).is_empty()
}
