//! Service step: category, service type and price.

use souk_core::models::{AdType, Draft, ServiceDetails, VariantDetails};
use souk_core::validation::variant_field_errors;
use souk_store::DraftPatch;

#[derive(Debug, Clone, Default)]
pub struct ServiceInput {
    pub category: String,
    pub sub_category: String,
    pub service_type: String,
    pub service_price: Option<f64>,
}

impl ServiceInput {
    pub fn into_patch(self) -> DraftPatch {
        DraftPatch {
            details: Some(VariantDetails::Service(ServiceDetails {
                category: self.category,
                sub_category: self.sub_category,
                service_type: self.service_type,
                service_price: self.service_price,
            })),
            ..Default::default()
        }
    }
}

pub fn can_advance(draft: &Draft) -> bool {
    draft.ad_type() == Some(AdType::Service) && variant_field_errors(draft).is_empty()
}
