//! Explore/place step: name, description, opening hours, social links.

use chrono::NaiveTime;
use souk_core::models::{AdType, Draft, ExploreDetails, SocialLinks, VariantDetails};
use souk_core::validation::variant_field_errors;
use souk_store::DraftPatch;

#[derive(Debug, Clone, Default)]
pub struct ExploreInput {
    pub explore_name: String,
    pub explore_description: String,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub social_links: Option<SocialLinks>,
}

impl ExploreInput {
    pub fn into_patch(self) -> DraftPatch {
        DraftPatch {
            details: Some(VariantDetails::Explore(ExploreDetails {
                explore_name: self.explore_name,
                explore_description: self.explore_description,
                start_time: self.start_time,
                end_time: self.end_time,
                social_links: self.social_links,
            })),
            ..Default::default()
        }
    }
}

pub fn can_advance(draft: &Draft) -> bool {
    draft.ad_type() == Some(AdType::Explore) && variant_field_errors(draft).is_empty()
}
