//! Variant-specific ad details.
//!
//! The five ad variants carry overlapping but divergent field sets. They are
//! modeled as an internally tagged enum so cross-variant field access is a
//! type error rather than a runtime branch on a loosely typed object.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::draft::AdType;

/// Product ad fields. Price and quantity are strictly positive; a discount
/// percent of 0 is a legal value (0% off), so percent bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductDetails {
    pub category: String,
    pub sub_category: String,
    pub asking_price: Option<f64>,
    pub recurring: bool,
    pub quantity: Option<u32>,
    pub discount: bool,
    pub discount_percent: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceDetails {
    pub category: String,
    pub sub_category: String,
    pub service_type: String,
    pub service_price: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventDetails {
    pub event_type: String,
    pub event_date: Option<NaiveDate>,
    pub event_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub features: BTreeSet<String>,
}

/// Offer ad fields. An offer is either a discount deal (percent required)
/// or a described deal (`offer_detail` required), never both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OfferDetails {
    pub expiry_date: Option<NaiveDate>,
    pub category: String,
    pub full_price: Option<f64>,
    pub discount_deal: bool,
    pub discount_percent: Option<f64>,
    pub offer_detail: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExploreDetails {
    pub explore_name: String,
    pub explore_description: String,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub social_links: Option<SocialLinks>,
}

/// Social links for explore/place ads. Encoded as a single JSON-stringified
/// multipart field rather than flattened into multiple keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
}

/// Tagged union over the five ad variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "adType", rename_all = "lowercase")]
pub enum VariantDetails {
    Product(ProductDetails),
    Service(ServiceDetails),
    Event(EventDetails),
    Offer(OfferDetails),
    Explore(ExploreDetails),
}

impl VariantDetails {
    /// Blank details for the given ad type, used when a type is first
    /// selected and when switching type resets variant fields.
    pub fn blank(ad_type: AdType) -> Self {
        match ad_type {
            AdType::Product => VariantDetails::Product(ProductDetails::default()),
            AdType::Service => VariantDetails::Service(ServiceDetails::default()),
            AdType::Event => VariantDetails::Event(EventDetails::default()),
            AdType::Offer => VariantDetails::Offer(OfferDetails::default()),
            AdType::Explore => VariantDetails::Explore(ExploreDetails::default()),
        }
    }

    pub fn ad_type(&self) -> AdType {
        match self {
            VariantDetails::Product(_) => AdType::Product,
            VariantDetails::Service(_) => AdType::Service,
            VariantDetails::Event(_) => AdType::Event,
            VariantDetails::Offer(_) => AdType::Offer,
            VariantDetails::Explore(_) => AdType::Explore,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_serializes_with_ad_type_tag() {
        let details = VariantDetails::Product(ProductDetails {
            category: "home".to_string(),
            asking_price: Some(25.0),
            ..Default::default()
        });
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["adType"], "product");
        assert_eq!(json["category"], "home");
        assert_eq!(json["askingPrice"], 25.0);
    }

    #[test]
    fn blank_details_match_selected_type() {
        for ad_type in [
            AdType::Product,
            AdType::Service,
            AdType::Event,
            AdType::Offer,
            AdType::Explore,
        ] {
            assert_eq!(VariantDetails::blank(ad_type).ad_type(), ad_type);
        }
    }
}
