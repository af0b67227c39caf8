//! Published ad model: the seed data for an edit flow.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::draft::PaymentMode;
use super::variant::VariantDetails;

/// An already-published ad as fetched from the backend. Only the fields the
/// wizard edits are carried here; display-only listing data stays out of
/// this subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedAd {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Stored image URLs in server order. Edit-mode removal indices refer to
    /// this list as fetched.
    pub image_urls: Vec<String>,
    pub location_same_as_profile: bool,
    pub city: String,
    pub neighbourhood: String,
    pub phone: String,
    pub show_phone: bool,
    pub payment_mode: PaymentMode,
    #[serde(flatten)]
    pub details: VariantDetails,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::draft::Draft;
    use crate::models::variant::ServiceDetails;

    #[test]
    fn seeding_preserves_fields_and_installs_image_diff() {
        let ad = PublishedAd {
            id: Uuid::new_v4(),
            title: "Plumbing".to_string(),
            description: "Fast plumbing service".to_string(),
            image_urls: vec!["a.jpg".to_string(), "b.jpg".to_string()],
            location_same_as_profile: true,
            city: String::new(),
            neighbourhood: String::new(),
            phone: "555-0101".to_string(),
            show_phone: true,
            payment_mode: PaymentMode::Annual,
            details: VariantDetails::Service(ServiceDetails {
                category: "home".to_string(),
                sub_category: "repair".to_string(),
                service_type: "hourly".to_string(),
                service_price: Some(40.0),
            }),
        };

        let draft = Draft::seeded_from(&ad);
        assert_eq!(draft.title, "Plumbing");
        assert_eq!(draft.editing_ad_id, Some(ad.id));
        assert!(draft.is_edit_mode());
        let diff = draft.image_diff.as_ref().unwrap();
        assert_eq!(diff.original_image_count, 2);
        assert!(diff.removed_existing.is_empty());
        // Seeded drafts keep their existing images, so they pass the image
        // requirement without any new upload.
        assert!(draft.has_images());
    }
}
