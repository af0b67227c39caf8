//! Shared general-info step: title, description, images, location, phone.
//! Used by all five ad variants.

use souk_core::models::Draft;
use souk_core::validation::{common_field_errors, FieldError};
use souk_store::DraftPatch;

/// User input for the general-info step. Image selection goes through the
/// store's image operations, not the patch.
#[derive(Debug, Clone, Default)]
pub struct GeneralInfoInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location_same_as_profile: Option<bool>,
    pub city: Option<String>,
    pub neighbourhood: Option<String>,
    pub phone: Option<String>,
    pub show_phone: Option<bool>,
}

impl GeneralInfoInput {
    pub fn into_patch(self) -> DraftPatch {
        DraftPatch {
            title: self.title,
            description: self.description,
            location_same_as_profile: self.location_same_as_profile,
            city: self.city,
            neighbourhood: self.neighbourhood,
            phone: self.phone,
            show_phone: self.show_phone,
            ..Default::default()
        }
    }
}

/// The general-info step may be left once every common rule passes.
pub fn can_advance(draft: &Draft) -> bool {
    common_field_errors(draft).is_empty()
}

/// First unmet common requirement, for the step-gating toast.
pub fn first_unmet(draft: &Draft) -> Option<FieldError> {
    common_field_errors(draft).into_iter().next()
}
