//! Event step: type, schedule and optional feature tags.

use chrono::{NaiveDate, NaiveTime};
use souk_core::models::{AdType, Draft, EventDetails, VariantDetails};
use souk_core::validation::variant_field_errors;
use souk_store::DraftPatch;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default)]
pub struct EventInput {
    pub event_type: String,
    pub event_date: Option<NaiveDate>,
    pub event_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub features: BTreeSet<String>,
}

impl EventInput {
    pub fn into_patch(self) -> DraftPatch {
        DraftPatch {
            details: Some(VariantDetails::Event(EventDetails {
                event_type: self.event_type,
                event_date: self.event_date,
                event_time: self.event_time,
                end_time: self.end_time,
                features: self.features,
            })),
            ..Default::default()
        }
    }
}

pub fn can_advance(draft: &Draft) -> bool {
    draft.ad_type() == Some(AdType::Event) && variant_field_errors(draft).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_before_start_blocks_advance() {
        let mut draft = Draft::blank();
        draft.select_type(AdType::Event);
        draft.details = EventInput {
            event_type: "concert".to_string(),
            event_date: NaiveDate::from_ymd_opt(2030, 1, 1),
            event_time: NaiveTime::from_hms_opt(10, 0, 0),
            end_time: NaiveTime::from_hms_opt(9, 0, 0),
            features: BTreeSet::new(),
        }
        .into_patch()
        .details;
        assert!(!can_advance(&draft));

        if let Some(VariantDetails::Event(e)) = draft.details.as_mut() {
            e.end_time = NaiveTime::from_hms_opt(12, 0, 0);
        }
        assert!(can_advance(&draft));
    }
}
