//! Wizard lifecycle stages.
//!
//! `Blank → TypeSelected → GeneralInfoComplete → VariantInfoComplete →
//! Submitting → {Submitted | Failed}`. Strict step ordering: there is no
//! forward path that skips a stage. Backward transitions are allowed down
//! to `Blank` so a user can revisit and invalidate earlier steps; the
//! billing step re-validates the whole draft because of exactly that.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStage {
    Blank,
    TypeSelected,
    GeneralInfoComplete,
    VariantInfoComplete,
    Submitting,
    Submitted,
    Failed,
}

impl WizardStage {
    /// Whether the machine may move from `self` to `next`.
    pub fn can_transition(self, next: WizardStage) -> bool {
        use WizardStage::*;
        match (self, next) {
            // Forward, one step at a time
            (Blank, TypeSelected)
            | (TypeSelected, GeneralInfoComplete)
            | (GeneralInfoComplete, VariantInfoComplete)
            | (VariantInfoComplete, Submitting)
            | (Submitting, Submitted)
            | (Submitting, Failed)
            // Failure keeps the draft and returns to the variant step
            | (Failed, VariantInfoComplete)
            // Success resets to a blank wizard
            | (Submitted, Blank) => true,
            // Backward: an editable stage may regress to any earlier
            // editable stage. Type switches and pre-submit re-validation
            // invalidate more than one step at a time, so regressions are
            // not restricted to single steps.
            _ => match (self.editable_rank(), next.editable_rank()) {
                (Some(from), Some(to)) => to < from,
                _ => false,
            },
        }
    }

    fn editable_rank(self) -> Option<u8> {
        match self {
            WizardStage::Blank => Some(0),
            WizardStage::TypeSelected => Some(1),
            WizardStage::GeneralInfoComplete => Some(2),
            WizardStage::VariantInfoComplete => Some(3),
            _ => None,
        }
    }

    /// Terminal stages require acknowledgement before further input.
    pub fn is_terminal(self) -> bool {
        matches!(self, WizardStage::Submitted | WizardStage::Failed)
    }

    pub fn is_submitting(self) -> bool {
        self == WizardStage::Submitting
    }
}

#[cfg(test)]
mod tests {
    use super::WizardStage::*;

    #[test]
    fn forward_path_is_strictly_ordered() {
        assert!(Blank.can_transition(TypeSelected));
        assert!(TypeSelected.can_transition(GeneralInfoComplete));
        assert!(GeneralInfoComplete.can_transition(VariantInfoComplete));
        assert!(VariantInfoComplete.can_transition(Submitting));
    }

    #[test]
    fn no_stage_skipping() {
        assert!(!Blank.can_transition(GeneralInfoComplete));
        assert!(!Blank.can_transition(VariantInfoComplete));
        assert!(!TypeSelected.can_transition(VariantInfoComplete));
        assert!(!GeneralInfoComplete.can_transition(Submitting));
    }

    #[test]
    fn submission_outcomes() {
        assert!(Submitting.can_transition(Submitted));
        assert!(Submitting.can_transition(Failed));
        assert!(Failed.can_transition(VariantInfoComplete));
        assert!(Submitted.can_transition(Blank));
        assert!(!Failed.can_transition(Submitting));
    }

    #[test]
    fn backward_navigation_reaches_any_earlier_editable_stage() {
        assert!(VariantInfoComplete.can_transition(GeneralInfoComplete));
        assert!(GeneralInfoComplete.can_transition(TypeSelected));
        assert!(TypeSelected.can_transition(Blank));
        // Type switches and pre-submit re-validation skip steps.
        assert!(VariantInfoComplete.can_transition(TypeSelected));
        assert!(VariantInfoComplete.can_transition(Blank));
        assert!(GeneralInfoComplete.can_transition(Blank));
    }

    #[test]
    fn no_self_loops_or_regressions_out_of_submission() {
        assert!(!TypeSelected.can_transition(TypeSelected));
        assert!(!Submitting.can_transition(Blank));
        assert!(!Failed.can_transition(TypeSelected));
        assert!(!Submitted.can_transition(TypeSelected));
    }
}
