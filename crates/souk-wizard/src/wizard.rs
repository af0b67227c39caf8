//! Wizard orchestrator: owns the draft store and the submission gateway,
//! drives the stage machine, and runs the terminal submit flow.

use std::sync::Arc;

use serde_json::Value as JsonValue;
use tracing::{info, warn};

use souk_core::error::AppError;
use souk_core::gateway::{is_validation_failure, SubmissionGateway};
use souk_core::models::{AdType, Draft};
use souk_core::validation::{common_field_errors, variant_field_errors, FieldError};
use souk_core::{encode, SubmissionTarget};
use souk_store::{DraftPatch, DraftStore};

use crate::stage::WizardStage;
use crate::steps::{billing, general};

/// Outcome of a gated advance attempt. Being blocked is a derived state,
/// not an error: the UI disables progression and may toast the first unmet
/// requirement.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    Moved(WizardStage),
    Blocked(FieldError),
}

/// Outcome of a submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Accepted {
        data: Option<JsonValue>,
    },
    /// The backend rejected the submission; the draft is preserved for
    /// correction. `back_to_variant_step` is set when the message matches
    /// the validation-failure pattern.
    Rejected {
        message: String,
        back_to_variant_step: bool,
    },
    /// Re-validation before encoding found an unmet requirement.
    Blocked(FieldError),
}

pub struct Wizard {
    store: DraftStore,
    gateway: Arc<dyn SubmissionGateway>,
    stage: WizardStage,
    is_submitting: bool,
}

impl Wizard {
    /// Wrap a store (blank, recovered, or seeded) and derive the stage the
    /// draft's content supports.
    pub fn new(store: DraftStore, gateway: Arc<dyn SubmissionGateway>) -> Self {
        let stage = derive_stage(store.draft());
        Wizard {
            store,
            gateway,
            stage,
            is_submitting: false,
        }
    }

    pub fn stage(&self) -> WizardStage {
        self.stage
    }

    pub fn draft(&self) -> &Draft {
        self.store.draft()
    }

    pub fn store(&self) -> &DraftStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut DraftStore {
        &mut self.store
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Select or switch the ad type. Switching from a later stage regresses
    /// to `TypeSelected` since the variant data was just reset.
    pub async fn select_type(&mut self, ad_type: AdType) -> Result<(), AppError> {
        self.ensure_editable()?;
        self.store.select_type(ad_type).await;
        if self.stage != WizardStage::TypeSelected {
            debug_assert!(self.stage.can_transition(WizardStage::TypeSelected));
            self.stage = WizardStage::TypeSelected;
        }
        Ok(())
    }

    /// Apply a step's patch to the draft. Variant-carrying patches must
    /// match the active ad type; type switches go through `select_type`.
    pub async fn apply(&mut self, patch: DraftPatch) -> Result<(), AppError> {
        self.ensure_editable()?;
        if let Some(details) = &patch.details {
            if Some(details.ad_type()) != self.draft().ad_type() {
                return Err(AppError::InvalidInput(format!(
                    "patch carries {} details but the active ad type is {:?}",
                    details.ad_type().as_str(),
                    self.draft().ad_type().map(|t| t.as_str())
                )));
            }
        }
        self.store.update(patch).await;
        Ok(())
    }

    /// Leave the general-info step, gated by the common rules.
    pub fn advance_from_general(&mut self) -> Result<Advance, AppError> {
        self.require_stage(WizardStage::TypeSelected, "advance from general info")?;
        match general::first_unmet(self.draft()) {
            None => {
                self.stage = WizardStage::GeneralInfoComplete;
                Ok(Advance::Moved(self.stage))
            }
            Some(err) => Ok(Advance::Blocked(err)),
        }
    }

    /// Leave the variant step, gated by the active variant's rules.
    pub fn advance_from_variant(&mut self) -> Result<Advance, AppError> {
        self.require_stage(WizardStage::GeneralInfoComplete, "advance from variant info")?;
        match variant_field_errors(self.draft()).into_iter().next() {
            None => {
                self.stage = WizardStage::VariantInfoComplete;
                Ok(Advance::Moved(self.stage))
            }
            Some(err) => Ok(Advance::Blocked(err)),
        }
    }

    /// Step back one stage (the wizard's back button).
    pub fn go_back(&mut self) -> bool {
        let previous = match self.stage {
            WizardStage::TypeSelected => WizardStage::Blank,
            WizardStage::GeneralInfoComplete => WizardStage::TypeSelected,
            WizardStage::VariantInfoComplete => WizardStage::GeneralInfoComplete,
            _ => return false,
        };
        debug_assert!(self.stage.can_transition(previous));
        self.stage = previous;
        true
    }

    /// Run the terminal submit flow. Re-validates the whole draft, encodes
    /// it, and sends it through the gateway. On success the store is reset
    /// and the snapshot cleared; on failure the draft is preserved and the
    /// gateway's message attached. A second submit cannot be issued while
    /// one is in flight.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, AppError> {
        if self.is_submitting {
            return Err(AppError::Stage("a submission is already in flight".into()));
        }
        self.require_stage(WizardStage::VariantInfoComplete, "submit")?;

        if let Err(unmet) = billing::ready_to_submit(self.draft()) {
            // A backward navigation invalidated an earlier step; fall back
            // to the stage that owns the unmet field.
            let fallback = if common_field_errors(self.draft()).is_empty() {
                WizardStage::GeneralInfoComplete
            } else {
                WizardStage::TypeSelected
            };
            debug_assert!(self.stage.can_transition(fallback));
            self.stage = fallback;
            return Ok(SubmitOutcome::Blocked(unmet));
        }

        let payload = encode(self.draft())?;
        let editing = matches!(payload.target, SubmissionTarget::Update(_));

        self.is_submitting = true;
        self.stage = WizardStage::Submitting;
        info!(
            ad_type = self.draft().ad_type().map(|t| t.as_str()),
            editing, "submitting ad draft"
        );

        let result = self.gateway.submit(payload).await;
        self.is_submitting = false;

        match result {
            Ok(envelope) if envelope.success => {
                self.store.reset().await;
                self.stage = WizardStage::Submitted;
                Ok(SubmitOutcome::Accepted {
                    data: envelope.data,
                })
            }
            Ok(envelope) => {
                let message = envelope
                    .message
                    .unwrap_or_else(|| "submission failed".to_string());
                let validation = is_validation_failure(&message);
                warn!(%message, validation, "ad submission rejected");
                self.store.set_error(message.clone());
                self.stage = WizardStage::Failed;
                Ok(SubmitOutcome::Rejected {
                    message,
                    back_to_variant_step: validation,
                })
            }
            Err(e) => {
                let message = e.to_string();
                warn!(%message, "ad submission transport failure");
                self.store.set_error(message.clone());
                self.stage = WizardStage::Failed;
                Ok(SubmitOutcome::Rejected {
                    message,
                    back_to_variant_step: false,
                })
            }
        }
    }

    /// Return from `Failed` to the variant step with the draft intact.
    pub fn acknowledge_failure(&mut self) -> Result<(), AppError> {
        self.require_stage(WizardStage::Failed, "acknowledge failure")?;
        self.stage = WizardStage::VariantInfoComplete;
        Ok(())
    }

    /// Return from `Submitted` to a blank wizard.
    pub fn acknowledge_submitted(&mut self) -> Result<(), AppError> {
        self.require_stage(WizardStage::Submitted, "acknowledge submission")?;
        self.stage = WizardStage::Blank;
        Ok(())
    }

    fn ensure_editable(&self) -> Result<(), AppError> {
        if self.is_submitting || self.stage.is_submitting() {
            return Err(AppError::Stage(
                "the draft cannot change while a submission is in flight".into(),
            ));
        }
        if self.stage.is_terminal() {
            return Err(AppError::Stage(format!(
                "the draft cannot change in the {:?} stage",
                self.stage
            )));
        }
        Ok(())
    }

    fn require_stage(&self, expected: WizardStage, action: &str) -> Result<(), AppError> {
        if self.stage != expected {
            return Err(AppError::Stage(format!(
                "cannot {action} from the {:?} stage",
                self.stage
            )));
        }
        Ok(())
    }
}

/// Stage supported by the draft's current content, used when resuming a
/// recovered draft: validity, not routing, decides where the wizard opens.
pub fn derive_stage(draft: &Draft) -> WizardStage {
    if draft.ad_type().is_none() {
        WizardStage::Blank
    } else if !common_field_errors(draft).is_empty() {
        WizardStage::TypeSelected
    } else if !variant_field_errors(draft).is_empty() {
        WizardStage::GeneralInfoComplete
    } else {
        WizardStage::VariantInfoComplete
    }
}
