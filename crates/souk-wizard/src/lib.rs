//! Souk Wizard Library
//!
//! The multi-step ad composition wizard: an explicit finite-state machine
//! over the draft lifecycle, per-step controllers that turn user input into
//! draft patches gated by the variant schema registry, and the submit
//! orchestration against the submission gateway.
//!
//! "Can I be on this step" is answered by state-machine validity, not by
//! which route happens to be loaded.

pub mod stage;
pub mod steps;
pub mod wizard;

pub use stage::WizardStage;
pub use steps::{
    BillingInput, EventInput, ExploreInput, GeneralInfoInput, OfferInput, ProductInput,
    ServiceInput,
};
pub use wizard::{Advance, SubmitOutcome, Wizard};
