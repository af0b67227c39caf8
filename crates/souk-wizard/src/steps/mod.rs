//! Step controllers: one per ad variant, plus the shared general-info step
//! and the terminal billing step.
//!
//! Each controller is a pure mapping from user input to a draft patch; "can
//! advance" is derived from the variant schema registry and is never an
//! exception.

pub mod billing;
pub mod event;
pub mod explore;
pub mod general;
pub mod offer;
pub mod product;
pub mod service;

pub use billing::BillingInput;
pub use event::EventInput;
pub use explore::ExploreInput;
pub use general::GeneralInfoInput;
pub use offer::OfferInput;
pub use product::ProductInput;
pub use service::ServiceInput;
