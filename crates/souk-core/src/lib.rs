//! Souk Core Library
//!
//! This crate provides the core domain model of the ad composition pipeline:
//! the draft record (a tagged union over the five ad variants), the variant
//! schema registry (per-variant validation rules), the submission encoder,
//! the gateway trait with its response envelope, and the shared error and
//! configuration types used by the other Souk crates.

pub mod config;
pub mod encode;
pub mod error;
pub mod gateway;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::WizardConfig;
pub use encode::{encode, FilePart, SubmissionPayload, SubmissionTarget};
pub use error::AppError;
pub use gateway::{is_validation_failure, NoOpGateway, SubmissionGateway, SubmitEnvelope};
pub use models::{
    AdType, Draft, EventDetails, ExploreDetails, ImageDiff, OfferDetails, PaymentMode,
    PendingImage, ProductDetails, PublishedAd, ServiceDetails, SocialLinks, VariantDetails,
};
pub use validation::{field_errors, first_unmet, is_valid, required_fields, FieldError};
