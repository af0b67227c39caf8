//! Domain models for the ad draft pipeline.

pub mod ad;
pub mod draft;
pub mod variant;

pub use ad::PublishedAd;
pub use draft::{AdType, Draft, ImageDiff, PaymentMode, PendingImage};
pub use variant::{
    EventDetails, ExploreDetails, OfferDetails, ProductDetails, ServiceDetails, SocialLinks,
    VariantDetails,
};
