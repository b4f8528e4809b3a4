//! rentier: monthly rent estimation from pre-trained tree-ensemble artifacts.
//!
//! The crate is the core of a rent estimation tool for the Pune market:
//! property attributes go in, a monthly rent estimate and a descriptive
//! tier come out. The trained model (a random-forest regressor together
//! with the label encoders it was fitted with) is loaded once from a
//! versioned JSON artifact; everything after that is pure computation.
//!
//! # Key Types
//!
//! - [`RentModel`] - loaded model, with the [`RentModel::estimate`] entry point
//! - [`PropertyInput`] / [`FeatureVector`] - attribute validation and encoding
//! - [`Estimate`] / [`RentTier`] - prediction plus market tier
//! - [`artifact`] - the on-disk model format
//!
//! # Example
//!
//! ```no_run
//! use rentier::RentModel;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let model = RentModel::load("pune-rent.model.json")?;
//! let estimate = model.estimate_rent(2, 2, 1000.0, "Furnished", "Family")?;
//! println!("₹{:.2} per month ({})", estimate.rent, estimate.tier);
//! # Ok(())
//! # }
//! ```

// Re-export approx traits for users who want to compare predictions
pub use approx;

pub mod artifact;
pub mod encoding;
pub mod features;
pub mod insight;
pub mod model;
pub mod repr;
pub mod testing;

// =============================================================================
// Convenience Re-exports
// =============================================================================

// The loaded model and its request/response types
pub use model::{Estimate, EstimateError, InferenceError, ModelMeta, RentModel};

// Input validation and encoding
pub use encoding::{CategoricalAttribute, EncodeError, EncoderRegistry, LabelEncoder};
pub use features::{FeatureVector, InputError, PropertyInput, FEATURE_COUNT, FEATURE_NAMES};

// Tier classification
pub use insight::{RentTier, MID_RANGE_THRESHOLD, PREMIUM_THRESHOLD};

// Artifact loading
pub use artifact::{ArtifactError, ArtifactSchema, ConversionError};
