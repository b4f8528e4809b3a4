//! The rent model: forest, encoders, and feature schema bound together.
//!
//! [`RentModel`] is immutable after loading and shared by reference; every
//! request flows through it without touching any other state. The single
//! pipeline entry point is [`RentModel::estimate`] (or the unpacked
//! [`RentModel::estimate_rent`]): raw attributes in, a complete
//! [`Estimate`] or an error out, never a partial result.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use thiserror::Error;

use crate::artifact::convert::check_split_bounds;
use crate::artifact::schema::{EncodersSchema, ForestSchema, MetaSchema};
use crate::artifact::{self, ArtifactError, ArtifactSchema, ConversionError};
use crate::encoding::EncoderRegistry;
use crate::features::{FeatureVector, InputError, PropertyInput};
use crate::insight::RentTier;
use crate::repr::Forest;

/// Feature schema the forest was trained against, carried by the artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelMeta {
    /// Number of features the forest consumes.
    pub n_features: usize,
    /// Feature names in vector slot order.
    pub feature_names: Vec<String>,
    /// Training data provenance, if the artifact recorded it.
    pub source: Option<String>,
}

/// Inference failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InferenceError {
    /// Feature vector length disagrees with the trained schema. This is
    /// schema drift between builder and model, not a user input problem,
    /// and is never worth retrying.
    #[error("feature shape mismatch: model consumes {expected} features, got {found}")]
    FeatureShapeMismatch { expected: usize, found: usize },
}

/// Everything that can go wrong serving one estimate request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimateError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
}

/// A complete prediction: monthly rent and its descriptive tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    /// Estimated monthly rent.
    pub rent: f32,
    /// Tier the estimate falls into.
    pub tier: RentTier,
}

/// A loaded rent model.
#[derive(Debug, Clone, PartialEq)]
pub struct RentModel {
    forest: Forest,
    encoders: EncoderRegistry,
    meta: ModelMeta,
}

impl RentModel {
    /// Load a model from an artifact file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Load a model from any artifact reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ArtifactError> {
        let schema = artifact::read_schema(reader)?;
        Ok(Self::from_schema(schema)?)
    }

    /// Build a model from a parsed artifact, validating everything the
    /// inference path assumes.
    pub fn from_schema(schema: ArtifactSchema) -> Result<Self, ConversionError> {
        let meta = ModelMeta::try_from(schema.meta)?;
        let encoders = EncoderRegistry::try_from(schema.encoders)?;
        let forest = Forest::try_from(schema.forest)?;
        check_split_bounds(&forest, meta.n_features)?;

        Ok(Self::from_parts(forest, encoders, meta))
    }

    /// Assemble a model from already-validated parts.
    pub fn from_parts(forest: Forest, encoders: EncoderRegistry, meta: ModelMeta) -> Self {
        Self {
            forest,
            encoders,
            meta,
        }
    }

    /// Export the model back into its artifact schema.
    pub fn to_schema(&self) -> ArtifactSchema {
        ArtifactSchema::new(
            MetaSchema::from(&self.meta),
            EncodersSchema::from(&self.encoders),
            ForestSchema::from(&self.forest),
        )
    }

    /// Model metadata.
    #[inline]
    pub fn meta(&self) -> &ModelMeta {
        &self.meta
    }

    /// The fitted encoders.
    #[inline]
    pub fn encoders(&self) -> &EncoderRegistry {
        &self.encoders
    }

    /// The trained forest.
    #[inline]
    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// Predict raw rent from an already-built feature vector.
    ///
    /// The shape check is the only transformation between the vector and
    /// the forest; the output is exactly what the ensemble computes.
    pub fn predict(&self, features: &[f32]) -> Result<f32, InferenceError> {
        if features.len() != self.meta.n_features {
            return Err(InferenceError::FeatureShapeMismatch {
                expected: self.meta.n_features,
                found: features.len(),
            });
        }
        Ok(self.forest.predict_row(features))
    }

    /// Run the full pipeline for one property: validate and encode the
    /// attributes, predict, and classify the result.
    pub fn estimate(&self, input: &PropertyInput<'_>) -> Result<Estimate, EstimateError> {
        let features = FeatureVector::build(input, &self.encoders)?;
        let rent = self.predict(features.as_slice())?;
        Ok(Estimate {
            rent,
            tier: RentTier::from_estimate(rent),
        })
    }

    /// [`RentModel::estimate`] with unpacked attributes.
    pub fn estimate_rent(
        &self,
        rooms: u32,
        bathrooms: u32,
        area: f32,
        furnishing: &str,
        available_for: &str,
    ) -> Result<Estimate, EstimateError> {
        self.estimate(&PropertyInput {
            rooms,
            bathrooms,
            area,
            furnishing,
            available_for,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::EncodeError;
    use crate::testing::fixture_model;

    #[test]
    fn predict_checks_feature_shape() {
        let model = fixture_model();
        assert_eq!(
            model.predict(&[2.0, 2.0, 1000.0, 0.0]),
            Err(InferenceError::FeatureShapeMismatch {
                expected: 5,
                found: 4,
            })
        );
    }

    #[test]
    fn estimate_produces_rent_and_tier() {
        let model = fixture_model();
        let estimate = model
            .estimate_rent(2, 2, 1000.0, "Furnished", "Family")
            .unwrap();

        assert_eq!(estimate.rent, 15_125.0);
        assert_eq!(estimate.tier, RentTier::MidRange);
        assert_eq!(estimate.tier, RentTier::from_estimate(estimate.rent));
    }

    #[test]
    fn estimate_is_deterministic() {
        let model = fixture_model();
        let first = model
            .estimate_rent(3, 2, 1500.0, "Semifurnished", "All")
            .unwrap();
        for _ in 0..10 {
            let again = model
                .estimate_rent(3, 2, 1500.0, "Semifurnished", "All")
                .unwrap();
            assert_eq!(again, first);
        }
    }

    #[test]
    fn estimate_rejects_bad_input() {
        let model = fixture_model();
        assert_eq!(
            model.estimate_rent(0, 2, 1000.0, "Furnished", "Family"),
            Err(EstimateError::Input(InputError::RoomsOutOfRange {
                rooms: 0
            }))
        );
    }

    #[test]
    fn estimate_rejects_unknown_label() {
        let model = fixture_model();
        let err = model
            .estimate_rent(2, 2, 1000.0, "Luxury", "Family")
            .unwrap_err();
        assert!(matches!(
            err,
            EstimateError::Input(InputError::UnknownLabel(EncodeError::UnknownLabel { .. }))
        ));
    }

    #[test]
    fn schema_roundtrip_preserves_model() {
        let model = fixture_model();
        let restored = RentModel::from_schema(model.to_schema()).unwrap();
        assert_eq!(restored, model);
    }

    #[test]
    fn from_schema_rejects_out_of_schema_split() {
        let mut schema = fixture_model().to_schema();
        schema.forest.trees[0].split_indices[0] = 9;

        assert!(matches!(
            RentModel::from_schema(schema),
            Err(ConversionError::SplitIndexOutOfRange {
                tree_idx: 0,
                split_index: 9,
                ..
            })
        ));
    }
}
