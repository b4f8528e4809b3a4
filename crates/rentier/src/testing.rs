//! Shared fixtures and case-file support for tests and benches.
//!
//! The fixture forest is small enough to trace by hand. The checked-in
//! artifact `tests/test-cases/pune-rent.model.json` and the expectations in
//! `pune-rent.cases.json` are exports of it, so unit tests, integration
//! tests, and benches all agree on the same numbers.

use serde::Deserialize;

use crate::artifact::ArtifactSchema;
use crate::encoding::{CategoricalAttribute, EncoderRegistry, LabelEncoder};
use crate::features::{FEATURE_COUNT, FEATURE_NAMES};
use crate::model::{ModelMeta, RentModel};
use crate::repr::{Aggregation, Forest, Tree};

/// Provenance string recorded in the fixture artifact.
pub const FIXTURE_SOURCE: &str = "pune-house-rent-2024";

/// `area <= 900 ? (rooms <= 1 ? 7000 : 11000) : (area <= 1800 ? 16500 : 27000)`
fn area_tree() -> Tree {
    Tree::new(
        vec![2, 0, 2, 0, 0, 0, 0],
        vec![900.0, 1.0, 1800.0, 0.0, 0.0, 0.0, 0.0],
        vec![1, 3, 5, 0, 0, 0, 0],
        vec![2, 4, 6, 0, 0, 0, 0],
        vec![false, false, false, true, true, true, true],
        vec![0.0, 0.0, 0.0, 7000.0, 11000.0, 16500.0, 27000.0],
    )
}

/// `furnished ? (area <= 1200 ? 14000 : 26000) : (semifurnished ? 12500 : 9500)`
fn furnishing_tree() -> Tree {
    Tree::new(
        vec![3, 2, 3, 0, 0, 0, 0],
        vec![0.5, 1200.0, 1.5, 0.0, 0.0, 0.0, 0.0],
        vec![1, 3, 5, 0, 0, 0, 0],
        vec![2, 4, 6, 0, 0, 0, 0],
        vec![false, false, false, true, true, true, true],
        vec![0.0, 0.0, 0.0, 14000.0, 26000.0, 12500.0, 9500.0],
    )
}

/// `rooms <= 2 ? (bathrooms <= 1 ? 8500 : 12000) : (rooms <= 4 ? 19000 : 32000)`
fn occupancy_tree() -> Tree {
    Tree::new(
        vec![0, 1, 0, 0, 0, 0, 0],
        vec![2.0, 1.0, 4.0, 0.0, 0.0, 0.0, 0.0],
        vec![1, 3, 5, 0, 0, 0, 0],
        vec![2, 4, 6, 0, 0, 0, 0],
        vec![false, false, false, true, true, true, true],
        vec![0.0, 0.0, 0.0, 8500.0, 12000.0, 19000.0, 32000.0],
    )
}

/// `family-only ? 18000 : (area <= 1500 ? 10500 : 21000)`
fn availability_tree() -> Tree {
    Tree::new(
        vec![4, 2, 0, 0, 0],
        vec![1.5, 1500.0, 0.0, 0.0, 0.0],
        vec![1, 3, 0, 0, 0],
        vec![2, 4, 0, 0, 0],
        vec![false, false, true, true, true],
        vec![0.0, 0.0, 18000.0, 10500.0, 21000.0],
    )
}

/// Four-tree averaging forest over the canonical feature schema.
pub fn fixture_forest() -> Forest {
    Forest::new(
        vec![
            area_tree(),
            furnishing_tree(),
            occupancy_tree(),
            availability_tree(),
        ],
        Aggregation::Average,
    )
}

/// Encoders fitted on the training vocabularies.
pub fn fixture_encoders() -> EncoderRegistry {
    EncoderRegistry::new(
        LabelEncoder::new(
            CategoricalAttribute::Furnishing,
            vec![
                "Furnished".to_owned(),
                "Semifurnished".to_owned(),
                "Unfurnished".to_owned(),
            ],
        ),
        LabelEncoder::new(
            CategoricalAttribute::AvailableFor,
            vec!["All".to_owned(), "Bachelors".to_owned(), "Family".to_owned()],
        ),
    )
}

/// Metadata matching the canonical feature schema.
pub fn fixture_meta() -> ModelMeta {
    ModelMeta {
        n_features: FEATURE_COUNT,
        feature_names: FEATURE_NAMES.iter().map(|&name| name.to_owned()).collect(),
        source: Some(FIXTURE_SOURCE.to_owned()),
    }
}

/// The deterministic fixture model.
pub fn fixture_model() -> RentModel {
    RentModel::from_parts(fixture_forest(), fixture_encoders(), fixture_meta())
}

/// The fixture model exported as an artifact document.
pub fn fixture_artifact() -> ArtifactSchema {
    fixture_model().to_schema()
}

/// One end-to-end expectation, loaded from a case file.
#[derive(Debug, Clone, Deserialize)]
pub struct RentCase {
    /// Case name, used in assertion messages.
    pub name: String,
    pub rooms: u32,
    pub bathrooms: u32,
    pub area: f32,
    pub furnishing: String,
    pub available_for: String,
    /// Expected estimate; exact for the fixture forest.
    pub expected_rent: f64,
    /// Expected tier label, as produced by `RentTier::label`.
    pub expected_tier: String,
}

/// Case file wrapper.
///
/// Expects JSON format:
/// ```json
/// {
///   "cases": [
///     {
///       "name": "two-bed furnished family flat",
///       "rooms": 2, "bathrooms": 2, "area": 1000.0,
///       "furnishing": "Furnished", "available_for": "Family",
///       "expected_rent": 15125.0, "expected_tier": "mid-range"
///     }
///   ]
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct CaseFile {
    pub cases: Vec<RentCase>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_forest_passes_validation() {
        assert!(fixture_forest().validate().is_ok());
        assert_eq!(fixture_forest().max_split_index(), Some(4));
    }

    #[test]
    fn fixture_predictions_are_hand_traceable() {
        let model = fixture_model();

        // 7000 + 9500 + 8500 + 10500 over four trees.
        let compact = model
            .estimate_rent(1, 1, 450.0, "Unfurnished", "Bachelors")
            .unwrap();
        assert_eq!(compact.rent, 8_875.0);

        // 11000 + 12500 + 8500 + 10500 over four trees.
        let modest = model
            .estimate_rent(2, 1, 800.0, "Semifurnished", "Bachelors")
            .unwrap();
        assert_eq!(modest.rent, 10_625.0);
    }
}
