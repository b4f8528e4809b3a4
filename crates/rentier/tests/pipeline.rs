//! End-to-end pipeline tests against the checked-in artifact.
//!
//! Expected estimates live in `tests/test-cases/pune-rent.cases.json` and
//! were computed by tracing the fixture forest by hand, so these tests pin
//! the whole chain: artifact load, encoding, traversal, aggregation, and
//! tier classification.

use std::path::PathBuf;

use approx::assert_relative_eq;
use rstest::rstest;

use rentier::testing::{fixture_model, CaseFile};
use rentier::{
    CategoricalAttribute, EstimateError, FeatureVector, InputError, PropertyInput, RentModel,
    RentTier, FEATURE_COUNT,
};

fn test_case_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/test-cases")
        .join(name)
}

fn load_model() -> RentModel {
    RentModel::load(test_case_path("pune-rent.model.json")).expect("load fixture artifact")
}

fn load_cases() -> CaseFile {
    let bytes = std::fs::read(test_case_path("pune-rent.cases.json")).expect("read case file");
    serde_json::from_slice(&bytes).expect("parse case file")
}

#[test]
fn checked_in_artifact_matches_programmatic_fixture() {
    assert_eq!(load_model(), fixture_model());
}

#[test]
fn pipeline_matches_expected_cases() {
    let model = load_model();
    let cases = load_cases().cases;
    assert!(!cases.is_empty());

    for case in cases {
        let estimate = model
            .estimate_rent(
                case.rooms,
                case.bathrooms,
                case.area,
                &case.furnishing,
                &case.available_for,
            )
            .unwrap_or_else(|err| panic!("case {:?} failed: {err}", case.name));

        assert_relative_eq!(f64::from(estimate.rent), case.expected_rent, epsilon = 1e-3);
        assert_eq!(
            estimate.tier.label(),
            case.expected_tier,
            "case {:?}",
            case.name
        );
        assert_eq!(estimate.tier, RentTier::from_estimate(estimate.rent));
    }
}

#[test]
fn scenario_vector_is_encoded_in_slot_order() {
    let model = load_model();
    let input = PropertyInput {
        rooms: 2,
        bathrooms: 2,
        area: 1000.0,
        furnishing: "Furnished",
        available_for: "Family",
    };

    let vector = FeatureVector::build(&input, model.encoders()).unwrap();
    assert_eq!(vector.as_slice().len(), FEATURE_COUNT);
    assert_eq!(vector.as_slice(), &[2.0, 2.0, 1000.0, 0.0, 2.0]);
}

#[test]
fn estimates_are_stable_across_reloads() {
    let first = load_model()
        .estimate_rent(4, 2, 1800.0, "Unfurnished", "Family")
        .unwrap();
    let second = load_model()
        .estimate_rent(4, 2, 1800.0, "Unfurnished", "Family")
        .unwrap();

    assert_eq!(first, second);
}

#[rstest]
#[case(0, 2, 1000.0)]
#[case(9, 2, 1000.0)]
#[case(2, 0, 1000.0)]
#[case(2, 6, 1000.0)]
#[case(2, 2, 99.0)]
#[case(2, 2, 3200.0)]
fn out_of_range_attributes_are_rejected(
    #[case] rooms: u32,
    #[case] bathrooms: u32,
    #[case] area: f32,
) {
    let model = load_model();
    let err = model
        .estimate_rent(rooms, bathrooms, area, "Furnished", "Family")
        .unwrap_err();
    assert!(matches!(err, EstimateError::Input(_)), "got: {err:?}");
}

#[rstest]
#[case("Luxury", "Family", CategoricalAttribute::Furnishing)]
#[case("furnished", "Family", CategoricalAttribute::Furnishing)]
#[case("Furnished", "Corporate", CategoricalAttribute::AvailableFor)]
fn unknown_labels_are_rejected(
    #[case] furnishing: &str,
    #[case] available_for: &str,
    #[case] expected_attribute: CategoricalAttribute,
) {
    let model = load_model();
    let err = model
        .estimate_rent(2, 2, 1000.0, furnishing, available_for)
        .unwrap_err();

    match err {
        EstimateError::Input(InputError::UnknownLabel(encode_err)) => {
            let rentier::EncodeError::UnknownLabel { attribute, .. } = encode_err;
            assert_eq!(attribute, expected_attribute);
        }
        other => panic!("expected unknown-label error, got {other:?}"),
    }
}

#[test]
fn encoders_round_trip_their_vocabularies() {
    let model = load_model();
    for attribute in [
        CategoricalAttribute::Furnishing,
        CategoricalAttribute::AvailableFor,
    ] {
        let encoder = model.encoders().encoder(attribute);
        for label in encoder.classes() {
            let code = encoder.encode(label).unwrap();
            assert_eq!(encoder.label(code), Some(label.as_str()));
        }
    }
}
