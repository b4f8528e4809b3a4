//! Rent estimation example using the high-level API.
//!
//! Loads the bundled model artifact, runs a few estimates, and prints the
//! predicted rent together with its market tier.
//!
//! Run with:
//! ```bash
//! cargo run --example estimate
//! ```

use rentier::RentModel;

fn main() {
    // =========================================================================
    // 1. Load the Model
    // =========================================================================
    let path = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/test-cases/pune-rent.model.json"
    );
    let model = RentModel::load(path).expect("Failed to load model artifact");

    println!("Loaded rent model");
    println!("  Trees: {}", model.forest().n_trees());
    println!("  Features: {}", model.meta().n_features);
    if let Some(source) = &model.meta().source {
        println!("  Source: {source}");
    }
    println!();

    // =========================================================================
    // 2. Estimate Rents
    // =========================================================================
    let listings = [
        ("Two-bed family flat", 2, 2, 1000.0, "Furnished", "Family"),
        ("Compact bachelor room", 1, 1, 450.0, "Unfurnished", "Bachelors"),
        ("Large family house", 5, 4, 2600.0, "Furnished", "Family"),
    ];

    for (label, rooms, bathrooms, area, furnishing, available_for) in listings {
        let estimate = model
            .estimate_rent(rooms, bathrooms, area, furnishing, available_for)
            .expect("Estimation failed");

        println!("{label} ({rooms} BHK, {area} sqft, {furnishing}, {available_for})");
        println!("  Estimated rent: ₹{:.2} per month", estimate.rent);
        println!("  Tier: {}", estimate.tier);
        println!("  {}", estimate.tier.description());
        println!();
    }
}
