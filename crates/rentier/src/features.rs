//! Property attributes and the canonical feature vector.
//!
//! The model consumes a fixed-order numeric vector; slot order is part of
//! the trained schema and is asserted against the artifact at load time.
//! This module owns that schema, the supported input ranges, and the
//! attribute-to-vector translation.

use std::ops::RangeInclusive;

use thiserror::Error;

use crate::encoding::{CategoricalAttribute, EncodeError, EncoderRegistry};

/// Number of feature slots the model consumes.
pub const FEATURE_COUNT: usize = 5;

/// Canonical slot names, in vector order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] =
    ["rooms", "bathrooms", "area", "furnishing", "available_for"];

/// Supported number of rooms.
pub const ROOMS_RANGE: RangeInclusive<u32> = 1..=8;

/// Supported number of bathrooms.
pub const BATHROOMS_RANGE: RangeInclusive<u32> = 1..=5;

/// Supported carpet area in square feet.
pub const AREA_RANGE: RangeInclusive<f32> = 100.0..=3000.0;

/// Raw property attributes for a single estimate request.
///
/// Transient: built per request, consumed by [`FeatureVector::build`],
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyInput<'a> {
    pub rooms: u32,
    pub bathrooms: u32,
    /// Carpet area in square feet.
    pub area: f32,
    pub furnishing: &'a str,
    pub available_for: &'a str,
}

/// Rejected request input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("rooms out of supported range {}..={}: {rooms}", ROOMS_RANGE.start(), ROOMS_RANGE.end())]
    RoomsOutOfRange { rooms: u32 },
    #[error("bathrooms out of supported range {}..={}: {bathrooms}", BATHROOMS_RANGE.start(), BATHROOMS_RANGE.end())]
    BathroomsOutOfRange { bathrooms: u32 },
    #[error("area must be finite, got {area}")]
    AreaNotFinite { area: f32 },
    #[error("area out of supported range {}..={} sqft: {area}", AREA_RANGE.start(), AREA_RANGE.end())]
    AreaOutOfRange { area: f32 },
    #[error(transparent)]
    UnknownLabel(#[from] EncodeError),
}

/// Fixed-order numeric feature vector, ready for inference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f32; FEATURE_COUNT]);

impl FeatureVector {
    /// Validate raw attributes and translate them into the trained slot
    /// order: rooms, bathrooms, area, encoded furnishing, encoded
    /// availability.
    pub fn build(
        input: &PropertyInput<'_>,
        encoders: &EncoderRegistry,
    ) -> Result<Self, InputError> {
        if !ROOMS_RANGE.contains(&input.rooms) {
            return Err(InputError::RoomsOutOfRange { rooms: input.rooms });
        }
        if !BATHROOMS_RANGE.contains(&input.bathrooms) {
            return Err(InputError::BathroomsOutOfRange {
                bathrooms: input.bathrooms,
            });
        }
        if !input.area.is_finite() {
            return Err(InputError::AreaNotFinite { area: input.area });
        }
        if !AREA_RANGE.contains(&input.area) {
            return Err(InputError::AreaOutOfRange { area: input.area });
        }

        let furnishing = encoders.encode(CategoricalAttribute::Furnishing, input.furnishing)?;
        let available_for =
            encoders.encode(CategoricalAttribute::AvailableFor, input.available_for)?;

        Ok(Self([
            input.rooms as f32,
            input.bathrooms as f32,
            input.area,
            furnishing as f32,
            available_for as f32,
        ]))
    }

    /// Feature values in slot order.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

impl AsRef<[f32]> for FeatureVector {
    fn as_ref(&self) -> &[f32] {
        &self.0
    }
}
