//! Descriptive tiers derived from a numeric rent estimate.

use std::fmt;

/// Estimates below this are budget-friendly; at or above, mid-range.
pub const MID_RANGE_THRESHOLD: f32 = 10_000.0;

/// Estimates at or above this are premium.
pub const PREMIUM_THRESHOLD: f32 = 25_000.0;

/// Coarse market bucket for a rent estimate.
///
/// The mapping is total: lower bounds are inclusive, and the open-ended
/// top bucket catches everything that compares below neither threshold,
/// NaN included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RentTier {
    BudgetFriendly,
    MidRange,
    Premium,
}

impl RentTier {
    /// Classify a monthly rent estimate.
    pub fn from_estimate(rent: f32) -> Self {
        if rent < MID_RANGE_THRESHOLD {
            Self::BudgetFriendly
        } else if rent < PREMIUM_THRESHOLD {
            Self::MidRange
        } else {
            Self::Premium
        }
    }

    /// Short machine-friendly label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::BudgetFriendly => "budget-friendly",
            Self::MidRange => "mid-range",
            Self::Premium => "premium",
        }
    }

    /// One-line blurb describing what the tier typically means.
    pub fn description(&self) -> &'static str {
        match self {
            Self::BudgetFriendly => {
                "This seems to be a budget-friendly property, suitable for students or young professionals."
            }
            Self::MidRange => "A mid-range property with good potential for rentals.",
            Self::Premium => "A premium property with high-end amenities and location advantages.",
        }
    }
}

impl fmt::Display for RentTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
