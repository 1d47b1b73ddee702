use serde::Deserialize;
use serde_json::Value;

use crate::pricing::{compute_total_payable, ClassPricing, MentorPricing, PricingBreakdown};

/// A bookable class as returned by the marketplace backend.
///
/// Only the fields pricing needs are read; the rest of the record is ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct ClassOffering {
    pub title: Option<String>,
    /// `None` when the record has no `pricing` object
    pub pricing: Option<ClassPricing>,
}

impl ClassOffering {
    pub fn from_value(value: &Value) -> Self {
        Self {
            title: value.get("title").and_then(Value::as_str).map(str::to_string),
            pricing: value
                .get("pricing")
                .filter(|p| p.is_object())
                .map(ClassPricing::from_value),
        }
    }

    /// Price this class for a student, optionally taught by `mentor`.
    pub fn quote(&self, mentor: Option<&MentorProfile>, is_first_session: bool) -> PricingBreakdown {
        compute_total_payable(
            self.pricing.as_ref(),
            mentor.map(|m| &m.pricing),
            is_first_session,
        )
    }
}

impl From<Value> for ClassOffering {
    fn from(value: Value) -> Self {
        Self::from_value(&value)
    }
}

/// Mentor record; carries the mentor's pricing policy.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct MentorProfile {
    pub pricing: MentorPricing,
}

impl MentorProfile {
    pub fn from_value(value: &Value) -> Self {
        Self {
            pricing: value
                .get("pricing")
                .map(MentorPricing::from_value)
                .unwrap_or_default(),
        }
    }
}

impl From<Value> for MentorProfile {
    fn from(value: Value) -> Self {
        Self::from_value(&value)
    }
}
