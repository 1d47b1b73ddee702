use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::coerce;

/// Currency used whenever a class carries no usable currency code.
pub const DEFAULT_CURRENCY: &str = "GBP";

/// Pricing attached to a bookable class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Value")]
pub struct ClassPricing {
    pub per_session_rate: f64,
    pub total_sessions: i64,
    pub currency: String,

    /// Package discount, 0-100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,

    /// Flat discount in the class currency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<f64>,
}

impl ClassPricing {
    pub fn new(per_session_rate: f64, total_sessions: i64, currency: impl Into<String>) -> Self {
        Self {
            per_session_rate,
            total_sessions,
            currency: currency.into(),
            discount_percentage: None,
            discount_amount: None,
        }
    }

    pub fn with_percentage_discount(mut self, percentage: f64) -> Self {
        self.discount_percentage = Some(percentage);
        self
    }

    pub fn with_fixed_discount(mut self, amount: f64) -> Self {
        self.discount_amount = Some(amount);
        self
    }

    /// Read the `pricing` object of a class record, coercing every field.
    pub fn from_value(value: &Value) -> Self {
        let field = |name: &str| value.get(name).unwrap_or(&Value::Null);

        Self {
            per_session_rate: coerce::rate(field("perSessionRate")),
            total_sessions: coerce::session_count(field("totalSessions")),
            currency: coerce::currency(field("currency")),
            discount_percentage: coerce::optional_number(value.get("discountPercentage")),
            discount_amount: coerce::optional_number(value.get("discountAmount")),
        }
    }
}

impl From<Value> for ClassPricing {
    fn from(value: Value) -> Self {
        Self::from_value(&value)
    }
}

/// Mentor-level pricing policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Value")]
pub struct MentorPricing {
    pub first_session_free: bool,
}

impl MentorPricing {
    pub fn from_value(value: &Value) -> Self {
        Self {
            first_session_free: value.get("firstSessionFree").is_some_and(coerce::flag),
        }
    }
}

impl From<Value> for MentorPricing {
    fn from(value: Value) -> Self {
        Self::from_value(&value)
    }
}

/// Which discount rule the breakdown is labelled with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    FirstSessionFree,
    PercentageDiscount,
    FixedDiscount,
}

impl DiscountType {
    fn label(self) -> &'static str {
        match self {
            DiscountType::FirstSessionFree => "First Session Free",
            DiscountType::PercentageDiscount => "Package Discount",
            DiscountType::FixedDiscount => "Special Discount",
        }
    }
}

/// Result of pricing one class for one student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingBreakdown {
    pub subtotal: f64,
    pub discount_amount: f64,
    pub final_price: f64,
    pub currency: String,
    pub discount_type: Option<DiscountType>,
    pub per_session_rate: f64,
    pub total_sessions: i64,
}

impl PricingBreakdown {
    /// Breakdown for a class without pricing data
    pub fn zero() -> Self {
        Self {
            subtotal: 0.0,
            discount_amount: 0.0,
            final_price: 0.0,
            currency: DEFAULT_CURRENCY.to_string(),
            discount_type: None,
            per_session_rate: 0.0,
            total_sessions: 1,
        }
    }

    pub fn has_discount(&self) -> bool {
        self.discount_type.is_some()
    }
}

struct DiscountRule {
    kind: DiscountType,
    /// `Some` when the rule applies
    amount: Option<f64>,
}

/// Compute the payable amount for a class.
///
/// The three discount rules never stack. They are evaluated in a fixed
/// order (first session free, percentage, fixed) against the undiscounted
/// subtotal: the label comes from the first rule that applies, the amount
/// is the largest of the applicable ones.
pub fn compute_total_payable(
    class_pricing: Option<&ClassPricing>,
    mentor_pricing: Option<&MentorPricing>,
    is_first_session: bool,
) -> PricingBreakdown {
    let Some(pricing) = class_pricing else {
        return PricingBreakdown::zero();
    };

    let rate = coerce::finite(pricing.per_session_rate);
    let sessions = coerce::non_zero_sessions(pricing.total_sessions);
    let currency = coerce::currency_code(&pricing.currency);
    let percentage = pricing.discount_percentage.map(coerce::finite).unwrap_or(0.0);
    let fixed = pricing.discount_amount.map(coerce::finite).unwrap_or(0.0);

    let subtotal = rate * sessions as f64;

    let first_session_free =
        is_first_session && mentor_pricing.is_some_and(|m| m.first_session_free);

    let rules = [
        DiscountRule {
            kind: DiscountType::FirstSessionFree,
            amount: first_session_free.then_some(rate),
        },
        DiscountRule {
            kind: DiscountType::PercentageDiscount,
            amount: (percentage > 0.0).then(|| subtotal * percentage / 100.0),
        },
        DiscountRule {
            kind: DiscountType::FixedDiscount,
            amount: (fixed > 0.0).then_some(fixed),
        },
    ];

    let (discount_type, discount_amount) = select_discount(&rules);
    let final_price = (subtotal - discount_amount).max(0.0);

    tracing::trace!(
        subtotal,
        discount_amount,
        final_price,
        ?discount_type,
        "computed class price"
    );

    PricingBreakdown {
        subtotal,
        discount_amount,
        final_price,
        currency,
        discount_type,
        per_session_rate: rate,
        total_sessions: sessions,
    }
}

fn select_discount(rules: &[DiscountRule]) -> (Option<DiscountType>, f64) {
    let mut label = None;
    let mut amount = 0.0_f64;

    for rule in rules {
        let Some(candidate) = rule.amount else {
            continue;
        };

        amount = match rule.kind {
            DiscountType::FirstSessionFree => candidate,
            _ => amount.max(candidate),
        };
        label.get_or_insert(rule.kind);
    }

    (label, amount)
}

/// Render an amount as `{currency}{amount}` with two decimals, e.g. `GBP12.50`.
///
/// Missing or NaN amounts render as zero. The currency code is used
/// literally, with no symbol mapping and no thousands separators.
pub fn format_price(amount: Option<f64>, currency: Option<&str>) -> String {
    let currency = currency.unwrap_or(DEFAULT_CURRENCY);
    format!("{}{}", currency, to_fixed_2(amount.map(coerce::finite).unwrap_or(0.0)))
}

const EXPONENT_FORM_THRESHOLD: f64 = 1e21;

/// Human readable discount line, empty when no discount applies.
pub fn describe_discount(
    discount_type: Option<DiscountType>,
    discount_amount: Option<f64>,
    currency: Option<&str>,
) -> String {
    match discount_type {
        Some(kind) => format!("{} (-{})", kind.label(), format_price(discount_amount, currency)),
        None => String::new(),
    }
}

/// Average price of one session, two decimals and no currency prefix.
pub fn price_per_session(final_price: Option<f64>, total_sessions: i64) -> String {
    match final_price {
        Some(price) if total_sessions > 0 && !price.is_nan() => {
            to_fixed_2(coerce::finite(price / total_sessions as f64))
        }
        _ => to_fixed_2(0.0),
    }
}

/// Two decimals, exact binary ties (0.125, 10.375) rounded away from zero.
///
/// `{:.2}` on its own rounds those ties to even. Magnitudes of 1e21 and
/// above switch to exponent form (`1e+21`).
fn to_fixed_2(value: f64) -> String {
    // Folds -0.0 into 0.0
    let value = if value == 0.0 { 0.0 } else { value };
    if value.abs() >= EXPONENT_FORM_THRESHOLD {
        return format!("{:e}", value).replacen('e', "e+", 1);
    }
    let scaled = value * 100.0;
    let is_tie = (value * 8.0).fract() == 0.0 && scaled.fract().abs() == 0.5;

    if is_tie {
        format!("{:.2}", scaled.round() / 100.0)
    } else {
        format!("{:.2}", value)
    }
}

/// Display strings for a price tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingSummary {
    pub subtotal: String,
    pub discount: String,
    pub total: String,
    pub per_session: String,
}

impl PricingSummary {
    pub fn from_breakdown(breakdown: &PricingBreakdown) -> Self {
        let currency = Some(breakdown.currency.as_str());

        Self {
            subtotal: format_price(Some(breakdown.subtotal), currency),
            discount: describe_discount(
                breakdown.discount_type,
                Some(breakdown.discount_amount),
                currency,
            ),
            total: format_price(Some(breakdown.final_price), currency),
            per_session: price_per_session(Some(breakdown.final_price), breakdown.total_sessions),
        }
    }
}
