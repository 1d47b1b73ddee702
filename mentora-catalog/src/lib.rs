pub mod coerce;
pub mod offering;
pub mod pricing;

pub use offering::{ClassOffering, MentorProfile};
pub use pricing::{
    compute_total_payable, describe_discount, format_price, price_per_session, ClassPricing,
    DiscountType, MentorPricing, PricingBreakdown, PricingSummary, DEFAULT_CURRENCY,
};
