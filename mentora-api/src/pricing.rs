use axum::{extract::rejection::JsonRejection, routing::post, Json, Router};
use mentora_catalog::{
    coerce, format_price, ClassOffering, MentorProfile, PricingBreakdown, PricingSummary,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Class and mentor records exactly as the frontend fetched them.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteRequest {
    pub class: ClassOffering,
    pub mentor: Option<MentorProfile>,
    pub is_first_session: Value,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub breakdown: PricingBreakdown,
    pub summary: PricingSummary,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FormatRequest {
    pub amount: Value,
    pub currency: Value,
}

#[derive(Debug, Serialize)]
pub struct FormatResponse {
    pub formatted: String,
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/pricing/quote", post(quote))
        .route("/v1/pricing/format", post(format_amount))
}

/// POST /v1/pricing/quote
/// Price a class for a student. Incomplete records quote as zero.
async fn quote(
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> Result<Json<QuoteResponse>, AppError> {
    let Json(req) = payload?;

    let is_first_session = coerce::flag(&req.is_first_session);
    let breakdown = req.class.quote(req.mentor.as_ref(), is_first_session);

    tracing::info!(
        class = req.class.title.as_deref().unwrap_or("untitled"),
        final_price = breakdown.final_price,
        currency = %breakdown.currency,
        discount = ?breakdown.discount_type,
        "Quoted class"
    );

    let summary = PricingSummary::from_breakdown(&breakdown);
    Ok(Json(QuoteResponse { breakdown, summary }))
}

/// POST /v1/pricing/format
async fn format_amount(
    payload: Result<Json<FormatRequest>, JsonRejection>,
) -> Result<Json<FormatResponse>, AppError> {
    let Json(req) = payload?;

    let amount = coerce::optional_number(Some(&req.amount));
    let formatted = format_price(amount, coerce::optional_str(&req.currency));

    Ok(Json(FormatResponse { formatted }))
}
