use axum::{
    extract::State,
    http::{Method, Uri},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod app_config;
pub mod error;
pub mod pricing;
pub mod state;

pub use error::AppError;
pub use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = if state.config.cors.allow_any_origin {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::USER_AGENT,
            ])
    } else {
        CorsLayer::new()
    };

    Router::new()
        .route("/health", get(health))
        .merge(pricing::routes())
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health
async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "mentora-api",
        "environment": state.config.environment,
    }))
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFoundError(format!("No route for {}", uri.path()))
}
