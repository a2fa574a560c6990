//! # Request Handlers
//!
//! Axum request handlers for the checkout API.

use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use pay_core::CheckoutResult;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create checkout request
#[derive(Debug, Deserialize)]
pub struct CreateCheckoutRequest {
    /// Price (Paystack plan code) to subscribe to
    pub price_id: String,
    /// Landing page after payment; also the base of error redirects
    #[serde(default)]
    pub redirect_path: Option<String>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl Into<String>) -> ApiError {
    (status, Json(ErrorResponse::new(error, status.as_u16())))
}

/// Extract the bearer token from the Authorization header
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "paystack-checkout",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Start a Paystack checkout for the caller.
///
/// Once the price is known the answer is always 200; failures inside the
/// checkout come back as an `errorRedirect`.
#[instrument(skip(state, headers, request), fields(price_id = %request.price_id))]
pub async fn create_checkout(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateCheckoutRequest>,
) -> Result<Json<CheckoutResult>, ApiError> {
    let price = state.catalog.get(&request.price_id).ok_or_else(|| {
        api_error(
            StatusCode::NOT_FOUND,
            format!("Price not found: {}", request.price_id),
        )
    })?;

    if !price.active {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            format!("Price is not available: {}", request.price_id),
        ));
    }

    if let Some(path) = request.redirect_path.as_deref() {
        if !is_site_relative(path) {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                format!("redirect_path must be a site-relative path: {}", path),
            ));
        }
    }

    let session = state.sessions.session(bearer_token(&headers));
    let result = state
        .initiator
        .checkout(&*session, price, request.redirect_path.as_deref())
        .await;

    info!("Checkout finished: success={}", result.is_success());

    Ok(Json(result))
}

/// A path on this site: one leading slash, never `//host` or a backslash.
fn is_site_relative(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.contains('\\')
        && !path.chars().any(char::is_control)
}

/// List active prices
pub async fn list_prices(State(state): State<AppState>) -> impl IntoResponse {
    let prices: Vec<_> = state.catalog.active_prices().collect();
    Json(serde_json::json!({
        "prices": prices,
        "count": prices.len()
    }))
}

/// Get a single price
pub async fn get_price(
    State(state): State<AppState>,
    Path(price_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let price = state.catalog.get(&price_id).ok_or_else(|| {
        api_error(
            StatusCode::NOT_FOUND,
            format!("Price not found: {}", price_id),
        )
    })?;

    Ok(Json(price.clone()))
}
