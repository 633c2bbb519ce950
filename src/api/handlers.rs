use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{
        Account, ProductView, RecommendationRequest, RecommendationResponse, SigninRequest,
        SignupRequest,
    },
    services::{
        search::{filter_by_substring, parse_limit, NO_RESULTS_MESSAGE},
        storefront::{trending_page, TrendingPage},
    },
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    pub results: Vec<ProductView>,
    pub message: Option<String>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Landing page products with display decorations
pub async fn trending(State(state): State<AppState>) -> Json<TrendingPage> {
    Json(trending_page(state.trending.head(state.trending_count)))
}

fn require(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidInput(format!("{} is required", field)));
    }
    Ok(())
}

/// Register a new account
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<Account>)> {
    require("username", &request.username)?;
    require("email", &request.email)?;
    require("password", &request.password)?;

    let account = state
        .accounts
        .create_account(&request.username, &request.email, &request.password)
        .await?;

    tracing::info!(account_id = %account.id, username = %account.username, "Account created");

    Ok((StatusCode::CREATED, Json(account)))
}

/// Check credentials for an existing account
pub async fn signin(
    State(state): State<AppState>,
    Json(request): Json<SigninRequest>,
) -> AppResult<Json<Account>> {
    require("username", &request.username)?;

    let account = state
        .accounts
        .verify_credentials(&request.username, &request.password)
        .await
        .map_err(|e| {
            tracing::warn!(username = %request.username, "Sign-in rejected");
            e
        })?;

    Ok(Json(account))
}

/// Content-based recommendations for a named product
pub async fn recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    let top_n = request
        .nbr
        .as_ref()
        .ok_or_else(|| AppError::InvalidInput("Number of recommendations is required".to_string()))?
        .to_top_n()?;

    if request.prod.is_empty() {
        return Err(AppError::InvalidInput("Product name is required".to_string()));
    }

    tracing::info!(
        request_id = %request_id,
        product = %request.prod,
        top_n = top_n.get(),
        "Processing recommendation request"
    );

    let response = match state.recommender.recommend(&request.prod, top_n) {
        Some(items) => {
            tracing::info!(request_id = %request_id, returned = items.len(), "Recommendations ranked");
            RecommendationResponse::found(items)
        }
        None => {
            tracing::info!(request_id = %request_id, "Product not in catalog");
            RecommendationResponse::unavailable()
        }
    };

    Ok(Json(response))
}

/// Case-insensitive name search
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Json<SearchResponse> {
    let limit = parse_limit(params.limit.as_deref());
    let results = filter_by_substring(&state.catalog, &params.q, limit);

    let message = results.is_empty().then(|| NO_RESULTS_MESSAGE.to_string());
    Json(SearchResponse { results, message })
}
