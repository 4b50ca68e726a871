//! HTTP routes and handlers for the sales service

use axum::{
    Json, Router,
    extract::{Path, State},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::{
    error::AppError,
    middleware::authorize,
    models::{Sale, User},
    state::AppState,
};

/// Request for user sign-up
#[derive(Deserialize)]
pub struct SignUpRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

/// Request for user sign-in
#[derive(Deserialize)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

/// Response carrying an issued bearer token
#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Response carrying the id a mutation applied to
#[derive(Serialize)]
pub struct IdResponse {
    pub id: String,
}

/// Create the router for the sales service
pub fn create_router(state: AppState) -> Router {
    let sale_routes = Router::new()
        .route("/api/v1/sale/", get(get_all_sales).post(create_sale))
        .route(
            "/api/v1/sale/:id",
            get(get_sale).put(update_sale).delete(delete_sale),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), authorize));

    Router::new()
        .route("/health", get(health_check))
        .route("/auth/sign-up", post(sign_up))
        .route("/auth/sign-in", post(sign_in))
        .merge(sale_routes)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "sales-service"
    }))
}

/// User sign-up endpoint
pub async fn sign_up(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<SignUpRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    info!(username = %payload.username, "sign-up attempt");

    // password_digest temporarily holds the plaintext; the service replaces
    // it with the digest before the record is stored
    let user = User {
        id: String::new(),
        username: payload.username,
        password_digest: payload.password,
        email: payload.email,
    };

    let token = state.service.sign_up(user).await?;
    Ok(Json(TokenResponse { token }))
}

/// User sign-in endpoint
pub async fn sign_in(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<SignInRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    info!(username = %payload.username, "sign-in attempt");

    let token = state
        .service
        .sign_in(&payload.username, &payload.password)
        .await?;
    Ok(Json(TokenResponse { token }))
}

/// List all sales
pub async fn get_all_sales(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let sales = state.service.get_all_sales().await?;
    Ok(Json(sales))
}

/// Get a sale by id
pub async fn get_sale(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let sale = state.service.get_sale(&id).await?;
    Ok(Json(sale))
}

/// Create a new sale
pub async fn create_sale(
    State(state): State<AppState>,
    WithRejection(Json(sale), _): WithRejection<Json<Sale>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let id = state.service.create_sale(&sale).await?;
    Ok(Json(IdResponse { id }))
}

/// Replace the sale identified by the path id
pub async fn update_sale(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(sale), _): WithRejection<Json<Sale>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    state.service.update_sale(&id, sale).await?;
    Ok(Json(IdResponse { id }))
}

/// Delete the sale identified by the path id
pub async fn delete_sale(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.service.delete_sale(&id).await?;
    Ok(Json(IdResponse { id }))
}
