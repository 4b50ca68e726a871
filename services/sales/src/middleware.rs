//! Authorization middleware for protected routes
//!
//! Gates every `/api/v1/*` route: the request must carry an
//! `Authorization: Bearer <token>` header whose token verifies, otherwise
//! the wrapped handler is never invoked.

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::{error::AppError, state::AppState};

/// Subject id of the verified token, placed in request extensions for
/// handlers that need the caller's identity
#[derive(Debug, Clone)]
pub struct Subject(pub String);

/// Extract and verify the bearer token from the Authorization header
pub async fn authorize(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .unwrap_or_default();

    if header_value.is_empty() {
        return Err(AppError::Unauthorized(
            "unauthorized: header is empty".to_string(),
        ));
    }

    let parts: Vec<&str> = header_value.split(' ').collect();
    if parts.len() != 2 || parts[0] != "Bearer" || parts[1].is_empty() {
        return Err(AppError::Unauthorized("unauthorized".to_string()));
    }

    let subject = state
        .service
        .parse_token(parts[1])
        .map_err(|_| AppError::Unauthorized("unauthorized: not valid token".to_string()))?;

    debug!(user_id = %subject, "request authorized");
    req.extensions_mut().insert(Subject(subject));

    Ok(next.run(req).await)
}
