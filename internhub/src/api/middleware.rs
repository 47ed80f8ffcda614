//! Authentication middleware for Axum

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::auth::JwtAuth;
use crate::error::ApiError;

/// Authentication state shared across requests
#[derive(Clone)]
pub struct AuthState {
    pub jwt_auth: Arc<JwtAuth>,
}

impl AuthState {
    pub fn new(secret: &str) -> Self {
        Self {
            jwt_auth: Arc::new(JwtAuth::new(secret)),
        }
    }
}

/// Identity resolved from a validated token
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
    pub email: String,
}

/// Authentication middleware that validates JWT tokens
///
/// A missing or unreadable header is rejected before validation (401);
/// a present-but-invalid token is rejected as forbidden (403).
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::Unauthenticated("Token required".to_string()))?;

    // Extract bearer token
    let token = JwtAuth::extract_bearer_token(auth_header)
        .map_err(|_| ApiError::Unauthenticated("Token required".to_string()))?;

    // Validate token
    let claims = state
        .jwt_auth
        .validate_token(&token)
        .map_err(|_| ApiError::Forbidden)?;

    // Store the identity in request extensions for later use
    request.extensions_mut().insert(CurrentUser {
        id: claims.sub,
        username: claims.username,
        email: claims.email,
    });

    Ok(next.run(request).await)
}
