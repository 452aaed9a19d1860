use axum::{
    extract::{Extension, State},
    http::HeaderMap,
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

use shared_models::auth::{TokenResponse, User};
use shared_models::error::AppError;
use shared_utils::extractor::{extract_bearer_token, AuthContext};

use crate::models::{LoginRequest, LoginResponse};
use crate::services::SessionService;

#[axum::debug_handler]
pub async fn login(
    State(auth): State<AuthContext>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    debug!("Login attempt");

    let response = SessionService::new(&auth).login(request).await?;

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn logout(
    State(auth): State<AuthContext>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let ended = SessionService::new(&auth).logout(&user).await;

    Ok(Json(json!({ "success": ended })))
}

#[axum::debug_handler]
pub async fn get_session(
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    debug!("Getting session for user: {}", user.id);

    Ok(Json(json!({
        "authenticated": true,
        "user": user
    })))
}

#[axum::debug_handler]
pub async fn validate_session_token(
    State(auth): State<AuthContext>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, AppError> {
    debug!("Validating token");

    let token = extract_bearer_token(&headers)?;
    let user = auth.authenticate(&token).await?;

    Ok(Json(TokenResponse {
        valid: true,
        user_id: user.id,
        email: user.email,
        role: user.role,
    }))
}
