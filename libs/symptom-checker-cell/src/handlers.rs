use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{AnalyzeRequest, CreateSessionRequest, SubmitMessageRequest};
use crate::services::render::{AnalyzeResponse, SessionView};
use crate::services::SymptomCheckerService;

#[axum::debug_handler]
pub async fn analyze_symptoms(
    State(service): State<Arc<SymptomCheckerService>>,
    Extension(user): Extension<User>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    debug!("Single-shot symptom analysis for user {}", user.id);

    let response = service.analyze(&request.symptoms).await?;

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn create_session(
    State(service): State<Arc<SymptomCheckerService>>,
    Extension(user): Extension<User>,
    request: Option<Json<CreateSessionRequest>>,
) -> (StatusCode, Json<SessionView>) {
    let mode = request.and_then(|Json(req)| req.mode);
    let view = service.start_session(&user, mode).await;

    (StatusCode::CREATED, Json(view))
}

#[axum::debug_handler]
pub async fn get_session(
    State(service): State<Arc<SymptomCheckerService>>,
    Extension(user): Extension<User>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(service.get_session(&user, session_id).await?))
}

#[axum::debug_handler]
pub async fn submit_message(
    State(service): State<Arc<SymptomCheckerService>>,
    Extension(user): Extension<User>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SubmitMessageRequest>,
) -> Result<Json<SessionView>, AppError> {
    let view = service.submit(&user, session_id, &request.text).await?;

    Ok(Json(view))
}

#[axum::debug_handler]
pub async fn end_session(
    State(service): State<Arc<SymptomCheckerService>>,
    Extension(user): Extension<User>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    service.end_session(&user, session_id).await?;

    Ok(Json(json!({ "success": true })))
}
