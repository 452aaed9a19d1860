use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use serde::Deserialize;

use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{AppointmentsOverview, Dashboard, DoctorView, Hospital, SearchResults};
use crate::services::DirectoryService;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

// ==============================================================================
// PUBLIC HANDLERS (NO AUTHENTICATION REQUIRED)
// ==============================================================================

#[axum::debug_handler]
pub async fn search_doctors(
    State(directory): State<Arc<DirectoryService>>,
    Query(query): Query<SearchQuery>,
) -> Json<SearchResults<DoctorView>> {
    Json(directory.search_doctors(&query.q))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(directory): State<Arc<DirectoryService>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<DoctorView>, AppError> {
    Ok(Json(directory.get_doctor(&doctor_id)?))
}

#[axum::debug_handler]
pub async fn search_hospitals(
    State(directory): State<Arc<DirectoryService>>,
    Query(query): Query<SearchQuery>,
) -> Json<SearchResults<Hospital>> {
    Json(directory.search_hospitals(&query.q))
}

#[axum::debug_handler]
pub async fn get_hospital(
    State(directory): State<Arc<DirectoryService>>,
    Path(hospital_id): Path<String>,
) -> Result<Json<Hospital>, AppError> {
    Ok(Json(directory.get_hospital(&hospital_id)?))
}

// ==============================================================================
// PROTECTED HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_appointments(
    State(directory): State<Arc<DirectoryService>>,
    Extension(_user): Extension<User>,
) -> Json<AppointmentsOverview> {
    Json(directory.appointments())
}

#[axum::debug_handler]
pub async fn get_dashboard(
    State(directory): State<Arc<DirectoryService>>,
    Extension(user): Extension<User>,
) -> Json<Dashboard> {
    Json(directory.dashboard(&user))
}
