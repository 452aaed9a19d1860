use std::sync::Arc;

use axum::{
    Router,
    routing::get,
    middleware,
};

use shared_utils::extractor::{auth_middleware, AuthContext};

use crate::handlers;
use crate::services::DirectoryService;

pub fn directory_routes(directory: Arc<DirectoryService>, auth: AuthContext) -> Router {
    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/doctors", get(handlers::search_doctors))
        .route("/doctors/{doctor_id}", get(handlers::get_doctor))
        .route("/hospitals", get(handlers::search_hospitals))
        .route("/hospitals/{hospital_id}", get(handlers::get_hospital));

    // Protected routes (authentication required)
    let protected_routes = Router::new()
        .route("/appointments", get(handlers::list_appointments))
        .route("/dashboard", get(handlers::get_dashboard))
        .layer(middleware::from_fn_with_state(auth, auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(directory)
}
