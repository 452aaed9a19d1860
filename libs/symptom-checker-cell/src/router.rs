use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware,
};

use shared_utils::extractor::{auth_middleware, AuthContext};

use crate::handlers;
use crate::services::SymptomCheckerService;

pub fn symptom_checker_routes(service: Arc<SymptomCheckerService>, auth: AuthContext) -> Router {
    // Every symptom checker route requires an authenticated session
    Router::new()
        .route("/analyze", post(handlers::analyze_symptoms))
        .route("/sessions", post(handlers::create_session))
        .route(
            "/sessions/{session_id}",
            get(handlers::get_session).delete(handlers::end_session),
        )
        .route("/sessions/{session_id}/messages", post(handlers::submit_message))
        .layer(middleware::from_fn_with_state(auth, auth_middleware))
        .with_state(service)
}
