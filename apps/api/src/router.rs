use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use chrono::NaiveDate;

use auth_cell::router::auth_routes;
use auth_cell::InMemoryAuthState;
use directory_cell::{directory_routes, DirectoryError, DirectoryService};
use shared_config::AppConfig;
use shared_utils::extractor::AuthContext;
use symptom_checker_cell::api::SymptomCheckerService;
use symptom_checker_cell::symptom_checker_routes;

/// Wires the services behind the router. Signing out ends the user's
/// symptom checker sessions.
pub fn build_app(config: AppConfig, today: NaiveDate) -> Result<Router, DirectoryError> {
    let directory = Arc::new(DirectoryService::from_fixtures(today)?);
    let symptom_checker = Arc::new(SymptomCheckerService::from_config(&config));
    let auth = AuthContext::new(Arc::new(config), Arc::new(InMemoryAuthState::new()))
        .with_logout_listener(symptom_checker.clone());

    Ok(create_router(auth, directory, symptom_checker))
}

pub fn create_router(
    auth: AuthContext,
    directory: Arc<DirectoryService>,
    symptom_checker: Arc<SymptomCheckerService>,
) -> Router {
    Router::new()
        .route("/", get(|| async { "Care Portal API is running!" }))
        .nest("/auth", auth_routes(auth.clone()))
        .nest("/directory", directory_routes(directory, auth.clone()))
        .nest("/symptom-checker", symptom_checker_routes(symptom_checker, auth))
}
