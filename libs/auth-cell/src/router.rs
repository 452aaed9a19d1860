use axum::{
    Router,
    routing::{get, post},
    middleware,
};

use shared_utils::extractor::{auth_middleware, AuthContext};

use crate::handlers;

pub fn auth_routes(auth: AuthContext) -> Router {
    let public_routes = Router::new()
        .route("/login", post(handlers::login))
        .route("/validate", post(handlers::validate_session_token));

    let protected_routes = Router::new()
        .route("/logout", post(handlers::logout))
        .route("/session", get(handlers::get_session))
        .layer(middleware::from_fn_with_state(auth.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(auth)
}
