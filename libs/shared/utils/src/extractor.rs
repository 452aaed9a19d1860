use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use shared_config::AppConfig;
use shared_models::auth::{AuthStateProvider, LogoutListener, User};
use shared_models::error::AppError;

use crate::jwt::validate_token;

/// State handed to `auth_middleware`: the signing secret plus the provider
/// that knows which sessions are still live.
#[derive(Clone)]
pub struct AuthContext {
    pub config: Arc<AppConfig>,
    pub provider: Arc<dyn AuthStateProvider>,
    logout_listeners: Vec<Arc<dyn LogoutListener>>,
}

impl AuthContext {
    pub fn new(config: Arc<AppConfig>, provider: Arc<dyn AuthStateProvider>) -> Self {
        Self { config, provider, logout_listeners: Vec::new() }
    }

    pub fn with_logout_listener(mut self, listener: Arc<dyn LogoutListener>) -> Self {
        self.logout_listeners.push(listener);
        self
    }

    pub async fn notify_logout(&self, user: &User) {
        for listener in &self.logout_listeners {
            listener.on_logout(user).await;
        }
    }

    /// Validates `token` and checks that its session has not been torn down.
    pub async fn authenticate(&self, token: &str) -> Result<User, AppError> {
        let claimed = validate_token(token, &self.config.session_jwt_secret)
            .map_err(AppError::Auth)?;

        match self.provider.resolve(&claimed.session_id).await {
            Some(user) if user.id == claimed.id => Ok(user),
            Some(_) => Err(AppError::Auth("Session does not belong to token subject".to_string())),
            None => {
                debug!("Session {} is no longer active", claimed.session_id);
                Err(AppError::Auth("Session has ended".to_string()))
            }
        }
    }
}

pub fn extract_bearer_token(headers: &HeaderMap) -> Result<String, AppError> {
    let auth_header = headers
        .get("Authorization")
        .ok_or_else(|| AppError::Auth("Missing authorization header".to_string()))?;

    let auth_value = auth_header
        .to_str()
        .map_err(|_| AppError::Auth("Invalid authorization header format".to_string()))?;

    auth_value
        .strip_prefix("Bearer ")
        .map(str::to_string)
        .ok_or_else(|| AppError::Auth("Invalid authorization header format".to_string()))
}

pub async fn auth_middleware(
    State(auth): State<AuthContext>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(request.headers())?;

    let user = auth.authenticate(&token).await?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
