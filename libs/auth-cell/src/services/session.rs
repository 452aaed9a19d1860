use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use shared_models::auth::{AuthStateProvider, User};
use shared_utils::extractor::AuthContext;
use shared_utils::jwt::issue_token;

use crate::models::{AuthError, LoginRequest, LoginResponse};
use crate::services::credentials::{display_name_from_email, validate_credentials};

/// Process-local session table. Sessions live until logout or restart.
#[derive(Default)]
pub struct InMemoryAuthState {
    sessions: RwLock<HashMap<String, User>>,
}

impl InMemoryAuthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn active_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl AuthStateProvider for InMemoryAuthState {
    async fn init(&self, user: User) {
        debug!("Initializing session {} for user {}", user.session_id, user.id);
        self.sessions.write().await.insert(user.session_id.clone(), user);
    }

    async fn resolve(&self, session_id: &str) -> Option<User> {
        self.sessions.read().await.get(session_id).cloned()
    }

    async fn teardown(&self, session_id: &str) -> bool {
        let removed = self.sessions.write().await.remove(session_id).is_some();
        debug!("Tearing down session {} (existed: {})", session_id, removed);
        removed
    }
}

pub struct SessionService<'a> {
    auth: &'a AuthContext,
}

impl<'a> SessionService<'a> {
    pub fn new(auth: &'a AuthContext) -> Self {
        Self { auth }
    }

    /// Simulated sign-in: any well-formed credentials open a session.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AuthError> {
        validate_credentials(&request)?;

        let email = request.email.trim().to_lowercase();
        let user = User {
            // Stable per email so repeated logins map to the same patient.
            id: Uuid::new_v5(&Uuid::NAMESPACE_OID, email.as_bytes()).to_string(),
            display_name: Some(display_name_from_email(&email)),
            email: Some(email),
            role: Some("patient".to_string()),
            session_id: Uuid::new_v4().to_string(),
            created_at: Some(Utc::now()),
        };

        let ttl_hours = self.auth.config.session_ttl_hours;
        let token = issue_token(&user, &self.auth.config.session_jwt_secret, ttl_hours)
            .map_err(AuthError::Signing)?;

        self.auth.provider.init(user.clone()).await;
        info!("User {} signed in", user.id);

        Ok(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in_hours: ttl_hours,
            user,
        })
    }

    pub async fn logout(&self, user: &User) -> bool {
        let ended = self.auth.provider.teardown(&user.session_id).await;
        if ended {
            self.auth.notify_logout(user).await;
            info!("User {} signed out", user.id);
        }
        ended
    }
}
