use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct JwtHeader {
    pub alg: String,
    pub typ: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub sid: String,
    pub exp: Option<u64>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub name: Option<String>,
    pub iat: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub role: Option<String>,
    pub display_name: Option<String>,
    pub session_id: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// First word of the display name, as used in greetings.
    pub fn first_name(&self) -> Option<&str> {
        self.display_name
            .as_deref()
            .and_then(|name| name.split_whitespace().next())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub valid: bool,
    pub user_id: String,
    pub email: Option<String>,
    pub role: Option<String>,
}

/// Holds the set of live portal sessions.
///
/// Login calls `init`, every protected request calls `resolve`, logout calls
/// `teardown`. Implementations are a simulation of a signed-in state and must
/// not be treated as a security boundary.
#[async_trait]
pub trait AuthStateProvider: Send + Sync {
    async fn init(&self, user: User);

    async fn resolve(&self, session_id: &str) -> Option<User>;

    /// Returns `true` if a session was removed.
    async fn teardown(&self, session_id: &str) -> bool;
}

/// Told when a user signs out so state owned by that user can be dropped.
#[async_trait]
pub trait LogoutListener: Send + Sync {
    async fn on_logout(&self, user: &User);
}
