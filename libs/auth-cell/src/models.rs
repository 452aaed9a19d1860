use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::auth::User;
use shared_models::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in_hours: i64,
    pub user: User,
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Please enter a valid email.")]
    InvalidEmail,

    #[error("Please enter your password.")]
    MissingPassword,

    #[error("Session signing is not configured: {0}")]
    Signing(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidEmail | AuthError::MissingPassword => {
                AppError::ValidationError(err.to_string())
            }
            AuthError::Signing(_) => AppError::Internal(err.to_string()),
        }
    }
}
