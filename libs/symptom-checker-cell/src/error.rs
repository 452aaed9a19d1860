use thiserror::Error;

use shared_models::error::AppError;

/// Shown in place of an assistant reply whenever an exchange fails.
pub const APOLOGY_MESSAGE: &str =
    "I'm sorry, but I encountered an error while analyzing your symptoms. Please try again later.";

/// Returned by the stateless analysis endpoint when the backend fails.
pub const ANALYSIS_ERROR_MESSAGE: &str =
    "An error occurred while analyzing your symptoms. Please try again later.";

/// Failures of one call to the AI backend. Each variant carries a stable
/// `kind()` tag for logs; users only ever see `APOLOGY_MESSAGE`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("AI backend is not configured")]
    NotConfigured,

    #[error("AI backend transport error: {0}")]
    Transport(String),

    #[error("AI backend returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Response blocked by safety filter: {0}")]
    SafetyBlock(String),

    #[error("AI backend returned no text")]
    EmptyReply,

    #[error("Response did not match the analysis schema: {0}")]
    SchemaMismatch(String),
}

impl BackendError {
    pub fn kind(&self) -> &'static str {
        match self {
            BackendError::NotConfigured => "not_configured",
            BackendError::Transport(_) => "transport",
            BackendError::Status { .. } => "backend_status",
            BackendError::SafetyBlock(_) => "safety_block",
            BackendError::EmptyReply => "empty_reply",
            BackendError::SchemaMismatch(_) => "schema_mismatch",
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        BackendError::Transport(err.to_string())
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum SymptomCheckerError {
    #[error("Please describe your symptoms.")]
    EmptyInput,

    #[error("Please describe your symptoms in at least {min} characters.")]
    TooShort { min: usize },

    #[error("A reply is still pending for this session.")]
    ReplyPending,

    #[error("Symptom checker session not found")]
    SessionNotFound,

    #[error("{}", ANALYSIS_ERROR_MESSAGE)]
    Backend(#[from] BackendError),
}

impl From<SymptomCheckerError> for AppError {
    fn from(err: SymptomCheckerError) -> Self {
        match err {
            SymptomCheckerError::EmptyInput | SymptomCheckerError::TooShort { .. } => {
                AppError::ValidationError(err.to_string())
            }
            SymptomCheckerError::ReplyPending => AppError::Conflict(err.to_string()),
            SymptomCheckerError::SessionNotFound => AppError::NotFound(err.to_string()),
            SymptomCheckerError::Backend(_) => AppError::ExternalService(err.to_string()),
        }
    }
}
