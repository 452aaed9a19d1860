use async_trait::async_trait;
use serde::Serialize;

use crate::error::BackendError;
use crate::models::ChatRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Free text.
    Text,
    /// A JSON object shaped like `SymptomAnalysis`.
    Analysis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackendMessage {
    pub role: ChatRole,
    pub text: String,
}

impl BackendMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: ChatRole::User, text: text.into() }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self { role: ChatRole::Assistant, text: text.into() }
    }
}

/// One completion call: instruction, ordered turns and the expected reply shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub system_instruction: String,
    pub messages: Vec<BackendMessage>,
    pub format: ResponseFormat,
}

/// A generative-AI completion service. Returns the raw reply text; callers
/// validate structured replies themselves.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SymptomBackend: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, BackendError>;
}
