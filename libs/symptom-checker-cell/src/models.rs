use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BackendError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    /// Role name on the Gemini wire format.
    pub fn backend_role(self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "model",
        }
    }
}

/// Severity attached to an analysis, ordered from least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
    Emergency,
}

impl UrgencyLevel {
    pub const ALL: [UrgencyLevel; 4] = [
        UrgencyLevel::Low,
        UrgencyLevel::Medium,
        UrgencyLevel::High,
        UrgencyLevel::Emergency,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            UrgencyLevel::Low => "low",
            UrgencyLevel::Medium => "medium",
            UrgencyLevel::High => "high",
            UrgencyLevel::Emergency => "emergency",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomAnalysis {
    pub recommendations: Vec<String>,
    pub seek_medical_help: bool,
    pub urgency_level: UrgencyLevel,
    pub disclaimer: String,
}

impl SymptomAnalysis {
    /// Parses and validates the model's JSON reply.
    ///
    /// Tolerates a surrounding ```json fence. Rejects unknown urgency
    /// literals, a blank disclaimer and an empty or blank recommendation list.
    pub fn parse_reply(raw: &str) -> Result<Self, BackendError> {
        let body = strip_code_fence(raw);

        let analysis: SymptomAnalysis = serde_json::from_str(body)
            .map_err(|e| BackendError::SchemaMismatch(e.to_string()))?;

        if analysis.disclaimer.trim().is_empty() {
            return Err(BackendError::SchemaMismatch("disclaimer is empty".to_string()));
        }
        if analysis.recommendations.is_empty()
            || analysis.recommendations.iter().any(|r| r.trim().is_empty())
        {
            return Err(BackendError::SchemaMismatch(
                "recommendations must be a non-empty list of non-empty strings".to_string(),
            ));
        }

        Ok(analysis)
    }
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = inner.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening fence line.
    match inner.split_once('\n') {
        Some((_, rest)) => rest.trim(),
        None => inner.trim(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum MessageContent {
    Text(String),
    Analysis(SymptomAnalysis),
    /// Terminal apology shown after a failed exchange.
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub role: ChatRole,
    pub content: MessageContent,
}

/// Fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogueMode {
    /// Each description gets one structured analysis; no history is sent.
    Structured,
    /// Free-text chat; the whole transcript is sent on every turn.
    #[default]
    Conversational,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    AwaitingReply,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub mode: Option<DialogueMode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitMessageRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub symptoms: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub mode: DialogueMode,
    pub state: SessionState,
    pub message_count: usize,
    pub created_at: DateTime<Utc>,
}
