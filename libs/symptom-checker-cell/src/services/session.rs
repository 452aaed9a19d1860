use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{BackendError, SymptomCheckerError, APOLOGY_MESSAGE};
use crate::models::{
    ChatMessage, ChatRole, DialogueMode, MessageContent, SessionState, SessionSummary,
    SymptomAnalysis,
};
use crate::services::backend::{BackendMessage, CompletionRequest, ResponseFormat};
use crate::services::prompt::{analysis_instruction, chat_instruction, MIN_SYMPTOM_CHARS};

/// One symptom conversation: an append-only transcript plus the
/// `Idle -> AwaitingReply -> Idle` state machine around each submission.
///
/// The session never talks to the backend itself. `begin_submit` hands out
/// the request to send and `resolve` takes the outcome, so callers can drop
/// any lock on the session while the call is in flight.
#[derive(Debug, Clone)]
pub struct DialogueSession {
    id: Uuid,
    mode: DialogueMode,
    state: SessionState,
    messages: Vec<ChatMessage>,
    next_id: u64,
    created_at: DateTime<Utc>,
}

impl DialogueSession {
    pub fn new(mode: DialogueMode) -> Self {
        Self {
            id: Uuid::new_v4(),
            mode,
            state: SessionState::Idle,
            messages: Vec::new(),
            next_id: 1,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn mode(&self) -> DialogueMode {
        self.mode
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.state == SessionState::AwaitingReply
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id,
            mode: self.mode,
            state: self.state,
            message_count: self.messages.len(),
            created_at: self.created_at,
        }
    }

    /// Validates `text`, appends it as a user message and moves to
    /// `AwaitingReply`. Rejections leave the transcript untouched.
    pub fn begin_submit(&mut self, text: &str) -> Result<CompletionRequest, SymptomCheckerError> {
        if self.is_awaiting_reply() {
            debug!("Session {} already awaiting a reply, ignoring submission", self.id);
            return Err(SymptomCheckerError::ReplyPending);
        }

        let text = validate_input(text, self.mode)?;

        self.push(ChatRole::User, MessageContent::Text(text.to_string()));
        self.state = SessionState::AwaitingReply;

        Ok(self.build_request(text))
    }

    /// Appends the assistant reply (or the apology on failure) and returns
    /// to `Idle`. Returns `None` when no submission was pending.
    pub fn resolve(&mut self, outcome: Result<String, BackendError>) -> Option<ChatMessage> {
        if !self.is_awaiting_reply() {
            return None;
        }

        let content = match outcome.and_then(|raw| self.reply_content(raw)) {
            Ok(content) => content,
            Err(err) => {
                warn!(
                    session_id = %self.id,
                    error_kind = err.kind(),
                    "Symptom checker exchange failed: {}",
                    err
                );
                MessageContent::Error(APOLOGY_MESSAGE.to_string())
            }
        };

        self.state = SessionState::Idle;
        Some(self.push(ChatRole::Assistant, content))
    }

    fn reply_content(&self, raw: String) -> Result<MessageContent, BackendError> {
        match self.mode {
            DialogueMode::Structured => SymptomAnalysis::parse_reply(&raw).map(MessageContent::Analysis),
            DialogueMode::Conversational => Ok(MessageContent::Text(raw)),
        }
    }

    fn build_request(&self, current: &str) -> CompletionRequest {
        match self.mode {
            DialogueMode::Structured => CompletionRequest {
                system_instruction: analysis_instruction(),
                messages: vec![BackendMessage::user(current)],
                format: ResponseFormat::Analysis,
            },
            DialogueMode::Conversational => CompletionRequest {
                system_instruction: chat_instruction(),
                messages: replay_history(&self.messages),
                format: ResponseFormat::Text,
            },
        }
    }

    fn push(&mut self, role: ChatRole, content: MessageContent) -> ChatMessage {
        let message = ChatMessage { id: self.next_id, role, content };
        self.next_id += 1;
        self.messages.push(message.clone());
        message
    }
}

/// Trims and checks a symptom description for the given mode.
pub fn validate_input(text: &str, mode: DialogueMode) -> Result<&str, SymptomCheckerError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(SymptomCheckerError::EmptyInput);
    }
    if mode == DialogueMode::Structured && text.chars().count() < MIN_SYMPTOM_CHARS {
        return Err(SymptomCheckerError::TooShort { min: MIN_SYMPTOM_CHARS });
    }
    Ok(text)
}

/// Builds the turns sent to the model in conversational mode.
///
/// Apologies are local to the transcript and never replayed. Dropping one
/// leaves two user turns back to back, so consecutive turns of the same
/// role are merged into one, joined by a blank line, and the model always
/// sees strictly alternating roles.
fn replay_history(messages: &[ChatMessage]) -> Vec<BackendMessage> {
    let mut turns: Vec<BackendMessage> = Vec::new();

    for message in messages {
        let text = match &message.content {
            MessageContent::Text(text) => text.clone(),
            MessageContent::Analysis(analysis) => match serde_json::to_string(analysis) {
                Ok(json) => json,
                Err(_) => continue,
            },
            MessageContent::Error(_) => continue,
        };

        match turns.last_mut() {
            Some(last) if last.role == message.role => {
                last.text.push_str("\n\n");
                last.text.push_str(&text);
            }
            _ => turns.push(BackendMessage { role: message.role, text }),
        }
    }

    turns
}
