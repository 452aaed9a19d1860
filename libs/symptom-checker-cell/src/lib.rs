// Symptom checker cell: AI-assisted symptom dialogue sessions
pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use error::{BackendError, SymptomCheckerError};
pub use models::{
    ChatMessage,
    ChatRole,
    DialogueMode,
    MessageContent,
    SessionState,
    SymptomAnalysis,
    UrgencyLevel,
};
pub use router::symptom_checker_routes;

pub mod api {
    pub use crate::services::backend::{BackendMessage, CompletionRequest, ResponseFormat, SymptomBackend};
    pub use crate::services::checker::SymptomCheckerService;
    pub use crate::services::gemini::GeminiBackend;
    pub use crate::services::render::{AnalysisCard, AnalyzeResponse, Block, SessionView};
    pub use crate::services::session::DialogueSession;
    pub use crate::services::store::SessionStore;
}
