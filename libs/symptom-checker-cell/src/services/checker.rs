use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::{LogoutListener, User};

use crate::error::{BackendError, SymptomCheckerError};
use crate::models::{DialogueMode, SymptomAnalysis};
use crate::services::backend::{BackendMessage, CompletionRequest, ResponseFormat, SymptomBackend};
use crate::services::gemini::GeminiBackend;
use crate::services::prompt::analysis_instruction;
use crate::services::render::{AnalyzeResponse, SessionView};
use crate::services::session::{validate_input, DialogueSession};
use crate::services::store::SessionStore;

pub struct SymptomCheckerService {
    backend: Arc<dyn SymptomBackend>,
    store: SessionStore,
}

impl SymptomCheckerService {
    pub fn new(backend: Arc<dyn SymptomBackend>) -> Self {
        Self { backend, store: SessionStore::new() }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(Arc::new(GeminiBackend::new(config)))
    }

    pub async fn start_session(&self, user: &User, mode: Option<DialogueMode>) -> SessionView {
        let session = DialogueSession::new(mode.unwrap_or_default());
        let view = SessionView::from(&session);
        self.store.insert(&user.id, session).await;

        info!("Started {:?} symptom session {} for user {}", view.mode, view.id, user.id);
        view
    }

    pub async fn get_session(&self, user: &User, session_id: Uuid) -> Result<SessionView, SymptomCheckerError> {
        let handle = self
            .store
            .get(&user.id, session_id)
            .await
            .ok_or(SymptomCheckerError::SessionNotFound)?;
        let session = handle.lock().await;
        Ok(SessionView::from(&*session))
    }

    /// Runs one exchange. The session lock is released while the backend
    /// call is in flight, so the session stays readable and a second
    /// submission is rejected with `ReplyPending`.
    ///
    /// The call and its resolution run on a spawned task, so a dropped
    /// request still returns the session to `Idle` once the reply lands.
    pub async fn submit(
        &self,
        user: &User,
        session_id: Uuid,
        text: &str,
    ) -> Result<SessionView, SymptomCheckerError> {
        let handle = self
            .store
            .get(&user.id, session_id)
            .await
            .ok_or(SymptomCheckerError::SessionNotFound)?;

        let request = handle.lock().await.begin_submit(text)?;

        debug!("Submitting turn for symptom session {}", session_id);
        let backend = self.backend.clone();
        let exchange = handle.clone();
        let task = tokio::spawn(async move {
            let outcome = backend.complete(request).await;
            let mut session = exchange.lock().await;
            session.resolve(outcome);
            SessionView::from(&*session)
        });

        let view = match task.await {
            Ok(view) => view,
            Err(err) => {
                let mut session = handle.lock().await;
                session.resolve(Err(BackendError::Transport(format!("exchange task failed: {}", err))));
                SessionView::from(&*session)
            }
        };

        if !self.store.contains(session_id).await {
            debug!("Symptom session {} ended before its reply arrived; reply discarded", session_id);
        }

        Ok(view)
    }

    pub async fn end_session(&self, user: &User, session_id: Uuid) -> Result<(), SymptomCheckerError> {
        if self.store.remove(&user.id, session_id).await {
            info!("Ended symptom session {} for user {}", session_id, user.id);
            Ok(())
        } else {
            Err(SymptomCheckerError::SessionNotFound)
        }
    }

    /// Stateless single-shot analysis of one description.
    pub async fn analyze(&self, symptoms: &str) -> Result<AnalyzeResponse, SymptomCheckerError> {
        let symptoms = validate_input(symptoms, DialogueMode::Structured)?;

        let request = CompletionRequest {
            system_instruction: analysis_instruction(),
            messages: vec![BackendMessage::user(symptoms)],
            format: ResponseFormat::Analysis,
        };

        let analysis = match self
            .backend
            .complete(request)
            .await
            .and_then(|raw| SymptomAnalysis::parse_reply(&raw))
        {
            Ok(analysis) => analysis,
            Err(err) => {
                warn!(error_kind = err.kind(), "Symptom analysis failed: {}", err);
                return Err(err.into());
            }
        };

        Ok(AnalyzeResponse {
            symptoms: symptoms.to_string(),
            analysis: (&analysis).into(),
        })
    }

    pub async fn active_sessions(&self) -> usize {
        self.store.len().await
    }
}

#[async_trait]
impl LogoutListener for SymptomCheckerService {
    async fn on_logout(&self, user: &User) {
        let ended = self.store.remove_owner(&user.id).await;
        if ended > 0 {
            info!("Ended {} symptom session(s) for signed-out user {}", ended, user.id);
        }
    }
}
