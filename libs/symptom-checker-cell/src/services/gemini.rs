use async_trait::async_trait;
use reqwest::{header, Client};
use serde_json::{json, Value};
use tracing::{debug, warn};

use shared_config::AppConfig;

use crate::error::BackendError;
use crate::models::UrgencyLevel;
use crate::services::backend::{CompletionRequest, ResponseFormat, SymptomBackend};

const SAFETY_CATEGORY: &str = "HARM_CATEGORY_DANGEROUS_CONTENT";

/// Client for the Generative Language `generateContent` endpoint.
pub struct GeminiBackend {
    api_key: String,
    base_url: String,
    model: String,
    safety_threshold: String,
    http_client: Client,
}

impl GeminiBackend {
    pub fn new(config: &AppConfig) -> Self {
        if config.gemini_api_key.is_empty() {
            warn!("GEMINI_API_KEY is empty; symptom checker requests will fail");
        }

        Self {
            api_key: config.gemini_api_key.clone(),
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            model: config.gemini_model.clone(),
            safety_threshold: config.gemini_safety_threshold.clone(),
            http_client: Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    fn build_body(&self, request: &CompletionRequest) -> Value {
        let contents: Vec<Value> = request
            .messages
            .iter()
            .map(|msg| {
                json!({
                    "role": msg.role.backend_role(),
                    "parts": [{ "text": msg.text }]
                })
            })
            .collect();

        let mut body = json!({
            "systemInstruction": {
                "parts": [{ "text": request.system_instruction }]
            },
            "contents": contents,
            "safetySettings": [{
                "category": SAFETY_CATEGORY,
                "threshold": self.safety_threshold
            }]
        });

        if request.format == ResponseFormat::Analysis {
            body["generationConfig"] = json!({
                "responseMimeType": "application/json",
                "responseSchema": analysis_schema()
            });
        }

        body
    }
}

#[async_trait]
impl SymptomBackend for GeminiBackend {
    async fn complete(&self, request: CompletionRequest) -> Result<String, BackendError> {
        if self.api_key.is_empty() {
            return Err(BackendError::NotConfigured);
        }

        debug!(
            "Calling Gemini model {} with {} message(s)",
            self.model,
            request.messages.len()
        );

        let response = self
            .http_client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&self.build_body(&request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                message: error_message(&error_text),
            });
        }

        let payload: Value = response.json().await?;
        extract_reply(&payload)
    }
}

/// Pulls the reply text out of a `generateContent` payload.
pub fn extract_reply(payload: &Value) -> Result<String, BackendError> {
    if let Some(reason) = payload["promptFeedback"]["blockReason"].as_str() {
        return Err(BackendError::SafetyBlock(reason.to_string()));
    }

    let candidate = &payload["candidates"][0];
    if candidate["finishReason"].as_str() == Some("SAFETY") {
        return Err(BackendError::SafetyBlock("SAFETY".to_string()));
    }

    let text: String = candidate["content"]["parts"]
        .as_array()
        .map(|parts| parts.iter().filter_map(|p| p["text"].as_str()).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(BackendError::EmptyReply);
    }

    Ok(text)
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

fn analysis_schema() -> Value {
    let levels: Vec<&str> = UrgencyLevel::ALL.iter().map(|l| l.as_str()).collect();
    json!({
        "type": "OBJECT",
        "properties": {
            "recommendations": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "seekMedicalHelp": { "type": "BOOLEAN" },
            "urgencyLevel": { "type": "STRING", "enum": levels },
            "disclaimer": { "type": "STRING" }
        },
        "required": ["recommendations", "seekMedicalHelp", "urgencyLevel", "disclaimer"]
    })
}
