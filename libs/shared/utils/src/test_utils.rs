use std::sync::Arc;
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use base64::{Engine as _, engine::general_purpose};
use serde_json::json;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::User;

pub const TEST_JWT_SECRET: &str = "test-secret-key-for-jwt-validation-must-be-long-enough";

pub struct TestConfig {
    pub jwt_secret: String,
    pub gemini_base_url: String,
    pub gemini_api_key: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: TEST_JWT_SECRET.to_string(),
            gemini_base_url: "http://localhost:8089".to_string(),
            gemini_api_key: "test-gemini-key".to_string(),
        }
    }
}

impl TestConfig {
    /// Points the AI backend at a mock server.
    pub fn with_gemini_base_url(mut self, base_url: &str) -> Self {
        self.gemini_base_url = base_url.to_string();
        self
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            session_jwt_secret: self.jwt_secret.clone(),
            gemini_api_key: self.gemini_api_key.clone(),
            gemini_base_url: self.gemini_base_url.clone(),
            ..AppConfig::default()
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestUser {
    pub id: String,
    pub email: String,
    pub role: String,
    pub name: String,
    pub session_id: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self::new("test@example.com", "patient")
    }
}

impl TestUser {
    pub fn new(email: &str, role: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            role: role.to_string(),
            name: "Test User".to_string(),
            session_id: Uuid::new_v4().to_string(),
        }
    }

    pub fn patient(email: &str) -> Self {
        Self::new(email, "patient")
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            email: Some(self.email.clone()),
            role: Some(self.role.clone()),
            display_name: Some(self.name.clone()),
            session_id: self.session_id.clone(),
            created_at: Some(Utc::now()),
        }
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &TestUser, secret: &str, exp_hours: Option<i64>) -> String {
        let now = Utc::now();
        let exp = now + Duration::hours(exp_hours.unwrap_or(24));

        let header = json!({
            "alg": "HS256",
            "typ": "JWT"
        });

        let payload = json!({
            "sub": user.id,
            "sid": user.session_id,
            "email": user.email,
            "role": user.role,
            "name": user.name,
            "iat": now.timestamp(),
            "exp": exp.timestamp()
        });

        let header_encoded = general_purpose::URL_SAFE_NO_PAD.encode(header.to_string());
        let payload_encoded = general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());

        let signing_input = format!("{}.{}", header_encoded, payload_encoded);

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();
        let signature_encoded = general_purpose::URL_SAFE_NO_PAD.encode(signature);

        format!("{}.{}", signing_input, signature_encoded)
    }

    pub fn create_expired_token(user: &TestUser, secret: &str) -> String {
        Self::create_test_token(user, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(user: &TestUser) -> String {
        Self::create_test_token(user, "wrong-secret", Some(24))
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }
}

/// Canned Gemini `generateContent` payloads.
pub struct MockGeminiResponses;

impl MockGeminiResponses {
    pub fn text_response(text: &str) -> serde_json::Value {
        json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": text }]
                },
                "finishReason": "STOP"
            }]
        })
    }

    pub fn analysis_response(
        recommendations: &[&str],
        seek_medical_help: bool,
        urgency_level: &str,
        disclaimer: &str,
    ) -> serde_json::Value {
        let analysis = json!({
            "recommendations": recommendations,
            "seekMedicalHelp": seek_medical_help,
            "urgencyLevel": urgency_level,
            "disclaimer": disclaimer
        });
        Self::text_response(&analysis.to_string())
    }

    pub fn blocked_prompt_response() -> serde_json::Value {
        json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        })
    }

    pub fn safety_finish_response() -> serde_json::Value {
        json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        })
    }

    pub fn error_response(message: &str, code: u16) -> serde_json::Value {
        json!({
            "error": {
                "code": code,
                "message": message,
                "status": "INVALID_ARGUMENT"
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = TestConfig::default().with_gemini_base_url("http://127.0.0.1:9999");
        let app_config = config.to_app_config();

        assert_eq!(app_config.gemini_base_url, "http://127.0.0.1:9999");
        assert!(app_config.is_configured());
        assert!(app_config.is_symptom_checker_configured());
    }

    #[test]
    fn test_user_creation() {
        let user = TestUser::patient("pat@example.com").with_name("Pat Lee");
        let user_model = user.to_user();
        assert_eq!(user_model.email, Some(user.email.clone()));
        assert_eq!(user_model.role.as_deref(), Some("patient"));
        assert_eq!(user_model.session_id, user.session_id);
        assert_eq!(user_model.first_name(), Some("Pat"));
    }

    #[test]
    fn test_jwt_token_creation() {
        let user = TestUser::default();
        let token = JwtTestUtils::create_test_token(&user, "test-secret", Some(1));

        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_analysis_response_wraps_json_text() {
        let payload = MockGeminiResponses::analysis_response(&["Rest"], false, "low", "Disclaimer.");
        let text = payload["candidates"][0]["content"]["parts"][0]["text"].as_str().unwrap();
        let inner: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(inner["urgencyLevel"], "low");
    }
}
