use std::env;
use tracing::warn;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_SAFETY_THRESHOLD: &str = "BLOCK_ONLY_HIGH";
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;
/// Upper bound for `SESSION_TTL_HOURS` (one year).
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub session_jwt_secret: String,
    pub session_ttl_hours: i64,
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub gemini_safety_threshold: String,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            session_jwt_secret: String::new(),
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            gemini_api_key: String::new(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_safety_threshold: DEFAULT_SAFETY_THRESHOLD.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            session_jwt_secret: env::var("SESSION_JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("SESSION_JWT_SECRET not set, using empty value");
                    String::new()
                }),
            session_ttl_hours: parse_session_ttl_hours(env::var("SESSION_TTL_HOURS").ok().as_deref())
                .unwrap_or_else(|| {
                    warn!(
                        "SESSION_TTL_HOURS not set or outside 1..={}, using default",
                        MAX_SESSION_TTL_HOURS
                    );
                    DEFAULT_SESSION_TTL_HOURS
                }),
            gemini_api_key: env::var("GEMINI_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("GEMINI_API_KEY not set, using empty value");
                    String::new()
                }),
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string()),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_safety_threshold: env::var("GEMINI_SAFETY_THRESHOLD")
                .unwrap_or_else(|_| DEFAULT_SAFETY_THRESHOLD.to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        if !config.is_symptom_checker_configured() {
            warn!("Symptom checker not configured - AI requests will fail");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.session_jwt_secret.is_empty()
            && (1..=MAX_SESSION_TTL_HOURS).contains(&self.session_ttl_hours)
    }

    pub fn is_symptom_checker_configured(&self) -> bool {
        !self.gemini_api_key.is_empty()
            && !self.gemini_base_url.is_empty()
            && !self.gemini_model.is_empty()
    }
}

/// Accepts a whole number of hours between 1 and `MAX_SESSION_TTL_HOURS`.
pub fn parse_session_ttl_hours(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|hours| (1..=MAX_SESSION_TTL_HOURS).contains(hours))
}
