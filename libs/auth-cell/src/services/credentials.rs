use std::sync::OnceLock;

use regex::Regex;

use crate::models::{AuthError, LoginRequest};

fn email_pattern() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| {
            Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$").ok()
        })
        .as_ref()
}

/// Shape checks only; the portal accepts any well-formed credentials.
pub fn validate_credentials(request: &LoginRequest) -> Result<(), AuthError> {
    let email = request.email.trim();
    if !email_pattern().is_some_and(|re| re.is_match(email)) {
        return Err(AuthError::InvalidEmail);
    }
    if request.password.is_empty() {
        return Err(AuthError::MissingPassword);
    }
    Ok(())
}

/// "jane.doe@example.com" -> "Jane Doe"
pub fn display_name_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    let words: Vec<String> = local
        .split(|c: char| c == '.' || c == '_' || c == '-' || c == '+')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();

    if words.is_empty() {
        "User".to_string()
    } else {
        words.join(" ")
    }
}
