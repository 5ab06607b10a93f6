//! SMS gateway for one-time passwords.

use reqwest::Client;
use thiserror::Error;

/// Configuration for the SMS provider.
#[derive(Debug, Clone)]
pub struct SmsConfig {
    /// Provider endpoint, e.g. `"https://api.webexinteract.com/v1/sms"`.
    pub api_url: String,

    /// Provider auth key, sent as `X-AUTH-KEY`.
    pub auth_key: String,

    /// Sender name shown on the recipient's phone.
    pub sender: String,
}

/// HTTP client for outbound SMS.
#[derive(Debug, Clone)]
pub struct SmsClient {
    config: SmsConfig,
    http: Client,
}

impl SmsClient {
    #[must_use]
    pub fn new(config: SmsConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Sends `message` to `phone`. The number is normalized first;
    /// spaces, dashes, and parentheses are stripped.
    ///
    /// # Errors
    ///
    /// Returns an error for an unusable phone number, on HTTP failure,
    /// or when the provider responds with a non-success status.
    pub async fn send(&self, phone: &str, message: &str) -> Result<(), SmsError> {
        let phone = normalize_phone(phone).ok_or(SmsError::InvalidPhone)?;

        let body = serde_json::json!({
            "message_body": message,
            "from": self.config.sender,
            "to": [{ "phone": [phone] }],
        });

        let response = self
            .http
            .post(&self.config.api_url)
            .header("X-AUTH-KEY", &self.config.auth_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(SmsError::UnexpectedResponse(format!(
                "send failed with status {status}: {text}"
            )));
        }

        Ok(())
    }
}

/// Strips spaces, dashes, and parentheses. Digits and a single leading
/// `+` are the only characters that survive; anything else rejects the
/// number.
#[must_use]
pub fn normalize_phone(phone: &str) -> Option<String> {
    let cleaned: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    let digits = cleaned.strip_prefix('+').unwrap_or(&cleaned);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some(cleaned)
}

/// Errors that can occur when sending SMS.
#[derive(Debug, Error)]
pub enum SmsError {
    #[error("phone number is not usable")]
    InvalidPhone,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from SMS provider: {0}")]
    UnexpectedResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_formatting_characters() {
        assert_eq!(
            normalize_phone("+965 (555) 123-456").as_deref(),
            Some("+965555123456")
        );
        assert_eq!(normalize_phone("96555512345").as_deref(), Some("96555512345"));
    }

    #[test]
    fn normalize_rejects_garbage() {
        assert_eq!(normalize_phone(""), None);
        assert_eq!(normalize_phone("+"), None);
        assert_eq!(normalize_phone("call-me-maybe"), None);
    }
}
