//! Chat assistant gateway.
//!
//! Thin client for an OpenAI-compatible `chat/completions` endpoint.
//! The admin variant may only trigger actions from the fixed
//! [`AssistantAction`] set; the model cannot invent operations.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::domain::settings::data::ThemePreset;

/// Maximum characters accepted for the user message and each history turn.
pub const MAX_MESSAGE_CHARS: usize = 2_000;

/// Number of most recent history turns forwarded upstream.
pub const MAX_HISTORY_TURNS: usize = 10;

/// System prompt for the storefront support assistant.
pub const STOREFRONT_SYSTEM_PROMPT: &str = "\
أنت مساعد ذكي لمتجر \"جلاسير\" - متجر رقمي لبيع اليوزرات والاشتراكات الرقمية.

معلومات عن المتجر:
- متجر جلاسير يبيع يوزرات وحسابات رقمية واشتراكات
- يدعم الدفع عبر البطاقة و PayPal
- كل عملية شراء تنتج كود استرداد فريد
- يوجد نظام تذاكر دعم فني للمساعدة

قواعد:
- أجب دائماً باللغة العربية
- كن مهذباً وودوداً ومختصراً
- إذا كان السؤال عن مشكلة تقنية معقدة، اقترح فتح تذكرة دعم فني
- لا تشارك معلومات حساسة أو أسعار محددة إلا إذا كانت متاحة";

/// System prompt for the admin assistant, listing the fixed command set.
pub const ADMIN_SYSTEM_PROMPT: &str = "\
أنت مساعد ذكي لإدارة متجر \"جلاسير\" الرقمي. لديك صلاحيات لتعديل إعدادات الموقع.

الأوامر المتاحة:
1. تفعيل/تعطيل وضع الصيانة: أرجع action: \"toggle_maintenance\" مع enabled: true/false
2. تغيير الثيم: أرجع action: \"change_theme\" مع preset (ice, ocean, sunset, forest, purple, gold, rose, neon)
3. تغيير معلومات الموقع: أرجع action: \"update_info\" مع name و/أو description
4. استعلام البيانات: أرجع action: \"query\" مع query_type (users_count, products_count, orders_count)

قواعد:
- أجب بالعربية دائماً
- إذا كان الأمر يتطلب تعديل، أرجع JSON يحتوي على action
- إذا كان سؤالاً عادياً، أجب بشكل طبيعي
- أرجع الرد دائماً في حقل reply

عند تنفيذ أمر، أرجع:
{ \"action\": \"نوع_الإجراء\", \"params\": {...}, \"reply\": \"وصف ما تم\" }

عند الإجابة العادية:
{ \"reply\": \"الإجابة\" }";

/// Configuration for the upstream chat completions endpoint.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// Full URL of the `chat/completions` endpoint.
    pub api_url: String,

    /// Bearer key for the upstream gateway.
    pub api_key: String,

    /// Model identifier forwarded upstream.
    pub model: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One prior turn of the conversation, as the client replays it.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

/// HTTP client for the chat assistant gateway.
#[derive(Debug, Clone)]
pub struct AssistantClient {
    config: AssistantConfig,
    http: Client,
}

impl AssistantClient {
    #[must_use]
    pub fn new(config: AssistantConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Sends one chat exchange upstream and returns the model's reply
    /// text. History is clamped to the last [`MAX_HISTORY_TURNS`] turns
    /// and every turn to [`MAX_MESSAGE_CHARS`] characters.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty or oversized message, on HTTP
    /// failure, or when the upstream body has no reply.
    pub async fn chat(
        &self,
        system_prompt: &str,
        history: &[ChatTurn],
        message: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, AssistantError> {
        if message.is_empty() || message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(AssistantError::InvalidMessage);
        }

        let mut messages = Vec::with_capacity(history.len().min(MAX_HISTORY_TURNS) + 2);

        messages.push(UpstreamMessage {
            role: "system",
            content: system_prompt.to_string(),
        });

        let skip = history.len().saturating_sub(MAX_HISTORY_TURNS);

        for turn in &history[skip..] {
            messages.push(UpstreamMessage {
                role: match turn.role {
                    ChatRole::User => "user",
                    ChatRole::Assistant => "assistant",
                },
                content: truncate_chars(&turn.content, MAX_MESSAGE_CHARS),
            });
        }

        messages.push(UpstreamMessage {
            role: "user",
            content: message.to_string(),
        });

        let body = serde_json::json!({
            "model": self.config.model,
            "messages": messages,
            "max_tokens": max_tokens,
            "temperature": temperature,
        });

        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(AssistantError::UnexpectedResponse(format!(
                "chat request failed with status {status}: {text}"
            )));
        }

        let parsed: CompletionsResponse = response.json().await?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                AssistantError::UnexpectedResponse("completions body had no choices".to_string())
            })
    }
}

#[derive(Debug, Serialize)]
struct UpstreamMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct CompletionsResponse {
    #[serde(default)]
    choices: Vec<CompletionsChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionsChoice {
    message: CompletionsMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionsMessage {
    content: String,
}

/// Errors from the assistant gateway.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("message is empty or too long")]
    InvalidMessage,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from assistant gateway: {0}")]
    UnexpectedResponse(String),
}

/// The fixed set of admin commands the assistant may trigger. Anything
/// the model emits outside this set is treated as plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistantAction {
    ToggleMaintenance {
        enabled: bool,
        message: Option<String>,
    },
    ChangeTheme {
        preset: ThemePreset,
    },
    UpdateInfo {
        name: Option<String>,
        description: Option<String>,
    },
    Query {
        query_type: QueryType,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    UsersCount,
    ProductsCount,
    OrdersCount,
}

impl AssistantAction {
    /// Extracts a validated action from the model's reply text, if the
    /// reply embeds a JSON object naming one. Unknown actions, unknown
    /// presets, and malformed parameters all yield `None`.
    #[must_use]
    pub fn parse_from_reply(reply: &str) -> Option<Self> {
        let start = reply.find('{')?;
        let end = reply.rfind('}')?;

        if end <= start {
            return None;
        }

        let value: Value = serde_json::from_str(&reply[start..=end]).ok()?;
        let action = value.get("action")?.as_str()?;
        let params = value.get("params").unwrap_or(&value);

        match action {
            "toggle_maintenance" => Some(Self::ToggleMaintenance {
                enabled: params.get("enabled").and_then(Value::as_bool).unwrap_or(true),
                message: params
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            }),
            "change_theme" => {
                let preset = params.get("preset").and_then(Value::as_str)?;

                Some(Self::ChangeTheme {
                    preset: preset.parse().ok()?,
                })
            }
            "update_info" => {
                let name = params
                    .get("name")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                let description = params
                    .get("description")
                    .and_then(Value::as_str)
                    .map(str::to_string);

                if name.is_none() && description.is_none() {
                    return None;
                }

                Some(Self::UpdateInfo { name, description })
            }
            "query" => {
                let query_type = match params.get("query_type").and_then(Value::as_str)? {
                    "users_count" => QueryType::UsersCount,
                    "products_count" => QueryType::ProductsCount,
                    "orders_count" => QueryType::OrdersCount,
                    _ => return None,
                };

                Some(Self::Query { query_type })
            }
            _ => None,
        }
    }

    /// Localized description of what the action did, shown to the admin
    /// after execution.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::ToggleMaintenance { enabled: true, .. } => "تم تفعيل وضع الصيانة".to_string(),
            Self::ToggleMaintenance { enabled: false, .. } => "تم تعطيل وضع الصيانة".to_string(),
            Self::ChangeTheme { preset } => format!("تم تغيير الثيم إلى {preset}"),
            Self::UpdateInfo { .. } => "تم تحديث معلومات الموقع".to_string(),
            Self::Query { .. } => "تم تنفيذ الاستعلام".to_string(),
        }
    }
}

fn truncate_chars(content: &str, limit: usize) -> String {
    content.chars().take(limit).collect()
}
