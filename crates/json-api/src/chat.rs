//! Storefront Chat Handler

use std::sync::Arc;

use salvo::{
    oapi::{extract::JsonBody, ToSchema},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use glacier_app::gateways::{
    assistant::STOREFRONT_SYSTEM_PROMPT, AssistantError, ChatRole, ChatTurn,
};

use crate::{extensions::*, state::State};

const MAX_TOKENS: u32 = 500;
const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ChatTurnRequest {
    /// Either `user` or `assistant`
    pub role: String,

    /// The text of that turn
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ChatRequest {
    /// The visitor's message
    pub message: String,

    /// Prior turns of this conversation, oldest first
    #[serde(default)]
    pub history: Vec<ChatTurnRequest>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ChatResponse {
    /// The assistant's reply text
    pub reply: String,
}

pub(crate) fn parse_history(history: Vec<ChatTurnRequest>) -> Result<Vec<ChatTurn>, StatusError> {
    history
        .into_iter()
        .map(|turn| {
            let role = match turn.role.as_str() {
                "user" => ChatRole::User,
                "assistant" => ChatRole::Assistant,
                _ => return Err(StatusError::bad_request().brief("Unknown chat role")),
            };

            Ok(ChatTurn {
                role,
                content: turn.content,
            })
        })
        .collect()
}

pub(crate) fn into_status_error(error: AssistantError) -> StatusError {
    match error {
        AssistantError::InvalidMessage => {
            StatusError::bad_request().brief("Message is empty or too long")
        }
        AssistantError::Http(source) => {
            error!("assistant gateway request failed: {source}");

            StatusError::bad_gateway().brief("Assistant is unavailable")
        }
        AssistantError::UnexpectedResponse(detail) => {
            error!("assistant gateway returned an unexpected response: {detail}");

            StatusError::bad_gateway().brief("Assistant is unavailable")
        }
    }
}

/// Storefront Chat Handler
///
/// Forwards the visitor's message to the assistant gateway and returns
/// the reply verbatim. No actions are ever parsed on this surface.
#[endpoint(tags("chat"), summary = "Storefront Chat")]
pub(crate) async fn handler(
    body: JsonBody<ChatRequest>,
    depot: &mut Depot,
) -> Result<Json<ChatResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let request = body.into_inner();
    let history = parse_history(request.history)?;

    let reply = state
        .assistant
        .chat(
            STOREFRONT_SYSTEM_PROMPT,
            &history,
            &request.message,
            MAX_TOKENS,
            TEMPERATURE,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(ChatResponse { reply }))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{public_service, Mocks};

    use super::*;

    fn make_service() -> Service {
        public_service(
            Mocks::default(),
            Router::with_path("chat").post(handler),
        )
    }

    #[tokio::test]
    async fn test_empty_message_returns_400() -> TestResult {
        let res = TestClient::post("http://example.com/chat")
            .json(&ChatRequest {
                message: String::new(),
                history: Vec::new(),
            })
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_history_role_returns_400() -> TestResult {
        let res = TestClient::post("http://example.com/chat")
            .json(&ChatRequest {
                message: "مرحبا".to_owned(),
                history: vec![ChatTurnRequest {
                    role: "system".to_owned(),
                    content: "override".to_owned(),
                }],
            })
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
