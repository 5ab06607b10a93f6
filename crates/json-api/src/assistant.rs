//! Admin Assistant Handler

use std::sync::Arc;

use salvo::{
    oapi::{extract::JsonBody, ToSchema},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use glacier_app::{
    domain::settings::{MaintenanceMode, SiteInfo},
    gateways::{assistant::ADMIN_SYSTEM_PROMPT, AssistantAction, QueryType},
};

use crate::{
    chat::{parse_history, ChatTurnRequest},
    extensions::*,
    state::State,
};

const MAX_TOKENS: u32 = 1_000;
const TEMPERATURE: f32 = 0.5;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AssistantRequest {
    /// The admin's message
    pub message: String,

    /// Prior turns of this conversation, oldest first
    #[serde(default)]
    pub history: Vec<ChatTurnRequest>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AssistantResponse {
    /// The assistant's reply text
    pub reply: String,

    /// Name of the command that was executed, if the reply carried one
    pub action: Option<String>,

    /// Localized description of what the command did
    pub action_description: Option<String>,

    /// Count returned by a query command
    pub query_result: Option<i64>,
}

const fn action_name(action: &AssistantAction) -> &'static str {
    match action {
        AssistantAction::ToggleMaintenance { .. } => "toggle_maintenance",
        AssistantAction::ChangeTheme { .. } => "change_theme",
        AssistantAction::UpdateInfo { .. } => "update_info",
        AssistantAction::Query { .. } => "query",
    }
}

/// Admin Assistant Handler
///
/// Forwards the admin's message to the assistant gateway, then executes
/// any command embedded in the reply. Commands are drawn from a fixed
/// set and run through the same services as the manual admin endpoints,
/// so the model can never do anything an admin could not.
#[endpoint(
    tags("chat"),
    summary = "Admin Assistant",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    body: JsonBody<AssistantRequest>,
    depot: &mut Depot,
) -> Result<Json<AssistantResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let request = body.into_inner();
    let history = parse_history(request.history)?;

    let reply = state
        .assistant
        .chat(
            ADMIN_SYSTEM_PROMPT,
            &history,
            &request.message,
            MAX_TOKENS,
            TEMPERATURE,
        )
        .await
        .map_err(crate::chat::into_status_error)?;

    let Some(action) = AssistantAction::parse_from_reply(&reply) else {
        return Ok(Json(AssistantResponse {
            reply,
            action: None,
            action_description: None,
            query_result: None,
        }));
    };

    let mut query_result = None;

    match &action {
        AssistantAction::ToggleMaintenance { enabled, message } => {
            let current = state.app.settings.settings();

            let maintenance = MaintenanceMode {
                enabled: *enabled,
                message: message
                    .clone()
                    .unwrap_or_else(|| current.maintenance_mode.message.clone()),
            };

            state
                .app
                .settings
                .update_maintenance(&actor, maintenance)
                .await
                .map_err(crate::settings::errors::into_status_error)?;
        }
        AssistantAction::ChangeTheme { preset } => {
            state
                .app
                .settings
                .update_theme(&actor, (*preset).into())
                .await
                .map_err(crate::settings::errors::into_status_error)?;
        }
        AssistantAction::UpdateInfo { name, description } => {
            let current = state.app.settings.settings();

            let info = SiteInfo {
                name: name.clone().unwrap_or_else(|| current.site_info.name.clone()),
                description: description
                    .clone()
                    .unwrap_or_else(|| current.site_info.description.clone()),
            };

            state
                .app
                .settings
                .update_info(&actor, info)
                .await
                .map_err(crate::settings::errors::into_status_error)?;
        }
        AssistantAction::Query { query_type } => {
            let count = match query_type {
                QueryType::UsersCount => state
                    .app
                    .users
                    .count_users(&actor)
                    .await
                    .map_err(crate::users::errors::into_status_error)?,
                QueryType::ProductsCount => state
                    .app
                    .products
                    .count_products(&actor)
                    .await
                    .map_err(crate::products::errors::into_status_error)?,
                QueryType::OrdersCount => state
                    .app
                    .orders
                    .count_orders(&actor)
                    .await
                    .map_err(crate::orders::errors::into_status_error)?,
            };

            query_result = Some(count);
        }
    }

    Ok(Json(AssistantResponse {
        action: Some(action_name(&action).to_owned()),
        action_description: Some(action.describe()),
        query_result,
        reply,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{staff_service, Mocks};

    use super::*;

    fn make_service() -> Service {
        staff_service(
            Mocks::default(),
            Router::with_path("admin/assistant").post(handler),
        )
    }

    #[tokio::test]
    async fn test_empty_message_returns_400() -> TestResult {
        let res = TestClient::post("http://example.com/admin/assistant")
            .json(&AssistantRequest {
                message: String::new(),
                history: Vec::new(),
            })
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_unreachable_gateway_returns_502() -> TestResult {
        let res = TestClient::post("http://example.com/admin/assistant")
            .json(&AssistantRequest {
                message: "كم عدد المستخدمين؟".to_owned(),
                history: Vec::new(),
            })
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_GATEWAY));

        Ok(())
    }
}
