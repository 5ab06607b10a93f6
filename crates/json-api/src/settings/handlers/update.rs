//! Update Settings Handler

use std::sync::Arc;

use salvo::{
    oapi::{extract::JsonBody, ToSchema},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use glacier_app::domain::settings::{
    MaintenanceMode, SiteInfo, SiteSettings, SiteTheme, ThemePreset,
};

use crate::{
    extensions::*,
    settings::{errors::into_status_error, get::SettingsResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MaintenanceModePatch {
    /// Whether to enable the maintenance gate
    pub enabled: bool,

    /// Replacement visitor message; the current one is kept when absent
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SiteThemePatch {
    /// Preset name; wins over the color fields when present
    pub preset: Option<String>,

    /// Custom primary HSL color triple
    pub primary_color: Option<String>,

    /// Custom accent HSL color triple
    pub accent_color: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SiteInfoPatch {
    /// Replacement storefront name
    pub name: Option<String>,

    /// Replacement storefront tagline
    pub description: Option<String>,
}

/// Only the documents present in the body are written. Absent fields
/// within a document keep their current values.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateSettingsRequest {
    pub maintenance_mode: Option<MaintenanceModePatch>,
    pub site_theme: Option<SiteThemePatch>,
    pub site_info: Option<SiteInfoPatch>,
}

fn merge_theme(current: &SiteTheme, patch: SiteThemePatch) -> Result<SiteTheme, StatusError> {
    if let Some(preset) = patch.preset {
        let preset: ThemePreset = preset.parse().or_400("Unknown theme preset")?;

        return Ok(preset.into());
    }

    // Custom colors detach the theme from any preset.
    Ok(SiteTheme {
        primary_color: patch
            .primary_color
            .unwrap_or_else(|| current.primary_color.clone()),
        accent_color: patch
            .accent_color
            .unwrap_or_else(|| current.accent_color.clone()),
        preset: None,
    })
}

/// Update Settings Handler
///
/// Applies the provided settings documents and returns the snapshot
/// after the last write.
#[endpoint(
    tags("settings"),
    summary = "Update Site Settings",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    body: JsonBody<UpdateSettingsRequest>,
    depot: &mut Depot,
) -> Result<Json<SettingsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let request = body.into_inner();
    let mut snapshot: Arc<SiteSettings> = state.app.settings.settings();

    if let Some(patch) = request.maintenance_mode {
        let maintenance = MaintenanceMode {
            enabled: patch.enabled,
            message: patch
                .message
                .unwrap_or_else(|| snapshot.maintenance_mode.message.clone()),
        };

        snapshot = state
            .app
            .settings
            .update_maintenance(&actor, maintenance)
            .await
            .map_err(into_status_error)?;
    }

    if let Some(patch) = request.site_theme {
        let theme = merge_theme(&snapshot.site_theme, patch)?;

        snapshot = state
            .app
            .settings
            .update_theme(&actor, theme)
            .await
            .map_err(into_status_error)?;
    }

    if let Some(patch) = request.site_info {
        let info = SiteInfo {
            name: patch.name.unwrap_or_else(|| snapshot.site_info.name.clone()),
            description: patch
                .description
                .unwrap_or_else(|| snapshot.site_info.description.clone()),
        };

        snapshot = state
            .app
            .settings
            .update_info(&actor, info)
            .await
            .map_err(into_status_error)?;
    }

    Ok(Json(snapshot.as_ref().into()))
}
