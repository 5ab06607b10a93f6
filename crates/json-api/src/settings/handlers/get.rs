//! Get Settings Handler

use std::{string::ToString, sync::Arc};

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use glacier_app::domain::settings::SiteSettings;

use crate::{extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MaintenanceModeResponse {
    /// Whether the storefront is behind the maintenance gate
    pub enabled: bool,

    /// Message shown to visitors while maintenance is on
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SiteThemeResponse {
    /// Primary HSL color triple
    pub primary_color: String,

    /// Accent HSL color triple
    pub accent_color: String,

    /// Source preset name, absent for custom colors
    pub preset: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SiteInfoResponse {
    /// Storefront display name
    pub name: String,

    /// Storefront tagline
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SettingsResponse {
    pub maintenance_mode: MaintenanceModeResponse,
    pub site_theme: SiteThemeResponse,
    pub site_info: SiteInfoResponse,
}

impl From<&SiteSettings> for SettingsResponse {
    fn from(settings: &SiteSettings) -> Self {
        SettingsResponse {
            maintenance_mode: MaintenanceModeResponse {
                enabled: settings.maintenance_mode.enabled,
                message: settings.maintenance_mode.message.clone(),
            },
            site_theme: SiteThemeResponse {
                primary_color: settings.site_theme.primary_color.clone(),
                accent_color: settings.site_theme.accent_color.clone(),
                preset: settings.site_theme.preset.map(|preset| preset.to_string()),
            },
            site_info: SiteInfoResponse {
                name: settings.site_info.name.clone(),
                description: settings.site_info.description.clone(),
            },
        }
    }
}

/// Get Settings Handler
///
/// Returns the current site settings snapshot. Served from the
/// in-process cache, so it never touches storage.
#[endpoint(tags("settings"), summary = "Get Site Settings")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<SettingsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let settings = state.app.settings.settings();

    Ok(Json(settings.as_ref().into()))
}
