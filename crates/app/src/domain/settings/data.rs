//! Typed site settings documents.
//!
//! Each document lives in one `site_settings` row as jsonb, keyed by a
//! fixed name. Loading merges stored rows into the hard-coded defaults,
//! so a missing row always yields a usable snapshot.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The storefront maintenance gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceMode {
    pub enabled: bool,
    pub message: String,
}

impl Default for MaintenanceMode {
    fn default() -> Self {
        Self {
            enabled: false,
            message: "الموقع تحت الصيانة حالياً، سنعود قريباً!".to_string(),
        }
    }
}

/// Two HSL color strings driving the storefront stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteTheme {
    pub primary_color: String,
    pub accent_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<ThemePreset>,
}

impl Default for SiteTheme {
    fn default() -> Self {
        ThemePreset::Ice.into()
    }
}

impl From<ThemePreset> for SiteTheme {
    fn from(preset: ThemePreset) -> Self {
        Self {
            primary_color: preset.primary().to_string(),
            accent_color: preset.accent().to_string(),
            preset: Some(preset),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteInfo {
    pub name: String,
    pub description: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: "جلاسير".to_string(),
            description: "متجر لبيع اليوزرات والاشتراكات".to_string(),
        }
    }
}

/// The full settings snapshot served to the storefront and admin UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSettings {
    pub maintenance_mode: MaintenanceMode,
    pub site_theme: SiteTheme,
    pub site_info: SiteInfo,
}

/// The fixed set of `site_settings` row keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    MaintenanceMode,
    SiteTheme,
    SiteInfo,
}

impl SettingKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MaintenanceMode => "maintenance_mode",
            Self::SiteTheme => "site_theme",
            Self::SiteInfo => "site_info",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named color presets offered by the admin theme picker. The assistant
/// may only pick from this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreset {
    Ice,
    Ocean,
    Sunset,
    Forest,
    Purple,
    Gold,
    Rose,
    Neon,
}

impl ThemePreset {
    pub const ALL: [Self; 8] = [
        Self::Ice,
        Self::Ocean,
        Self::Sunset,
        Self::Forest,
        Self::Purple,
        Self::Gold,
        Self::Rose,
        Self::Neon,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ice => "ice",
            Self::Ocean => "ocean",
            Self::Sunset => "sunset",
            Self::Forest => "forest",
            Self::Purple => "purple",
            Self::Gold => "gold",
            Self::Rose => "rose",
            Self::Neon => "neon",
        }
    }

    #[must_use]
    pub const fn primary(self) -> &'static str {
        match self {
            Self::Ice => "195 100% 50%",
            Self::Ocean => "210 100% 50%",
            Self::Sunset => "25 95% 55%",
            Self::Forest => "150 80% 40%",
            Self::Purple => "270 80% 55%",
            Self::Gold => "45 90% 50%",
            Self::Rose => "340 80% 55%",
            Self::Neon => "160 100% 45%",
        }
    }

    #[must_use]
    pub const fn accent(self) -> &'static str {
        match self {
            Self::Ice => "180 100% 45%",
            Self::Ocean => "200 90% 55%",
            Self::Sunset => "350 85% 55%",
            Self::Forest => "170 70% 45%",
            Self::Purple => "290 70% 50%",
            Self::Gold => "35 85% 45%",
            Self::Rose => "320 70% 50%",
            Self::Neon => "130 100% 50%",
        }
    }

    /// Picker label shown in the admin UI.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ice => "جليدي",
            Self::Ocean => "محيطي",
            Self::Sunset => "غروب",
            Self::Forest => "غابة",
            Self::Purple => "بنفسجي",
            Self::Gold => "ذهبي",
            Self::Rose => "وردي",
            Self::Neon => "نيون",
        }
    }
}

impl fmt::Display for ThemePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreset {
    type Err = UnknownThemePreset;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.as_str() == value)
            .ok_or_else(|| UnknownThemePreset(value.to_string()))
    }
}

#[derive(Debug, Error)]
#[error("unknown theme preset: {0}")]
pub struct UnknownThemePreset(String);
