//! Site Settings

pub mod cache;
pub mod data;
pub mod errors;
mod repository;
pub mod service;
pub mod watcher;

pub use cache::SettingsCache;
pub use data::{MaintenanceMode, SettingKey, SiteInfo, SiteSettings, SiteTheme, ThemePreset};
pub use errors::SettingsServiceError;
pub use service::*;
