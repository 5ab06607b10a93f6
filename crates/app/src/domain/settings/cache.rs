//! In-process settings snapshot.

use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::settings::data::SiteSettings;

/// Shared snapshot of the current site settings. Readers get a cheap
/// `Arc` clone; writers swap the whole snapshot at once, so a reader
/// never observes a half-updated document.
#[derive(Debug, Clone)]
pub struct SettingsCache {
    inner: Arc<RwLock<Arc<SiteSettings>>>,
}

impl SettingsCache {
    #[must_use]
    pub fn new(settings: SiteSettings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(settings))),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Arc<SiteSettings> {
        let guard = self
            .inner
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        Arc::clone(&guard)
    }

    pub fn store(&self, settings: SiteSettings) {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        *guard = Arc::new(settings);
    }
}

impl Default for SettingsCache {
    fn default() -> Self {
        Self::new(SiteSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::settings::data::ThemePreset;

    use super::*;

    #[test]
    fn store_replaces_the_whole_snapshot() {
        let cache = SettingsCache::default();

        let mut next = SiteSettings::default();
        next.site_theme = ThemePreset::Ocean.into();
        next.maintenance_mode.enabled = true;

        cache.store(next.clone());

        assert_eq!(*cache.snapshot(), next);
    }

    #[test]
    fn old_snapshots_stay_valid_after_a_swap() {
        let cache = SettingsCache::default();
        let before = cache.snapshot();

        let mut next = SiteSettings::default();
        next.site_info.name = "متجر آخر".to_string();
        cache.store(next);

        assert_eq!(*before, SiteSettings::default());
    }
}
