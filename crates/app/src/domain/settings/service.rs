//! Settings service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use serde::Serialize;
use tracing::info;

use crate::{
    auth::Actor,
    database::Db,
    domain::settings::{
        cache::SettingsCache,
        data::{MaintenanceMode, SettingKey, SiteInfo, SiteSettings, SiteTheme},
        errors::SettingsServiceError,
        repository::{LoadSettingsError, PgSettingsRepository},
    },
};

impl From<LoadSettingsError> for SettingsServiceError {
    fn from(error: LoadSettingsError) -> Self {
        match error {
            LoadSettingsError::Sql(e) => e.into(),
            LoadSettingsError::Malformed(e) => Self::MalformedDocument(e),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PgSettingsService {
    db: Db,
    repository: PgSettingsRepository,
    cache: SettingsCache,
}

impl PgSettingsService {
    /// Loads the initial snapshot from storage so the cache never
    /// serves defaults when stored overrides exist.
    pub async fn connect(db: Db) -> Result<Self, SettingsServiceError> {
        let repository = PgSettingsRepository::new();
        let settings = repository.load_settings(db.pool()).await?;

        Ok(Self {
            db,
            repository,
            cache: SettingsCache::new(settings),
        })
    }

    async fn write_document<T: Serialize + Sync>(
        &self,
        actor: &Actor,
        key: SettingKey,
        document: &T,
    ) -> Result<Arc<SiteSettings>, SettingsServiceError> {
        let value = serde_json::to_value(document)?;

        let mut tx = self.db.begin_actor_transaction(actor).await?;

        self.repository
            .upsert_setting(&mut tx, key, &value, actor.user.into_uuid())
            .await?;

        tx.commit().await?;

        info!(key = %key, user = %actor.user, "site setting updated");

        self.refresh().await
    }
}

#[async_trait]
impl SettingsService for PgSettingsService {
    fn settings(&self) -> Arc<SiteSettings> {
        self.cache.snapshot()
    }

    async fn refresh(&self) -> Result<Arc<SiteSettings>, SettingsServiceError> {
        let settings = self.repository.load_settings(self.db.pool()).await?;

        self.cache.store(settings);

        Ok(self.cache.snapshot())
    }

    async fn update_maintenance(
        &self,
        actor: &Actor,
        maintenance: MaintenanceMode,
    ) -> Result<Arc<SiteSettings>, SettingsServiceError> {
        self.write_document(actor, SettingKey::MaintenanceMode, &maintenance)
            .await
    }

    async fn update_theme(
        &self,
        actor: &Actor,
        theme: SiteTheme,
    ) -> Result<Arc<SiteSettings>, SettingsServiceError> {
        self.write_document(actor, SettingKey::SiteTheme, &theme)
            .await
    }

    async fn update_info(
        &self,
        actor: &Actor,
        info: SiteInfo,
    ) -> Result<Arc<SiteSettings>, SettingsServiceError> {
        self.write_document(actor, SettingKey::SiteInfo, &info).await
    }
}

#[automock]
#[async_trait]
pub trait SettingsService: Send + Sync {
    /// The current cached snapshot. Never blocks on storage.
    fn settings(&self) -> Arc<SiteSettings>;

    /// Reloads the snapshot from storage and swaps the cache.
    async fn refresh(&self) -> Result<Arc<SiteSettings>, SettingsServiceError>;

    async fn update_maintenance(
        &self,
        actor: &Actor,
        maintenance: MaintenanceMode,
    ) -> Result<Arc<SiteSettings>, SettingsServiceError>;

    async fn update_theme(
        &self,
        actor: &Actor,
        theme: SiteTheme,
    ) -> Result<Arc<SiteSettings>, SettingsServiceError>;

    async fn update_info(
        &self,
        actor: &Actor,
        info: SiteInfo,
    ) -> Result<Arc<SiteSettings>, SettingsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{domain::settings::data::ThemePreset, test::TestContext};

    use super::*;

    #[tokio::test]
    async fn fresh_store_serves_defaults() {
        let ctx = TestContext::new().await;

        assert_eq!(*ctx.settings.settings(), SiteSettings::default());
    }

    #[tokio::test]
    async fn maintenance_update_lands_in_the_snapshot() -> TestResult {
        let ctx = TestContext::new().await;

        let maintenance = MaintenanceMode {
            enabled: true,
            message: "نعود بعد ساعة".to_string(),
        };

        let snapshot = ctx
            .settings
            .update_maintenance(&ctx.owner, maintenance.clone())
            .await?;

        assert_eq!(snapshot.maintenance_mode, maintenance);

        Ok(())
    }

    #[tokio::test]
    async fn theme_update_survives_a_reload() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.settings
            .update_theme(&ctx.owner, ThemePreset::Sunset.into())
            .await?;

        let reloaded = ctx.settings.refresh().await?;

        assert_eq!(reloaded.site_theme.preset, Some(ThemePreset::Sunset));
        assert_eq!(reloaded.site_theme.primary_color, "25 95% 55%");

        Ok(())
    }

    #[tokio::test]
    async fn last_writer_wins_per_document() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.settings
            .update_info(
                &ctx.owner,
                SiteInfo {
                    name: "الأول".to_string(),
                    description: "أول وصف".to_string(),
                },
            )
            .await?;

        let snapshot = ctx
            .settings
            .update_info(
                &ctx.owner,
                SiteInfo {
                    name: "الثاني".to_string(),
                    description: "ثاني وصف".to_string(),
                },
            )
            .await?;

        assert_eq!(snapshot.site_info.name, "الثاني");

        // Writing one document leaves the others untouched.
        assert_eq!(snapshot.maintenance_mode, MaintenanceMode::default());

        Ok(())
    }
}
