//! Settings Repository

use sqlx::{PgPool, Postgres, Row, Transaction, postgres::PgRow, query};
use uuid::Uuid;

use crate::domain::settings::data::{SettingKey, SiteSettings};

const LIST_SETTINGS_SQL: &str = include_str!("sql/list_settings.sql");
const UPSERT_SETTING_SQL: &str = include_str!("sql/upsert_setting.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSettingsRepository;

impl PgSettingsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Reads every stored row and merges it into the defaults. Rows
    /// with keys outside the fixed set are ignored.
    pub(crate) async fn load_settings(
        &self,
        pool: &PgPool,
    ) -> Result<SiteSettings, LoadSettingsError> {
        let rows = query(LIST_SETTINGS_SQL).fetch_all(pool).await?;

        let mut settings = SiteSettings::default();

        for row in &rows {
            merge_row(&mut settings, row)?;
        }

        Ok(settings)
    }

    pub(crate) async fn upsert_setting(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        key: SettingKey,
        value: &serde_json::Value,
        updated_by: Uuid,
    ) -> Result<(), sqlx::Error> {
        query(UPSERT_SETTING_SQL)
            .bind(key.as_str())
            .bind(value)
            .bind(updated_by)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

fn merge_row(settings: &mut SiteSettings, row: &PgRow) -> Result<(), LoadSettingsError> {
    let key: String = row.try_get("key")?;
    let value: serde_json::Value = row.try_get("value")?;

    match key.as_str() {
        "maintenance_mode" => settings.maintenance_mode = serde_json::from_value(value)?,
        "site_theme" => settings.site_theme = serde_json::from_value(value)?,
        "site_info" => settings.site_info = serde_json::from_value(value)?,
        _ => {}
    }

    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum LoadSettingsError {
    #[error(transparent)]
    Sql(#[from] sqlx::Error),

    #[error(transparent)]
    Malformed(#[from] serde_json::Error),
}
