//! App Context

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        categories::{CategoriesService, PgCategoriesService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        settings::{PgSettingsService, SettingsService, SettingsServiceError, watcher},
        tickets::{PgTicketsService, TicketsService},
        users::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to load site settings")]
    Settings(#[source] SettingsServiceError),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub categories: Arc<dyn CategoriesService>,
    pub orders: Arc<dyn OrdersService>,
    pub users: Arc<dyn UsersService>,
    pub tickets: Arc<dyn TicketsService>,
    pub settings: Arc<dyn SettingsService>,
    pub auth: Arc<dyn AuthService>,
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or
    /// loading the initial settings snapshot fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool.clone());

        let settings: Arc<dyn SettingsService> = Arc::new(
            PgSettingsService::connect(db.clone())
                .await
                .map_err(AppInitError::Settings)?,
        );

        // Keep the settings snapshot fresh across processes.
        tokio::spawn(watcher::watch_settings(db.clone(), Arc::clone(&settings)));

        Ok(Self {
            products: Arc::new(PgProductsService::new(db.clone())),
            categories: Arc::new(PgCategoriesService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            users: Arc::new(PgUsersService::new(db.clone())),
            tickets: Arc::new(PgTicketsService::new(db)),
            settings,
            auth: Arc::new(PgAuthService::new(pool)),
        })
    }
}
