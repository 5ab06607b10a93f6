//! Change-notification watcher for site settings.

use std::{sync::Arc, time::Duration};

use sqlx::postgres::PgListener;
use tracing::{debug, warn};

use crate::{database::Db, domain::settings::service::SettingsService};

const SETTINGS_CHANNEL: &str = "site_settings_changed";

const RECONNECT_DELAY: Duration = Duration::from_secs(1);

/// Listens on the `site_settings_changed` channel and refreshes the
/// snapshot whenever a row changes. Notifications are best-effort; a
/// dropped one only delays the refresh until the next write.
///
/// Runs until the process shuts down. Connection loss is retried with a
/// short delay.
pub async fn watch_settings(db: Db, settings: Arc<dyn SettingsService>) {
    loop {
        match listen_loop(&db, settings.as_ref()).await {
            Ok(()) => return,
            Err(error) => {
                warn!(%error, "settings listener disconnected, reconnecting");
                tokio::time::sleep(RECONNECT_DELAY).await;
            }
        }
    }
}

async fn listen_loop(db: &Db, settings: &dyn SettingsService) -> Result<(), sqlx::Error> {
    let mut listener = PgListener::connect_with(db.pool()).await?;

    listener.listen(SETTINGS_CHANNEL).await?;

    loop {
        let notification = listener.recv().await?;

        debug!(key = notification.payload(), "site settings changed");

        if let Err(error) = settings.refresh().await {
            warn!(%error, "failed to refresh settings snapshot");
        }
    }
}
