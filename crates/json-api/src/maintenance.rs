//! Maintenance mode gate.
//!
//! Reads the in-process settings snapshot on every request. When
//! maintenance is enabled, storefront traffic gets a 503 carrying the
//! configured message; staff actors pass through so the admin surface
//! stays reachable.

use std::sync::Arc;

use salvo::prelude::*;

use crate::{extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => state,
        Err(_error) => {
            res.render(StatusError::internal_server_error());

            return;
        }
    };

    let settings = state.app.settings.settings();

    if settings.maintenance_mode.enabled {
        let staff = depot.actor_or_401().is_ok_and(|actor| actor.is_staff());

        if !staff {
            res.render(
                StatusError::service_unavailable().brief(settings.maintenance_mode.message.clone()),
            );

            return;
        }
    }

    ctrl.call_next(req, depot, res).await;
}
