//! Staff role gate for the admin sub-router.
//!
//! The store policies are the authoritative check; this gate is the
//! router-level counterpart that keeps non-staff callers out of the
//! admin surface with a clean 403.

use salvo::prelude::*;

use crate::extensions::*;

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let actor = match depot.actor_or_401() {
        Ok(actor) => actor,
        Err(error) => {
            res.render(error);

            return;
        }
    };

    if !actor.is_staff() {
        res.render(StatusError::forbidden().brief("Staff role required"));

        return;
    }

    ctrl.call_next(req, depot, res).await;
}
