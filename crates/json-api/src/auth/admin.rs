//! Admin-only route guard.

use salvo::prelude::*;
use tracing::info;

use crate::extensions::*;

/// Where non-admin callers are sent.
pub(crate) const NON_ADMIN_REDIRECT: &str = "/me";

/// Let administrators through and redirect everyone else to their own profile.
///
/// Must run after the bearer auth middleware.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let actor = match depot.actor_or_401() {
        Ok(actor) => actor,
        Err(status) => {
            res.render(status);

            return;
        }
    };

    if !actor.role.is_admin() {
        info!(profile_uuid = %actor.profile, "redirecting non-admin away from admin route");

        res.render(Redirect::other(NON_ADMIN_REDIRECT));
        ctrl.skip_rest();

        return;
    }

    ctrl.call_next(req, depot, res).await;
}
