//! App Router

use salvo::Router;

use crate::{auth, catalog, offers, orders, profiles, quotes, tradein_box};

/// Every route except the healthcheck and API docs.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(public_router())
        .push(box_router())
        .push(me_router())
        .push(admin_router())
}

fn public_router() -> Router {
    Router::new()
        .push(
            Router::with_path("catalog")
                .push(
                    Router::with_path("models")
                        .get(catalog::index::handler)
                        .push(Router::with_path("{model}").get(catalog::get::handler)),
                )
                .push(Router::with_path("conditions").get(catalog::conditions::index::handler)),
        )
        .push(Router::with_path("quotes").post(quotes::create::handler))
}

fn box_router() -> Router {
    Router::with_path("box")
        .hoop(tradein_box::session::handler)
        .get(tradein_box::get::handler)
        .delete(tradein_box::clear::handler)
        .push(
            Router::with_path("items")
                .post(tradein_box::add_item::handler)
                .push(Router::with_path("{item}").delete(tradein_box::remove_item::handler)),
        )
        .push(
            Router::with_path("checkout")
                .hoop(auth::middleware::handler)
                .post(tradein_box::checkout::handler),
        )
}

fn me_router() -> Router {
    Router::with_path("me")
        .hoop(auth::middleware::handler)
        .get(profiles::me::handler)
        .put(profiles::update_me::handler)
        .push(Router::with_path("password/check").post(profiles::check_password::handler))
        .push(
            Router::with_path("offers")
                .get(offers::my_index::handler)
                .push(Router::with_path("{offer}").get(offers::my_get::handler)),
        )
        .push(Router::with_path("orders").get(orders::my_index::handler))
}

fn admin_router() -> Router {
    Router::with_path("admin")
        .hoop(auth::middleware::handler)
        .hoop(auth::admin::handler)
        .push(
            Router::with_path("catalog")
                .push(
                    Router::with_path("models")
                        .get(catalog::admin_index::handler)
                        .post(catalog::create::handler)
                        .push(
                            Router::with_path("{model}")
                                .put(catalog::update::handler)
                                .delete(catalog::delete::handler)
                                .push(
                                    Router::with_path("variants")
                                        .post(catalog::variants::create::handler),
                                ),
                        ),
                )
                .push(Router::with_path("conditions").post(catalog::conditions::create::handler)),
        )
        .push(
            Router::with_path("offers").get(offers::index::handler).push(
                Router::with_path("{offer}")
                    .get(offers::get::handler)
                    .push(Router::with_path("accept").post(offers::accept::handler))
                    .push(Router::with_path("decline").post(offers::decline::handler))
                    .push(Router::with_path("revise").post(offers::revise::handler)),
            ),
        )
        .push(
            Router::with_path("orders").get(orders::index::handler).push(
                Router::with_path("{order}")
                    .get(orders::get::handler)
                    .push(Router::with_path("status").put(orders::status::handler))
                    .push(Router::with_path("final-price").put(orders::final_price::handler)),
            ),
        )
        .push(
            Router::with_path("profiles")
                .get(profiles::index::handler)
                .push(Router::with_path("{profile}/role").put(profiles::change_role::handler)),
        )
}
