//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use tradein::{
    roles::{Actor, Role},
    tradein_box::{SessionId, SessionStore},
};
use tradein_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        catalog::MockCatalogService, offers::MockOffersService, orders::MockOrdersService,
        profiles::MockProfilesService, quotes::MockQuotesService,
    },
};
use uuid::Uuid;

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: Uuid = Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_0001);
pub(crate) const TEST_ADMIN_UUID: Uuid = Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_0002);
pub(crate) const TEST_SESSION: SessionId =
    Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_0003);

pub(crate) const TEST_USER: Actor = Actor::new(TEST_USER_UUID, Role::User);
pub(crate) const TEST_ADMIN: Actor = Actor::new(TEST_ADMIN_UUID, Role::Admin);

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_actor(TEST_USER);
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_actor(TEST_ADMIN);
    ctrl.call_next(req, depot, res).await;
}

// Expectations set by `configure` are matched before the trailing `never()`s.

pub(crate) fn catalog_mock(configure: impl FnOnce(&mut MockCatalogService)) -> MockCatalogService {
    let mut catalog = MockCatalogService::new();

    configure(&mut catalog);

    catalog.expect_list_models().never();
    catalog.expect_get_model().never();
    catalog.expect_create_model().never();
    catalog.expect_update_model().never();
    catalog.expect_delete_model().never();
    catalog.expect_list_conditions().never();
    catalog.expect_create_condition().never();
    catalog.expect_create_variant().never();

    catalog
}

pub(crate) fn quotes_mock(configure: impl FnOnce(&mut MockQuotesService)) -> MockQuotesService {
    let mut quotes = MockQuotesService::new();

    configure(&mut quotes);

    quotes.expect_quote().never();

    quotes
}

pub(crate) fn offers_mock(configure: impl FnOnce(&mut MockOffersService)) -> MockOffersService {
    let mut offers = MockOffersService::new();

    configure(&mut offers);

    offers.expect_submit_offer().never();
    offers.expect_submit_offers().never();
    offers.expect_get_offer_for_profile().never();
    offers.expect_list_offers_for_profile().never();
    offers.expect_list_offers().never();
    offers.expect_get_offer().never();
    offers.expect_accept_offer().never();
    offers.expect_decline_offer().never();
    offers.expect_revise_offer().never();
    offers.expect_expire_due_offers().never();

    offers
}

pub(crate) fn orders_mock(configure: impl FnOnce(&mut MockOrdersService)) -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    configure(&mut orders);

    orders.expect_list_orders_for_profile().never();
    orders.expect_list_orders().never();
    orders.expect_get_order().never();
    orders.expect_change_status().never();
    orders.expect_set_final_price().never();

    orders
}

pub(crate) fn profiles_mock(
    configure: impl FnOnce(&mut MockProfilesService),
) -> MockProfilesService {
    let mut profiles = MockProfilesService::new();

    configure(&mut profiles);

    profiles.expect_get_profile().never();
    profiles.expect_list_profiles().never();
    profiles.expect_create_profile().never();
    profiles.expect_update_profile().never();
    profiles.expect_change_role().never();

    profiles
}

pub(crate) fn auth_mock(configure: impl FnOnce(&mut MockAuthService)) -> MockAuthService {
    let mut auth = MockAuthService::new();

    configure(&mut auth);

    auth.expect_authenticate_bearer().never();

    auth
}

/// Service mocks backing a test [`State`]; every unconfigured call fails the test.
pub(crate) struct TestServices {
    pub(crate) catalog: MockCatalogService,
    pub(crate) quotes: MockQuotesService,
    pub(crate) offers: MockOffersService,
    pub(crate) orders: MockOrdersService,
    pub(crate) profiles: MockProfilesService,
    pub(crate) auth: MockAuthService,
}

impl Default for TestServices {
    fn default() -> Self {
        Self {
            catalog: catalog_mock(|_| {}),
            quotes: quotes_mock(|_| {}),
            offers: offers_mock(|_| {}),
            orders: orders_mock(|_| {}),
            profiles: profiles_mock(|_| {}),
            auth: auth_mock(|_| {}),
        }
    }
}

impl TestServices {
    pub(crate) fn into_state(self) -> Arc<State> {
        self.into_state_with_boxes(SessionStore::new())
    }

    pub(crate) fn into_state_with_boxes(self, boxes: SessionStore) -> Arc<State> {
        let app = AppContext {
            catalog: Arc::new(self.catalog),
            quotes: Arc::new(self.quotes),
            offers: Arc::new(self.offers),
            orders: Arc::new(self.orders),
            profiles: Arc::new(self.profiles),
            auth: Arc::new(self.auth),
        };

        Arc::new(State::new(app, boxes))
    }
}

/// Unauthenticated service.
pub(crate) fn public_service(services: TestServices, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(services.into_state())).push(route))
}

/// Service acting as [`TEST_USER`].
pub(crate) fn user_service(services: TestServices, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(services.into_state()))
            .hoop(inject_user)
            .push(route),
    )
}

/// Service acting as [`TEST_ADMIN`].
pub(crate) fn admin_service(services: TestServices, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(services.into_state()))
            .hoop(inject_admin)
            .push(route),
    )
}

/// Service acting as [`TEST_USER`] in [`TEST_SESSION`] over `boxes`.
pub(crate) fn box_service(services: TestServices, boxes: SessionStore, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(services.into_state_with_boxes(boxes)))
            .hoop(inject_user)
            .hoop(crate::tradein_box::session::handler)
            .push(route),
    )
}
