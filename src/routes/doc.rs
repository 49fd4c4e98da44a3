use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, RegisterRequest},
        cart::CartList,
        catalog::{CatalogList, CreateCatalogItemRequest},
        checkout::PurchaseConfirmation,
    },
    models::{CartEntry, CatalogItem, User},
    response::{ApiResponse, Meta},
    routes::{auth, cart, catalog, checkout, health},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register_form,
        auth::register,
        auth::login_form,
        auth::login,
        auth::logout,
        catalog::home,
        catalog::add_item_form,
        catalog::add_item,
        cart::cart_list,
        cart::cart_add,
        cart::remove_entry,
        checkout::create_checkout_session,
        checkout::success,
        checkout::cancel
    ),
    components(
        schemas(
            User,
            CatalogItem,
            CartEntry,
            CatalogList,
            CartList,
            PurchaseConfirmation,
            CreateCatalogItemRequest,
            RegisterRequest,
            LoginRequest,
            Meta,
            ApiResponse<CatalogItem>,
            ApiResponse<CatalogList>,
            ApiResponse<CartList>,
            ApiResponse<PurchaseConfirmation>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Catalog", description = "Catalog browsing and privileged item creation"),
        (name = "Auth", description = "Registration, login, logout"),
        (name = "Cart", description = "Cart ledger endpoints"),
        (name = "Checkout", description = "Purchase lifecycle endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
