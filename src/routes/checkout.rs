use axum::{
    Json, Router,
    extract::{Path, State},
    response::Redirect,
    routing::get,
};

use crate::{
    dto::checkout::PurchaseConfirmation,
    error::AppResult,
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    services::checkout_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/create-checkout-session/{entry_id}",
            get(create_checkout_session).post(create_checkout_session),
        )
        .route("/success/{entry_id}", get(success))
        .route("/cancel", get(cancel))
}

#[utoipa::path(
    post,
    path = "/create-checkout-session/{entry_id}",
    params(("entry_id" = i64, Path, description = "Cart entry ID")),
    responses(
        (status = 303, description = "Redirects to the gateway's hosted checkout page"),
        (status = 404, description = "Cart entry not found"),
        (status = 502, description = "Payment gateway failure; the entry is untouched and checkout can be retried"),
    ),
    tag = "Checkout"
)]
pub async fn create_checkout_session(
    State(state): State<AppState>,
    Path(entry_id): Path<i64>,
) -> AppResult<Redirect> {
    let session = checkout_service::initiate_checkout(&state, entry_id).await?;
    // 303 so the client re-issues the gateway URL as a GET.
    Ok(Redirect::to(&session.url))
}

#[utoipa::path(
    get,
    path = "/success/{entry_id}",
    params(("entry_id" = i64, Path, description = "Cart entry ID")),
    responses(
        (status = 200, description = "Purchase confirmation; replaying an already-finalized id is a no-op", body = ApiResponse<PurchaseConfirmation>)
    ),
    security(("bearer_auth" = [])),
    tag = "Checkout"
)]
pub async fn success(
    State(state): State<AppState>,
    user: AuthUser,
    Path(entry_id): Path<i64>,
) -> AppResult<Json<ApiResponse<PurchaseConfirmation>>> {
    let removed = checkout_service::finalize_success(&state, &user, entry_id).await?;
    let message = if removed.is_some() {
        "Purchase complete"
    } else {
        "Purchase already finalized"
    };
    Ok(Json(ApiResponse::success(
        message,
        PurchaseConfirmation { item: removed },
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    get,
    path = "/cancel",
    responses(
        (status = 200, description = "Checkout abandoned; the cart entry survives")
    ),
    security(("bearer_auth" = [])),
    tag = "Checkout"
)]
pub async fn cancel(_user: AuthUser) -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        "Checkout cancelled. The item is still in your cart.",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
