use axum::{
    Json, Router,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};

use crate::{
    dto::cart::CartList,
    error::AppResult,
    middleware::{
        auth::{AuthUser, MaybeUser},
        flash::{self, Flash},
    },
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cart", get(cart_list))
        .route("/cart-add/{item_id}", get(cart_add).post(cart_add))
        .route("/delete/{entry_id}", get(remove_entry))
}

#[utoipa::path(
    get,
    path = "/cart",
    responses(
        (status = 200, description = "Cart entries (whole ledger unless per-user scoping is enabled)", body = ApiResponse<CartList>)
    ),
    tag = "Cart"
)]
pub async fn cart_list(
    State(state): State<AppState>,
    user: MaybeUser,
) -> AppResult<Json<ApiResponse<CartList>>> {
    let resp = cart_service::list_entries(&state, user.0.as_ref()).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/cart-add/{item_id}",
    params(("item_id" = i64, Path, description = "Catalog item ID")),
    responses(
        (status = 303, description = "Entry added, redirects home; anonymous callers are redirected to /login with a flash message"),
        (status = 404, description = "Catalog item not found"),
    ),
    tag = "Cart"
)]
pub async fn cart_add(
    State(state): State<AppState>,
    user: MaybeUser,
    Path(item_id): Path<i64>,
) -> AppResult<Response> {
    let user = match user.0 {
        Some(user) => user,
        None => return Ok(flash::redirect_with_flash("/login", Flash::LoginRequired)),
    };

    cart_service::add_entry(&state, &user, item_id).await?;
    Ok(Redirect::to("/").into_response())
}

#[utoipa::path(
    get,
    path = "/delete/{entry_id}",
    params(("entry_id" = i64, Path, description = "Cart entry ID")),
    responses(
        (status = 303, description = "Entry removed, redirects to /cart"),
        (status = 404, description = "Cart entry not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn remove_entry(
    State(state): State<AppState>,
    user: AuthUser,
    Path(entry_id): Path<i64>,
) -> AppResult<Response> {
    cart_service::remove_entry(&state, &user, entry_id).await?;
    Ok(Redirect::to("/cart").into_response())
}
