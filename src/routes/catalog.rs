use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};

use crate::{
    dto::catalog::{CatalogList, CreateCatalogItemRequest},
    error::AppResult,
    middleware::auth::{MaybeUser, require_admin},
    response::{ApiResponse, Meta},
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/add", get(add_item_form).post(add_item))
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Catalog listing", body = ApiResponse<CatalogList>)
    ),
    tag = "Catalog"
)]
pub async fn home(State(state): State<AppState>) -> AppResult<Json<ApiResponse<CatalogList>>> {
    let resp = catalog_service::list_items(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/add",
    responses(
        (status = 200, description = "Catalog item form (privileged only)"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn add_item_form(user: MaybeUser) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    require_admin(&user)?;
    Ok(Json(ApiResponse::success(
        "Add catalog item",
        serde_json::json!({ "fields": ["name", "price", "image_url"] }),
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    post,
    path = "/add",
    request_body = CreateCatalogItemRequest,
    responses(
        (status = 303, description = "Item created; redirects home"),
        (status = 400, description = "Invalid input (e.g. malformed price)"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn add_item(
    State(state): State<AppState>,
    user: MaybeUser,
    Json(payload): Json<CreateCatalogItemRequest>,
) -> AppResult<Response> {
    let user = require_admin(&user)?;
    catalog_service::create_item(&state, user, payload).await?;
    Ok(Redirect::to("/").into_response())
}
