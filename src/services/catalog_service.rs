use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

use crate::{
    audit::log_audit,
    dto::catalog::{CatalogList, CreateCatalogItemRequest},
    entity::catalog_items::{ActiveModel, Column, Entity as CatalogItems, Model as ItemModel},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    pricing,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_items(state: &AppState) -> AppResult<ApiResponse<CatalogList>> {
    let items: Vec<_> = CatalogItems::find()
        .order_by_desc(Column::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(item_from_entity)
        .collect();

    let meta = Meta::total(items.len() as i64);
    Ok(ApiResponse::success(
        "Catalog",
        CatalogList { items },
        Some(meta),
    ))
}

/// Lookup used by the cart ledger's snapshot-on-add.
pub async fn find_item(state: &AppState, id: i64) -> AppResult<crate::models::CatalogItem> {
    let item = CatalogItems::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(item_from_entity);
    match item {
        Some(item) => Ok(item),
        None => Err(AppError::NotFound),
    }
}

/// Privileged creation. The display price is validated here so a malformed
/// price can never reach the checkout amount computation.
pub async fn create_item(
    state: &AppState,
    user: &AuthUser,
    payload: CreateCatalogItemRequest,
) -> AppResult<crate::models::CatalogItem> {
    ensure_admin(user)?;

    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".into()));
    }
    if payload.image_url.trim().is_empty() {
        return Err(AppError::Validation("image_url is required".into()));
    }
    pricing::validate_display_price(&payload.price)?;

    let item = ActiveModel {
        id: NotSet,
        name: Set(payload.name),
        price: Set(payload.price),
        image_url: Set(payload.image_url),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "catalog_create",
        Some("catalog_items"),
        Some(serde_json::json!({ "catalog_item_id": item.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(item_from_entity(item))
}

fn item_from_entity(model: ItemModel) -> crate::models::CatalogItem {
    crate::models::CatalogItem {
        id: model.id,
        name: model.name,
        price: model.price,
        image_url: model.image_url,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
