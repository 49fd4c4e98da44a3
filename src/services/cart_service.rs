use crate::{
    audit::log_audit,
    dto::cart::CartList,
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::CartEntry,
    response::{ApiResponse, Meta},
    services::catalog_service,
    state::AppState,
};

/// Add a cart placement for the given catalog item, copying its display
/// fields into the new entry. Adding the same item again creates another
/// independent entry; each is its own line item.
pub async fn add_entry(state: &AppState, user: &AuthUser, item_id: i64) -> AppResult<CartEntry> {
    let item = catalog_service::find_item(state, item_id).await?;

    let entry: CartEntry = sqlx::query_as(
        r#"
        INSERT INTO cart_entries (user_id, catalog_item_id, name, price, image_url)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(user.user_id)
    .bind(item.id)
    .bind(item.name.as_str())
    .bind(item.price.as_str())
    .bind(item.image_url.as_str())
    .fetch_one(&state.pool)
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "cart_add",
        Some("cart_entries"),
        Some(serde_json::json!({ "catalog_item_id": item_id, "entry_id": entry.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(entry)
}

/// The cart view. Source behavior returns every entry in the ledger no
/// matter who asks; CART_SCOPE_TO_USER opts into per-owner filtering.
pub async fn list_entries(
    state: &AppState,
    user: Option<&AuthUser>,
) -> AppResult<ApiResponse<CartList>> {
    let items: Vec<CartEntry> = match (state.config.cart_scope_to_user, user) {
        (true, Some(user)) => {
            sqlx::query_as(
                "SELECT * FROM cart_entries WHERE user_id = $1 ORDER BY created_at DESC",
            )
            .bind(user.user_id)
            .fetch_all(&state.pool)
            .await?
        }
        _ => {
            sqlx::query_as("SELECT * FROM cart_entries ORDER BY created_at DESC")
                .fetch_all(&state.pool)
                .await?
        }
    };

    let meta = Meta::total(items.len() as i64);
    Ok(ApiResponse::success("Cart", CartList { items }, Some(meta)))
}

/// Lookup used by the checkout orchestrator.
pub async fn get_entry(state: &AppState, entry_id: i64) -> AppResult<CartEntry> {
    let entry: Option<CartEntry> = sqlx::query_as("SELECT * FROM cart_entries WHERE id = $1")
        .bind(entry_id)
        .fetch_optional(&state.pool)
        .await?;
    match entry {
        Some(entry) => Ok(entry),
        None => Err(AppError::NotFound),
    }
}

pub async fn remove_entry(state: &AppState, user: &AuthUser, entry_id: i64) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM cart_entries WHERE id = $1")
        .bind(entry_id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "cart_remove",
        Some("cart_entries"),
        Some(serde_json::json!({ "entry_id": entry_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(())
}
