//! Checkout orchestration: Pending -> AwaitingGatewayRedirect -> Fulfilled
//! or Abandoned. The only local state is the cart entry itself; a fulfilled
//! purchase is represented by its absence.

use crate::{
    audit::log_audit,
    error::AppResult,
    gateway::{CheckoutSession, CheckoutSessionParams},
    middleware::auth::AuthUser,
    models::CartEntry,
    pricing,
    services::cart_service,
    state::AppState,
};

/// Create a gateway session for one cart entry and hand back the hosted
/// checkout URL. Nothing is written before the gateway call succeeds, so a
/// gateway failure leaves the ledger exactly as it was.
pub async fn initiate_checkout(state: &AppState, entry_id: i64) -> AppResult<CheckoutSession> {
    let entry = cart_service::get_entry(state, entry_id).await?;
    let unit_amount = pricing::minor_units(&entry.price)?;

    let base = state.config.public_base_url.trim_end_matches('/');
    let params = CheckoutSessionParams {
        name: &entry.name,
        image_url: &entry.image_url,
        unit_amount,
        success_url: format!("{base}/success/{}", entry.id),
        cancel_url: format!("{base}/cancel"),
    };

    let session = state.gateway.create_checkout_session(params).await?;

    if let Err(err) = log_audit(
        &state.pool,
        None,
        "checkout_initiated",
        Some("cart_entries"),
        Some(serde_json::json!({
            "entry_id": entry.id,
            "unit_amount": unit_amount,
            "session_id": session.id,
        })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(session)
}

/// Consume the entry on the client's success redirect. DELETE .. RETURNING
/// captures the snapshot for the confirmation view in the same statement
/// that removes the row, so two racing finalize calls cannot both claim it:
/// the loser sees no row and the whole call is a no-op, not an error.
pub async fn finalize_success(
    state: &AppState,
    user: &AuthUser,
    entry_id: i64,
) -> AppResult<Option<CartEntry>> {
    let removed: Option<CartEntry> =
        sqlx::query_as("DELETE FROM cart_entries WHERE id = $1 RETURNING *")
            .bind(entry_id)
            .fetch_optional(&state.pool)
            .await?;

    if let Some(entry) = &removed {
        if let Err(err) = log_audit(
            &state.pool,
            Some(user.user_id),
            "purchase_finalized",
            Some("cart_entries"),
            Some(serde_json::json!({
                "entry_id": entry.id,
                "catalog_item_id": entry.catalog_item_id,
                "price": entry.price,
            })),
        )
        .await
        {
            tracing::warn!(error = %err, "audit log failed");
        }
    }

    Ok(removed)
}
