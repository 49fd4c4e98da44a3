use serde::Serialize;
use utoipa::ToSchema;

use crate::models::CartEntry;

/// Confirmation view for a finalized purchase. `item` is None when the
/// entry was already consumed by an earlier finalize (replayed redirect).
#[derive(Debug, Serialize, ToSchema)]
pub struct PurchaseConfirmation {
    pub item: Option<CartEntry>,
}
