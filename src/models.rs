use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Explicit privilege attribute: "user" or "admin".
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CatalogItem {
    pub id: i64,
    pub name: String,
    /// Display price: a leading `$` followed by whole currency units.
    pub price: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

/// One cart placement. The name/price/image columns are a snapshot of the
/// catalog item at add time and are never re-read or updated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CartEntry {
    pub id: i64,
    pub user_id: i64,
    pub catalog_item_id: i64,
    pub name: String,
    pub price: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}
