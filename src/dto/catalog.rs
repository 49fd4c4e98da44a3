use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::CatalogItem;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCatalogItemRequest {
    pub name: String,
    /// Display price, `$` plus whole units, e.g. `"$20"`.
    pub price: String,
    pub image_url: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CatalogList {
    #[schema(value_type = Vec<CatalogItem>)]
    pub items: Vec<CatalogItem>,
}
