use serde::Serialize;
use utoipa::ToSchema;

use crate::models::CartEntry;

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CartList {
    #[schema(value_type = Vec<CartEntry>)]
    pub items: Vec<CartEntry>,
}
