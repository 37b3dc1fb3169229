use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use use_by_domain::entities::ProductCategory;

/// Public representation of a product category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    /// Category identifier, e.g. "medicine"
    pub id: String,

    /// Display name
    pub name: String,

    /// Emoji icon
    pub icon: String,

    /// Accent colour as a hex string
    pub color: String,
}

impl From<ProductCategory> for CategoryResponse {
    fn from(category: ProductCategory) -> Self {
        Self {
            id: category.id().to_string(),
            name: category.name().to_string(),
            icon: category.icon().to_string(),
            color: category.color().to_string(),
        }
    }
}
