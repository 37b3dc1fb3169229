use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Inventory category a product belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Medicine,
    Cosmetics,
    Cleaning,
    Food,
    Batteries,
    Other,
}

impl ProductCategory {
    /// Every category, in picker order
    pub fn all() -> &'static [ProductCategory] {
        &[
            ProductCategory::Medicine,
            ProductCategory::Cosmetics,
            ProductCategory::Cleaning,
            ProductCategory::Food,
            ProductCategory::Batteries,
            ProductCategory::Other,
        ]
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|category| category.id() == id)
    }

    pub fn id(&self) -> &'static str {
        match self {
            ProductCategory::Medicine => "medicine",
            ProductCategory::Cosmetics => "cosmetics",
            ProductCategory::Cleaning => "cleaning",
            ProductCategory::Food => "food",
            ProductCategory::Batteries => "batteries",
            ProductCategory::Other => "other",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProductCategory::Medicine => "Medicine",
            ProductCategory::Cosmetics => "Cosmetics",
            ProductCategory::Cleaning => "Cleaning",
            ProductCategory::Food => "Food",
            ProductCategory::Batteries => "Batteries",
            ProductCategory::Other => "Other",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ProductCategory::Medicine => "💊",
            ProductCategory::Cosmetics => "🧴",
            ProductCategory::Cleaning => "🧽",
            ProductCategory::Food => "🥫",
            ProductCategory::Batteries => "🔋",
            ProductCategory::Other => "📦",
        }
    }

    /// Accent colour as a hex string
    pub fn color(&self) -> &'static str {
        match self {
            ProductCategory::Medicine => "#FF6B6B",
            ProductCategory::Cosmetics => "#4ECDC4",
            ProductCategory::Cleaning => "#45B7D1",
            ProductCategory::Food => "#96CEB4",
            ProductCategory::Batteries => "#FFEAA7",
            ProductCategory::Other => "#DDA0DD",
        }
    }
}

/// Price offered by one retail platform for a scanned product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct PriceQuote {
    /// Retail platform name
    pub platform: String,

    /// Display price including currency symbol
    pub price: String,

    /// Delivery estimate, e.g. "2 hours"
    pub delivery: String,
}

/// Product details returned by a barcode scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct ScannedProduct {
    /// Product name
    pub name: String,

    /// Product category
    pub category: ProductCategory,

    /// Optional product image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Expiry date printed on the package, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,

    /// Price comparison across platforms
    #[serde(default)]
    pub prices: Vec<PriceQuote>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_lookup() {
        assert_eq!(ProductCategory::all().len(), 6);
        assert_eq!(ProductCategory::from_id("food"), Some(ProductCategory::Food));
        assert_eq!(ProductCategory::from_id("toys"), None);

        for category in ProductCategory::all() {
            assert_eq!(ProductCategory::from_id(category.id()), Some(*category));
            assert!(category.color().starts_with('#'));
        }
    }

    #[test]
    fn test_category_serializes_as_id() {
        let json = serde_json::to_value(ProductCategory::Batteries).unwrap();
        assert_eq!(json, serde_json::json!(ProductCategory::Batteries.id()));
    }
}
