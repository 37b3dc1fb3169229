use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::{info, instrument, warn};

use use_by_domain::entities::{ProductCategory, ScannedProduct};
use use_by_domain::services::ProductScannerTrait;

use crate::entities::common::ErrorResponse;
use crate::entities::products::CategoryResponse;

/// Scanner type for dependency injection
pub type ProductScanner = Arc<dyn ProductScannerTrait>;

/// List the product categories shown in the add-product flow
#[utoipa::path(
    get,
    path = "/api/v1/products/categories",
    responses(
        (status = 200, description = "Product categories", body = [CategoryResponse]),
    ),
    tag = "products"
)]
#[instrument]
pub async fn list_categories() -> Json<Vec<CategoryResponse>> {
    Json(
        ProductCategory::all()
            .iter()
            .copied()
            .map(CategoryResponse::from)
            .collect(),
    )
}

/// Scan a barcode and return the product behind it
#[utoipa::path(
    post,
    path = "/api/v1/products/scan",
    responses(
        (status = 200, description = "Scanned product with price quotes", body = ScannedProduct),
        (status = 503, description = "Scanner unavailable or nothing detected", body = ErrorResponse),
    ),
    tag = "products"
)]
#[instrument(skip(scanner))]
pub async fn scan_product(
    State(scanner): State<ProductScanner>,
) -> Result<Json<ScannedProduct>, ErrorResponse> {
    match scanner.scan().await {
        Ok(product) => {
            info!("Scan returned {}", product.name);
            Ok(Json(product))
        }
        Err(e) => {
            warn!("Scan failed: {}", e);
            Err(ErrorResponse::service_unavailable(&e.to_string()))
        }
    }
}
