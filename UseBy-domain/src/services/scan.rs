use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info};

use crate::entities::product::{PriceQuote, ProductCategory, ScannedProduct};

/// Barcode scan errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// Nothing readable was in front of the camera
    #[error("No barcode detected")]
    NoBarcode,

    /// The scanner could not be used
    #[error("Scanner unavailable: {0}")]
    Unavailable(String),
}

/// Capability that turns a barcode into product details
#[async_trait]
pub trait ProductScannerTrait: Send + Sync {
    /// Scan a barcode and look up the product behind it
    async fn scan(&self) -> Result<ScannedProduct, ScanError>;
}

/// Scanner that waits a fixed delay and returns a canned product
#[derive(Debug, Clone)]
pub struct SimulatedScanner {
    delay: Duration,
    product: ScannedProduct,
    fail_with: Option<ScanError>,
}

impl Default for SimulatedScanner {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

impl SimulatedScanner {
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

    /// Create a simulated scanner returning the sample product after `delay`
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            product: sample_product(),
            fail_with: None,
        }
    }

    /// Return a different product
    pub fn with_product(mut self, product: ScannedProduct) -> Self {
        self.product = product;
        self
    }

    /// Configure the scanner to fail every scan
    pub fn with_failure(mut self, error: ScanError) -> Self {
        self.fail_with = Some(error);
        self
    }
}

#[async_trait]
impl ProductScannerTrait for SimulatedScanner {
    async fn scan(&self) -> Result<ScannedProduct, ScanError> {
        debug!("Simulating barcode scan ({} ms)", self.delay.as_millis());
        tokio::time::sleep(self.delay).await;

        if let Some(error) = &self.fail_with {
            return Err(error.clone());
        }

        info!("Scanned product: {}", self.product.name);
        Ok(self.product.clone())
    }
}

/// The product the simulated scanner reports
pub fn sample_product() -> ScannedProduct {
    let quote = |platform: &str, price: &str, delivery: &str| PriceQuote {
        platform: platform.to_string(),
        price: price.to_string(),
        delivery: delivery.to_string(),
    };

    ScannedProduct {
        name: "Vitamin D3 Tablets".to_string(),
        category: ProductCategory::Medicine,
        image_url: Some(
            "https://images.pexels.com/photos/3683074/pexels-photo-3683074.jpeg?auto=compress&cs=tinysrgb&w=200"
                .to_string(),
        ),
        expiry_date: NaiveDate::from_ymd_opt(2024, 12, 15),
        prices: vec![
            quote("1mg", "₹450", "2 hours"),
            quote("Pharmeasy", "₹480", "3 hours"),
            quote("Amazon", "₹420", "1 day"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_simulated_scan_returns_sample_after_delay() {
        let scanner = SimulatedScanner::default();
        let started = tokio::time::Instant::now();

        let product = scanner.scan().await.unwrap();

        assert!(started.elapsed() >= SimulatedScanner::DEFAULT_DELAY);
        assert_eq!(product.name, "Vitamin D3 Tablets");
        assert_eq!(product.category, ProductCategory::Medicine);
        assert_eq!(product.expiry_date, NaiveDate::from_ymd_opt(2024, 12, 15));
        assert_eq!(product.prices.len(), 3);
    }

    #[tokio::test]
    async fn test_simulated_scan_failure() {
        let scanner = SimulatedScanner::new(Duration::ZERO).with_failure(ScanError::NoBarcode);
        assert_eq!(scanner.scan().await, Err(ScanError::NoBarcode));
    }

    #[tokio::test]
    async fn test_custom_product() {
        let product = ScannedProduct {
            name: "AA Batteries".to_string(),
            category: ProductCategory::Batteries,
            image_url: None,
            expiry_date: None,
            prices: Vec::new(),
        };
        let scanner = SimulatedScanner::new(Duration::ZERO).with_product(product.clone());
        assert_eq!(scanner.scan().await, Ok(product));
    }
}
