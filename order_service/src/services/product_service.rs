// order_service/src/services/product_service.rs

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};

use crate::errors::{AppError, Result};
use crate::models::CatalogProduct;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProductCatalog: Send + Sync {
  async fn fetch_product(&self, product_id: i32) -> Result<CatalogProduct>;
}

/// `ProductCatalog` backed by `GET {base_url}/api/products/{id}`.
#[derive(Debug, Clone)]
pub struct HttpProductCatalog {
  client: Client,
  base_url: String,
}

impl HttpProductCatalog {
  pub fn new(client: Client, base_url: impl Into<String>) -> Self {
    Self {
      client,
      base_url: base_url.into(),
    }
  }
}

#[async_trait]
impl ProductCatalog for HttpProductCatalog {
  #[instrument(name = "product_service::fetch_product", skip(self), err(Display))]
  async fn fetch_product(&self, product_id: i32) -> Result<CatalogProduct> {
    let url = format!("{}/api/products/{}", self.base_url, product_id);
    let unavailable = |e: reqwest::Error| {
      warn!(%url, error = %e, "Product service request failed.");
      AppError::UpstreamUnavailable("Failed to contact product service".to_string())
    };

    let response = self.client.get(&url).send().await.map_err(unavailable)?;

    let status = response.status();
    if status != StatusCode::OK {
      return Err(AppError::UpstreamNotFound {
        message: format!(
          "Failed to fetch product with ID {}; downstream service returned status {}",
          product_id,
          status.as_u16()
        ),
        status: status.as_u16(),
      });
    }

    // Read the body first so a dropped connection is not reported as bad data.
    let body = response.bytes().await.map_err(unavailable)?;
    let product: CatalogProduct = serde_json::from_slice(&body).map_err(|e| {
      warn!(error = %e, "Error decoding product JSON.");
      AppError::UpstreamDecode(format!("Failed to decode product data for ID {}", product_id))
    })?;

    debug!(price = %product.price, "Fetched product.");
    Ok(product)
  }
}
