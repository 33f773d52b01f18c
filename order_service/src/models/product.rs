// order_service/src/models/product.rs

use rust_decimal::Decimal;
use serde::Deserialize;

/// Product as returned by the product service's `GET /api/products/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogProduct {
  #[serde(rename = "_id")]
  pub id: String,
  pub name: String,
  #[serde(with = "rust_decimal::serde::arbitrary_precision")]
  pub price: Decimal,
}
