// order_service/src/services/pricing.rs

use rust_decimal::Decimal;
use tracing::{info, instrument};

use super::product_service::ProductCatalog;
use crate::errors::{AppError, Result};

/// Prices `product_ids` one after another, in the given order, and returns the
/// exact sum. Duplicates are fetched and counted once per occurrence. The first
/// failure aborts the whole operation. A negative price or a total past
/// `Decimal::MAX` is treated as an undecodable reply.
#[instrument(name = "pricing::price_products", skip(catalog), err(Display))]
pub async fn price_products(catalog: &dyn ProductCatalog, product_ids: &[i32]) -> Result<Decimal> {
  let mut total = Decimal::ZERO;
  for &product_id in product_ids {
    let product = catalog.fetch_product(product_id).await?;
    if product.price < Decimal::ZERO {
      return Err(AppError::UpstreamDecode(format!(
        "Negative price {} for product ID {}",
        product.price, product_id
      )));
    }
    total = total
      .checked_add(product.price)
      .ok_or_else(|| AppError::UpstreamDecode(format!("Price total overflowed at product ID {}", product_id)))?;
  }
  info!(%total, "Total amount calculated.");
  Ok(total)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::CatalogProduct;
  use crate::services::product_service::MockProductCatalog;
  use mockall::{predicate::eq, Sequence};

  fn product(id: i32, price: &str) -> CatalogProduct {
    CatalogProduct {
      id: id.to_string(),
      name: format!("product-{id}"),
      price: price.parse().unwrap(),
    }
  }

  #[tokio::test]
  async fn sums_prices_in_request_order_including_duplicates() {
    let mut catalog = MockProductCatalog::new();
    let mut seq = Sequence::new();
    for (id, price) in [(101, "9.99"), (102, "5.00"), (101, "9.99")] {
      catalog
        .expect_fetch_product()
        .with(eq(id))
        .times(1)
        .in_sequence(&mut seq)
        .returning(move |_| Ok(product(id, price)));
    }

    let total = price_products(&catalog, &[101, 102, 101]).await.unwrap();
    assert_eq!(total, "24.98".parse::<Decimal>().unwrap());
  }

  #[tokio::test]
  async fn sum_is_exact_for_values_floats_cannot_represent() {
    let mut catalog = MockProductCatalog::new();
    catalog
      .expect_fetch_product()
      .times(3)
      .returning(|id| Ok(product(id, "0.1")));

    let total = price_products(&catalog, &[1, 2, 3]).await.unwrap();
    assert_eq!(total.to_string(), "0.3");
  }

  #[tokio::test]
  async fn first_failure_stops_iteration() {
    let mut catalog = MockProductCatalog::new();
    let mut seq = Sequence::new();
    for id in [1, 2] {
      catalog
        .expect_fetch_product()
        .with(eq(id))
        .times(1)
        .in_sequence(&mut seq)
        .returning(move |_| Ok(product(id, "1.00")));
    }
    catalog
      .expect_fetch_product()
      .with(eq(3))
      .times(1)
      .in_sequence(&mut seq)
      .returning(|_| {
        Err(AppError::UpstreamNotFound {
          message: "Failed to fetch product with ID 3; downstream service returned status 404".into(),
          status: 404,
        })
      });

    // Products 4 and 5 have no expectation: requesting them would panic the mock.
    let err = price_products(&catalog, &[1, 2, 3, 4, 5]).await.unwrap_err();
    match err {
      AppError::UpstreamNotFound { message, status } => {
        assert_eq!(status, 404);
        assert!(message.contains("ID 3"), "{message}");
      }
      other => panic!("unexpected error: {other:?}"),
    }
  }

  #[tokio::test]
  async fn total_past_decimal_max_is_a_decode_error() {
    let mut catalog = MockProductCatalog::new();
    catalog.expect_fetch_product().times(2).returning(|id| {
      Ok(CatalogProduct {
        id: id.to_string(),
        name: format!("product-{id}"),
        price: Decimal::MAX,
      })
    });

    let err = price_products(&catalog, &[1, 2]).await.unwrap_err();
    match err {
      AppError::UpstreamDecode(message) => assert_eq!(message, "Price total overflowed at product ID 2"),
      other => panic!("unexpected error: {other:?}"),
    }
  }

  #[tokio::test]
  async fn negative_price_is_a_decode_error() {
    let mut catalog = MockProductCatalog::new();
    catalog.expect_fetch_product().with(eq(1)).returning(|id| Ok(product(id, "4.00")));
    catalog.expect_fetch_product().with(eq(2)).returning(|id| Ok(product(id, "-1.50")));

    let err = price_products(&catalog, &[1, 2]).await.unwrap_err();
    assert!(matches!(err, AppError::UpstreamDecode(ref m) if m.contains("product ID 2")), "{err:?}");
  }

  #[tokio::test]
  async fn zero_price_is_accepted() {
    let mut catalog = MockProductCatalog::new();
    catalog.expect_fetch_product().returning(|id| Ok(product(id, "0.00")));

    let total = price_products(&catalog, &[1]).await.unwrap();
    assert!(total.is_zero());
  }
}
