// order_service/src/services/mod.rs

//! Clients for the collaborating user and product services.

pub mod pricing;
pub mod product_service;
pub mod user_service;

pub use pricing::price_products;
pub use product_service::{HttpProductCatalog, ProductCatalog};
pub use user_service::{HttpUserDirectory, UserDirectory};
