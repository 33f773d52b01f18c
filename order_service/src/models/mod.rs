// order_service/src/models/mod.rs

//! Data structures for persisted orders and collaborator payloads.

pub mod order;
pub mod order_item;
pub mod product;

pub use order::{NewOrderRequest, Order};
pub use order_item::OrderItem;
pub use product::CatalogProduct;
