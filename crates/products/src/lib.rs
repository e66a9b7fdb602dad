//! Products domain module (catalog).
//!
//! Catalog products carry a price and an available quantity. The order
//! workflow reads them in batches and writes back new quantities through
//! `ProductRepository`.

pub mod product;
pub mod repository;

pub use product::{CatalogProduct, NewProduct, StockUpdate};
pub use repository::ProductRepository;
