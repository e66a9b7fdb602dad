//! Sales orders domain module.
//!
//! Orders are created once by [`CreateOrderWorkflow`], which validates the
//! customer and requested stock against the catalog, decrements stock and then
//! persists the order through the injected repositories.

pub mod error;
pub mod order;
pub mod repository;
pub mod workflow;

pub use error::OrderError;
pub use order::{Order, OrderLineItem, OrderRequest, RequestedItem};
pub use repository::OrderRepository;
pub use workflow::CreateOrderWorkflow;
