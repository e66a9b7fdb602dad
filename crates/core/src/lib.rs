//! `orderdesk-core` — shared domain building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, entity/value-object markers and the error types every other
//! crate speaks.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult, RepositoryError, RepositoryResult};
pub use id::{CustomerId, OrderId, ProductId};
pub use value_object::ValueObject;
