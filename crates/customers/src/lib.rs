//! Customers domain module.
//!
//! Customer records and the lookup contract the order workflow depends on.
//! Pure domain logic; storage lives in `orderdesk-infra`.

pub mod customer;
pub mod repository;

pub use customer::{Customer, NewCustomer};
pub use repository::CustomerRepository;
