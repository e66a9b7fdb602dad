//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. An order
/// line item is one: two lines with the same product, price and quantity are
/// interchangeable, whereas two customers with the same name are not.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
