//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**: two values with the same attributes are
/// the same value (e.g. the actor snapshot stored on a movement, or a dashboard
/// stats snapshot). They are immutable once built; "changing" one means
/// building a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
