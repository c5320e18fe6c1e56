//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. In this
/// crate they are the normalized field values (`RoleColor`) that are only
/// constructed through a validating parser.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
