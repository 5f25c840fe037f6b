//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable domain values compared entirely by their
/// attributes (e.g. invoice totals), as opposed to entities, which are
/// identified by id.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
