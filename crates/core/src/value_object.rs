//! Value object trait: equality by value, not identity.
//!
//! Names and principal references have **no identity** beyond their text. Two
//! group names with the same characters are the same group.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct GroupName(String);
///
/// impl ValueObject for GroupName {}
///
/// assert_eq!(GroupName("posters".into()), GroupName("posters".into()));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
