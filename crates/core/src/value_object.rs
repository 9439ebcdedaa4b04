//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are compared by their attribute values.
/// A currency kind tag is a value object: every `"gold"` is the same `"gold"`.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct CurrencyKind(String);
///
/// impl ValueObject for CurrencyKind {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
