//! `coffer-core` — shared building blocks for the economy crates.
//!
//! Pure domain primitives only: errors, identifiers and marker traits.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{EntityId, LedgerId};
pub use value_object::ValueObject;
