//! Currency family tags and presentation handles.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use coffer_core::{DomainError, ValueObject};

/// Tag distinguishing currency families ("gold", "gems").
///
/// Ledgers of different kinds never trade with each other. The tag is trimmed
/// on construction and must not be empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyKind(String);

impl CurrencyKind {
    pub fn new(tag: impl Into<String>) -> Result<Self, DomainError> {
        let tag = tag.into();
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("currency kind cannot be empty"));
        }
        if trimmed.len() == tag.len() {
            Ok(Self(tag))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for CurrencyKind {}

impl Default for CurrencyKind {
    fn default() -> Self {
        Self("coins".to_string())
    }
}

impl core::fmt::Display for CurrencyKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CurrencyKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CurrencyKind {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CurrencyKind> for String {
    fn from(value: CurrencyKind) -> Self {
        value.0
    }
}

/// Opaque handle to an icon asset. The economy never looks inside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconId(String);

impl IconId {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for IconId {}
