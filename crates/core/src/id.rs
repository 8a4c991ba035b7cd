//! Strongly-typed identifiers used across the domain.
//!
//! Identifiers are opaque strings owned by the host platform. Ids minted locally
//! use a `<prefix>_<uuid v7>` shape (e.g. `brand_0190...`), which keeps them
//! time-ordered and recognisable in logs.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a price list (assigned by the host platform).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PriceListId(String);

/// Identifier of a product (assigned by the host platform).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

/// Identifier of a brand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BrandId(String);

/// Identifier of a price set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PriceSetId(String);

/// Identifier of a single price inside a price set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PriceId(String);

macro_rules! impl_string_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Parse an identifier; surrounding whitespace is trimmed and the
            /// result must be non-empty.
            pub fn parse(value: impl AsRef<str>) -> Result<Self, DomainError> {
                let trimmed = value.as_ref().trim();
                if trimmed.is_empty() {
                    return Err(DomainError::invalid_id(format!("{}: empty", $name)));
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $t {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }
    };
}

macro_rules! impl_generated_id {
    ($t:ty, $prefix:literal) => {
        impl $t {
            /// Mint a new identifier (`<prefix>_<uuid v7>`).
            ///
            /// Prefer passing ids explicitly in tests for determinism.
            pub fn new() -> Self {
                Self(format!("{}_{}", $prefix, Uuid::now_v7().simple()))
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(format!("{}_{}", $prefix, uuid.simple()))
            }
        }

        impl Default for $t {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

impl_string_newtype!(PriceListId, "PriceListId");
impl_string_newtype!(ProductId, "ProductId");
impl_string_newtype!(BrandId, "BrandId");
impl_string_newtype!(PriceSetId, "PriceSetId");
impl_string_newtype!(PriceId, "PriceId");

impl_generated_id!(BrandId, "brand");
impl_generated_id!(PriceSetId, "pset");
impl_generated_id!(PriceId, "price");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_carry_prefix_and_are_unique() {
        let a = BrandId::new();
        let b = BrandId::new();
        assert!(a.as_str().starts_with("brand_"));
        assert!(PriceSetId::new().as_str().starts_with("pset_"));
        assert!(PriceId::new().as_str().starts_with("price_"));
        assert_ne!(a, b);
    }

    #[test]
    fn parse_trims_and_rejects_blank() {
        let id: PriceListId = "  plist_01  ".parse().unwrap();
        assert_eq!(id.as_str(), "plist_01");

        let err = PriceListId::parse("   ").unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
    }

    #[test]
    fn serde_is_a_plain_string() {
        let id = BrandId::parse("brand_1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"brand_1\"");

        let back: BrandId = serde_json::from_str("\"brand_1\"").unwrap();
        assert_eq!(back, id);

        assert!(serde_json::from_str::<BrandId>("\"\"").is_err());
    }
}
