//! `pricebook-core`: domain building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, the domain error model, and boundary timestamp parsing.

pub mod entity;
pub mod error;
pub mod id;
pub mod time;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{BrandId, PriceId, PriceListId, PriceSetId, ProductId};
pub use time::{Timestamp, parse_optional_timestamp, parse_timestamp};
