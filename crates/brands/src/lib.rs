//! Brands domain module.
//!
//! Brand creation rules and the brand/product link, as deterministic domain
//! logic (no IO, no storage).

pub mod brand;

pub use brand::{BRAND_NAME_MAX_LEN, Brand, CreateBrand, ProductRef};
