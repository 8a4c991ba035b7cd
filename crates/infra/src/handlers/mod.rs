//! Admin handlers.
//!
//! Plain functions over an [`AppContext`](crate::context::AppContext): the host
//! router owns HTTP and maps [`HandlerError::status_code`] onto the response.

pub mod brands;
pub mod error;
pub mod price_sets;

pub use brands::{
    BrandResponse, BrandsResponse, PostAdminCreateBrand, PostAdminLinkProduct, create_brand,
    link_product, list_brands, unlink_product,
};
pub use error::HandlerError;
pub use price_sets::{PriceSetResponse, create_price_set};
