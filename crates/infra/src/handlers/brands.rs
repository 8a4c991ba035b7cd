use serde::{Deserialize, Serialize};
use tracing::info;

use pricebook_brands::{Brand, CreateBrand, ProductRef};
use pricebook_core::{BrandId, DomainError, ProductId};

use super::error::HandlerError;
use crate::context::AppContext;
use crate::store::{ModuleStore, update_entity};
use crate::workflows::{CreateBrandStep, create_brand_workflow};

/// Body of `POST /admin/brands`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostAdminCreateBrand {
    pub name: String,
}

/// Body of `POST /admin/brands/{id}/products`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostAdminLinkProduct {
    pub product_id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandsResponse {
    pub brands: Vec<Brand>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandResponse {
    pub brand: Brand,
}

/// `GET /admin/brands`: every brand with its products.
pub fn list_brands(ctx: &AppContext) -> Result<BrandsResponse, HandlerError> {
    let brands = ctx.brands().list()?;
    Ok(BrandsResponse { brands })
}

/// `POST /admin/brands`.
pub fn create_brand(ctx: &AppContext, body: &str) -> Result<BrandResponse, HandlerError> {
    let request: PostAdminCreateBrand = serde_json::from_str(body)?;
    let input = CreateBrand::new(request.name);
    input.normalized_name()?;

    let step = CreateBrandStep::new(ctx.brands().clone());
    let brand = create_brand_workflow(&step, input)?;
    info!(brand_id = %brand.id_typed(), "brand created via admin");
    Ok(BrandResponse { brand })
}

/// `POST /admin/brands/{id}/products`: link a product to an existing brand.
pub fn link_product(
    ctx: &AppContext,
    brand_id: &str,
    body: &str,
) -> Result<BrandResponse, HandlerError> {
    let request: PostAdminLinkProduct = serde_json::from_str(body)?;
    let product = ProductRef {
        id: ProductId::parse(&request.product_id)?,
        title: request.title.trim().to_string(),
    };

    let mut brand = load_brand(ctx, brand_id)?;
    let product_id = product.id.clone();
    brand.link_product(product)?;
    update_entity(ctx.brands(), brand.clone())?;
    info!(brand_id = %brand.id_typed(), product_id = %product_id, "product linked to brand");
    Ok(BrandResponse { brand })
}

/// `DELETE /admin/brands/{id}/products/{product_id}`.
pub fn unlink_product(
    ctx: &AppContext,
    brand_id: &str,
    product_id: &str,
) -> Result<BrandResponse, HandlerError> {
    let product_id = ProductId::parse(product_id)?;
    let mut brand = load_brand(ctx, brand_id)?;
    brand.unlink_product(&product_id)?;
    update_entity(ctx.brands(), brand.clone())?;
    info!(brand_id = %brand.id_typed(), product_id = %product_id, "product unlinked from brand");
    Ok(BrandResponse { brand })
}

fn load_brand(ctx: &AppContext, brand_id: &str) -> Result<Brand, HandlerError> {
    let id = BrandId::parse(brand_id)?;
    ctx.brands()
        .get(&id)?
        .ok_or_else(|| DomainError::not_found(format!("brand {id}")).into())
}
