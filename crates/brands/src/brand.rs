use serde::{Deserialize, Serialize};

use pricebook_core::{BrandId, DomainError, DomainResult, Entity, ProductId};

pub const BRAND_NAME_MAX_LEN: usize = 255;

/// Product linked to a brand (only what list views need).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRef {
    pub id: ProductId,
    pub title: String,
}

/// Input for a new brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBrand {
    pub name: String,
}

impl CreateBrand {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Trimmed, validated name.
    pub fn normalized_name(&self) -> DomainResult<String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if name.chars().count() > BRAND_NAME_MAX_LEN {
            return Err(DomainError::validation(format!(
                "name cannot be longer than {BRAND_NAME_MAX_LEN} characters"
            )));
        }
        Ok(name.to_string())
    }
}

/// A brand and the products linked to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    id: BrandId,
    name: String,
    #[serde(default)]
    products: Vec<ProductRef>,
}

impl Brand {
    pub fn create(id: BrandId, input: &CreateBrand) -> DomainResult<Self> {
        Ok(Self {
            id,
            name: input.normalized_name()?,
            products: Vec::new(),
        })
    }

    pub fn id_typed(&self) -> &BrandId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn products(&self) -> &[ProductRef] {
        &self.products
    }

    /// Link a product; linking the same product twice is a conflict.
    pub fn link_product(&mut self, product: ProductRef) -> DomainResult<()> {
        if self.products.iter().any(|p| p.id == product.id) {
            return Err(DomainError::conflict(format!(
                "product {} already linked to brand {}",
                product.id, self.id
            )));
        }
        self.products.push(product);
        Ok(())
    }

    pub fn unlink_product(&mut self, product_id: &ProductId) -> DomainResult<ProductRef> {
        let index = self
            .products
            .iter()
            .position(|p| &p.id == product_id)
            .ok_or_else(|| {
                DomainError::not_found(format!("product {product_id} on brand {}", self.id))
            })?;
        Ok(self.products.remove(index))
    }
}

impl Entity for Brand {
    type Id = BrandId;

    const KIND: &'static str = "brand";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str) -> ProductRef {
        ProductRef {
            id: ProductId::parse(id).unwrap(),
            title: format!("Product {id}"),
        }
    }

    #[test]
    fn create_trims_name() {
        let brand = Brand::create(BrandId::new(), &CreateBrand::new("  Acme ")).unwrap();
        assert_eq!(brand.name(), "Acme");
        assert!(brand.products().is_empty());
    }

    #[test]
    fn create_rejects_blank_name() {
        let err = Brand::create(BrandId::new(), &CreateBrand::new("   ")).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn create_rejects_overlong_name() {
        let long = "x".repeat(BRAND_NAME_MAX_LEN + 1);
        assert!(Brand::create(BrandId::new(), &CreateBrand::new(long)).is_err());

        let exact = "я".repeat(BRAND_NAME_MAX_LEN);
        assert!(Brand::create(BrandId::new(), &CreateBrand::new(exact)).is_ok());
    }

    #[test]
    fn linking_is_ordered_and_rejects_duplicates() {
        let mut brand = Brand::create(BrandId::new(), &CreateBrand::new("Acme")).unwrap();
        brand.link_product(product("prod_1")).unwrap();
        brand.link_product(product("prod_2")).unwrap();

        let err = brand.link_product(product("prod_1")).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let ids: Vec<&str> = brand.products().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["prod_1", "prod_2"]);
    }

    #[test]
    fn unlink_missing_product_is_not_found() {
        let mut brand = Brand::create(BrandId::new(), &CreateBrand::new("Acme")).unwrap();
        brand.link_product(product("prod_1")).unwrap();

        let removed = brand.unlink_product(&ProductId::parse("prod_1").unwrap()).unwrap();
        assert_eq!(removed.title, "Product prod_1");
        let err = brand
            .unlink_product(&ProductId::parse("prod_1").unwrap())
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(ref what) if what.starts_with("product prod_1")));
    }

    #[test]
    fn serializes_with_products() {
        let id = BrandId::parse("brand_1").unwrap();
        let mut brand = Brand::create(id, &CreateBrand::new("Acme")).unwrap();
        brand.link_product(product("prod_1")).unwrap();

        let json = serde_json::to_value(&brand).unwrap();
        assert_eq!(json["id"], "brand_1");
        assert_eq!(json["name"], "Acme");
        assert_eq!(json["products"][0]["id"], "prod_1");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: any name with visible characters survives creation trimmed.
            #[test]
            fn valid_names_round_trip_trimmed(
                name in "[A-Za-z0-9][A-Za-z0-9 &'-]{0,60}",
                pad in " {0,4}",
            ) {
                let padded = format!("{pad}{name}{pad}");
                let brand = Brand::create(BrandId::new(), &CreateBrand::new(padded)).unwrap();
                prop_assert_eq!(brand.name(), name.trim());
            }
        }
    }
}
