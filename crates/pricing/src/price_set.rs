use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use pricebook_core::{DomainError, DomainResult, Entity, PriceId, PriceSetId};

/// A single price inside a price set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub id: PriceId,
    /// Amount in the smallest currency unit (e.g. cents).
    pub amount: u64,
    /// ISO 4217 code, upper case.
    pub currency_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_quantity: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_quantity: Option<u64>,
    #[serde(default)]
    pub rules: BTreeMap<String, String>,
}

/// A set of prices (one product variant's prices across currencies and tiers).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSet {
    pub id: PriceSetId,
    pub prices: Vec<Price>,
}

impl Entity for PriceSet {
    type Id = PriceSetId;

    const KIND: &'static str = "price_set";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Input for one price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePrice {
    pub amount: u64,
    pub currency_code: String,
    #[serde(default)]
    pub min_quantity: Option<u64>,
    #[serde(default)]
    pub max_quantity: Option<u64>,
    #[serde(default)]
    pub rules: BTreeMap<String, String>,
}

impl CreatePrice {
    pub fn new(amount: u64, currency_code: impl Into<String>) -> Self {
        Self {
            amount,
            currency_code: currency_code.into(),
            min_quantity: None,
            max_quantity: None,
            rules: BTreeMap::new(),
        }
    }

    pub fn with_quantity_range(mut self, min: u64, max: u64) -> Self {
        self.min_quantity = Some(min);
        self.max_quantity = Some(max);
        self
    }

    fn normalized_currency(&self) -> DomainResult<String> {
        let code = self.currency_code.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::validation(format!(
                "currency_code must be three letters, got {:?}",
                self.currency_code
            )));
        }
        Ok(code.to_ascii_uppercase())
    }

    fn validate(&self) -> DomainResult<()> {
        self.normalized_currency()?;
        if let (Some(min), Some(max)) = (self.min_quantity, self.max_quantity) {
            if min > max {
                return Err(DomainError::validation(format!(
                    "min_quantity ({min}) exceeds max_quantity ({max})"
                )));
            }
        }
        Ok(())
    }
}

/// Input for a new price set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreatePriceSet {
    pub prices: Vec<CreatePrice>,
}

impl CreatePriceSet {
    /// The price set created by the daily job and the `user.created` subscriber:
    /// 5.00 USD, and 4.00 EUR for quantities 0..=4.
    pub fn daily_default() -> Self {
        Self {
            prices: vec![
                CreatePrice::new(500, "USD"),
                CreatePrice::new(400, "EUR").with_quantity_range(0, 4),
            ],
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.prices.is_empty() {
            return Err(DomainError::validation("a price set needs at least one price"));
        }
        self.prices.iter().try_for_each(CreatePrice::validate)
    }
}

impl PriceSet {
    /// Validate `input` and build the set, minting price ids.
    pub fn create(id: PriceSetId, input: CreatePriceSet) -> DomainResult<Self> {
        input.validate()?;
        let prices = input
            .prices
            .into_iter()
            .map(|p| {
                Ok(Price {
                    id: PriceId::new(),
                    currency_code: p.normalized_currency()?,
                    amount: p.amount,
                    min_quantity: p.min_quantity,
                    max_quantity: p.max_quantity,
                    rules: p.rules,
                })
            })
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Self { id, prices })
    }
}
