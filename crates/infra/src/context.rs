use std::sync::Arc;

use pricebook_brands::Brand;
use pricebook_core::{BrandId, PriceSetId};
use pricebook_pricing::PriceSet;

use crate::config::Config;
use crate::store::{BrandStore, InMemoryModuleStore, PriceSetStore};

/// Everything handlers, jobs and subscribers resolve their collaborators from.
#[derive(Clone)]
pub struct AppContext {
    config: Config,
    brands: Arc<BrandStore>,
    price_sets: Arc<PriceSetStore>,
}

impl AppContext {
    pub fn new(config: Config, brands: Arc<BrandStore>, price_sets: Arc<PriceSetStore>) -> Self {
        Self {
            config,
            brands,
            price_sets,
        }
    }

    /// Context backed by fresh in-memory stores (tests/dev).
    pub fn in_memory(config: Config) -> Self {
        Self::new(
            config,
            Arc::new(InMemoryModuleStore::<BrandId, Brand>::new()),
            Arc::new(InMemoryModuleStore::<PriceSetId, PriceSet>::new()),
        )
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn brands(&self) -> &Arc<BrandStore> {
        &self.brands
    }

    pub fn price_sets(&self) -> &Arc<PriceSetStore> {
        &self.price_sets
    }
}

impl core::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
