use serde::Serialize;
use tracing::info;

use pricebook_pricing::{CreatePriceSet, PriceSet};

use super::error::HandlerError;
use crate::context::AppContext;
use crate::workflows::{CreatePriceSetStep, create_price_set_workflow};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceSetResponse {
    pub price_set: PriceSet,
}

/// `POST /admin/price-sets`: creates the default price set.
pub fn create_price_set(ctx: &AppContext) -> Result<PriceSetResponse, HandlerError> {
    let step = CreatePriceSetStep::new(ctx.price_sets().clone());
    let result = create_price_set_workflow(&step, CreatePriceSet::daily_default())?;
    info!(price_set_id = %result.price_set.id, "price set created via admin");
    Ok(PriceSetResponse {
        price_set: result.price_set,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::ModuleStore;

    #[test]
    fn creates_default_price_set() {
        let ctx = AppContext::in_memory(Config::default());
        let response = create_price_set(&ctx).unwrap();

        let json = serde_json::to_value(&response).unwrap();
        let prices = json["price_set"]["prices"].as_array().unwrap();
        assert_eq!(prices.len(), 2);
        assert_eq!(prices[0]["amount"], 500);
        assert_eq!(prices[1]["currency_code"], "EUR");
        assert_eq!(ctx.price_sets().list().unwrap().len(), 1);
    }
}
