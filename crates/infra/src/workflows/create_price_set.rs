use serde::Serialize;

use pricebook_core::PriceSetId;
use pricebook_events::{Step, StepResponse, WorkflowError, WorkflowRun};
use pricebook_pricing::{CreatePriceSet, PriceSet};

use super::StepError;
use crate::store::{ModuleStore, insert_entity, remove_entity};

pub const CREATE_PRICE_SET_WORKFLOW: &str = "create-price-set";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatePriceSetResult {
    pub price_set: PriceSet,
}

/// Creates a price set; compensation deletes it again.
#[derive(Debug, Clone)]
pub struct CreatePriceSetStep<S> {
    store: S,
}

impl<S> CreatePriceSetStep<S>
where
    S: ModuleStore<PriceSetId, PriceSet>,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S> Step for CreatePriceSetStep<S>
where
    S: ModuleStore<PriceSetId, PriceSet>,
{
    const NAME: &'static str = "create-price-set";

    type Input = CreatePriceSet;
    type Output = CreatePriceSetResult;
    type CompensateInput = PriceSetId;
    type Error = StepError;

    fn invoke(
        &self,
        input: CreatePriceSet,
    ) -> Result<StepResponse<CreatePriceSetResult, PriceSetId>, StepError> {
        let price_set = PriceSet::create(PriceSetId::new(), input)?;
        let id = insert_entity(&self.store, price_set.clone())?;
        Ok(StepResponse::new(CreatePriceSetResult { price_set }, id))
    }

    fn compensate(&self, id: PriceSetId) -> Result<(), StepError> {
        Ok(remove_entity::<PriceSet, _>(&self.store, &id)?)
    }
}

/// Run `create-price-set` for `input` (usually [`CreatePriceSet::daily_default`]).
pub fn create_price_set_workflow<S>(
    step: &CreatePriceSetStep<S>,
    input: CreatePriceSet,
) -> Result<CreatePriceSetResult, WorkflowError>
where
    S: ModuleStore<PriceSetId, PriceSet>,
{
    let mut run = WorkflowRun::new(CREATE_PRICE_SET_WORKFLOW);
    let result = run.step(step, input)?;
    Ok(run.finish(result))
}
