use pricebook_brands::{Brand, CreateBrand};
use pricebook_core::BrandId;
use pricebook_events::{Step, StepResponse, WorkflowError, WorkflowRun};

use super::StepError;
use crate::store::{ModuleStore, insert_entity, remove_entity};

pub const CREATE_BRAND_WORKFLOW: &str = "create-brand";

/// Creates a brand; compensation deletes it again.
#[derive(Debug, Clone)]
pub struct CreateBrandStep<S> {
    store: S,
}

impl<S> CreateBrandStep<S>
where
    S: ModuleStore<BrandId, Brand>,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S> Step for CreateBrandStep<S>
where
    S: ModuleStore<BrandId, Brand>,
{
    const NAME: &'static str = "create-brand-step";

    type Input = CreateBrand;
    type Output = Brand;
    type CompensateInput = BrandId;
    type Error = StepError;

    fn invoke(&self, input: CreateBrand) -> Result<StepResponse<Brand, BrandId>, StepError> {
        let brand = Brand::create(BrandId::new(), &input)?;
        let id = insert_entity(&self.store, brand.clone())?;
        Ok(StepResponse::new(brand, id))
    }

    fn compensate(&self, id: BrandId) -> Result<(), StepError> {
        Ok(remove_entity::<Brand, _>(&self.store, &id)?)
    }
}

/// Run `create-brand` for `input`.
pub fn create_brand_workflow<S>(
    step: &CreateBrandStep<S>,
    input: CreateBrand,
) -> Result<Brand, WorkflowError>
where
    S: ModuleStore<BrandId, Brand>,
{
    let mut run = WorkflowRun::new(CREATE_BRAND_WORKFLOW);
    let brand = run.step(step, input)?;
    Ok(run.finish(brand))
}
