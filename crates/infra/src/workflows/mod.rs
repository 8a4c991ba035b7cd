//! Workflows: forward steps paired with compensating deletes.
//!
//! Each workflow here is a single step; [`pricebook_events::WorkflowRun`]
//! runs it and undoes it if a later step in the same run fails.

pub mod create_brand;
pub mod create_price_set;

pub use create_brand::{CREATE_BRAND_WORKFLOW, CreateBrandStep, create_brand_workflow};
pub use create_price_set::{
    CREATE_PRICE_SET_WORKFLOW, CreatePriceSetResult, CreatePriceSetStep, create_price_set_workflow,
};

use thiserror::Error;

use pricebook_core::DomainError;

use crate::store::StoreError;

/// Failure inside a step (surfaced through `WorkflowError::StepFailed`).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StepError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
