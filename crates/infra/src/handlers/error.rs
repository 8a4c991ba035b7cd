use serde_json::{Value as JsonValue, json};
use thiserror::Error;

use pricebook_core::DomainError;
use pricebook_events::WorkflowError;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum HandlerError {
    /// The request body was not valid JSON for the expected shape.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),
}

impl HandlerError {
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::InvalidBody(_) => 400,
            HandlerError::Domain(DomainError::NotFound(_)) => 404,
            HandlerError::Domain(DomainError::Conflict(_)) => 409,
            HandlerError::Domain(_) => 400,
            HandlerError::Store(StoreError::NotFound(_)) => 404,
            HandlerError::Store(StoreError::Duplicate(_)) => 409,
            HandlerError::Store(StoreError::Poisoned) | HandlerError::Workflow(_) => 500,
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            HandlerError::InvalidBody(_) => "invalid_body",
            HandlerError::Domain(DomainError::Validation(_)) => "validation_error",
            HandlerError::Domain(DomainError::InvalidId(_)) => "invalid_id",
            HandlerError::Domain(DomainError::InvariantViolation(_)) => "invariant_violation",
            HandlerError::Domain(DomainError::NotFound(_)) | HandlerError::Store(StoreError::NotFound(_)) => {
                "not_found"
            }
            HandlerError::Domain(DomainError::Conflict(_))
            | HandlerError::Store(StoreError::Duplicate(_)) => "conflict",
            HandlerError::Store(StoreError::Poisoned) => "store_error",
            HandlerError::Workflow(_) => "workflow_error",
        }
    }

    /// `{"error": code, "message": ...}` body for the host router.
    pub fn to_json(&self) -> JsonValue {
        json!({
            "error": self.code(),
            "message": self.to_string(),
        })
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(e: serde_json::Error) -> Self {
        HandlerError::InvalidBody(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        let cases = [
            (HandlerError::InvalidBody("x".into()), 400),
            (DomainError::validation("x").into(), 400),
            (DomainError::not_found("brand brand_1").into(), 404),
            (DomainError::conflict("x").into(), 409),
            (StoreError::Duplicate("k".into()).into(), 409),
            (StoreError::Poisoned.into(), 500),
            (
                WorkflowError::Aborted {
                    workflow: "create-brand".into(),
                    reason: "boom".into(),
                    compensation_failures: Vec::new(),
                }
                .into(),
                500,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_code(), status, "{err}");
        }
    }

    #[test]
    fn json_body_carries_code_and_message() {
        let err = HandlerError::from(DomainError::validation("name cannot be empty"));
        let body = err.to_json();
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["message"], "validation failed: name cannot be empty");
    }
}
