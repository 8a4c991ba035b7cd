//! Workflow step mechanics (framework only, no business rules).
//!
//! - A [`Step`] pairs a forward `invoke` with a `compensate` that undoes it
//! - `invoke` returns the step output plus the input its compensation needs
//!   (usually the id of whatever was created)
//! - [`WorkflowRun`] runs steps in order and, on the first failure, runs the
//!   recorded compensations in reverse order
//! - a failed run refuses further steps, and a run dropped before
//!   [`WorkflowRun::finish`] rolls back like [`WorkflowRun::abort`]
//!
//! `WorkflowRun` is deliberately thin: synchronous, in-process, no retries and no
//! persisted progress. A durable orchestrator can drive the same `Step`s.

use thiserror::Error;
use tracing::{debug, info, warn};

/// What a step hands back: its output, and what its compensation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResponse<O, C> {
    output: O,
    compensate_input: Option<C>,
}

impl<O, C> StepResponse<O, C> {
    /// Output plus the input to feed `compensate` if a later step fails.
    pub fn new(output: O, compensate_input: C) -> Self {
        Self {
            output,
            compensate_input: Some(compensate_input),
        }
    }

    /// Output with nothing to undo; compensation is skipped.
    pub fn without_compensation(output: O) -> Self {
        Self {
            output,
            compensate_input: None,
        }
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn compensate_input(&self) -> Option<&C> {
        self.compensate_input.as_ref()
    }

    pub fn into_parts(self) -> (O, Option<C>) {
        (self.output, self.compensate_input)
    }
}

/// One unit of work with a paired undo.
///
/// Implementations hold their collaborators (stores, clients) and must not keep
/// per-run state; the same step value may be invoked by many runs.
pub trait Step {
    /// Stable step name (e.g. "create-brand-step"), used in logs and errors.
    const NAME: &'static str;

    type Input;
    type Output;
    type CompensateInput;
    type Error: core::fmt::Display;

    fn invoke(
        &self,
        input: Self::Input,
    ) -> Result<StepResponse<Self::Output, Self::CompensateInput>, Self::Error>;

    fn compensate(&self, input: Self::CompensateInput) -> Result<(), Self::Error>;
}

/// A compensation that itself failed during rollback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompensationFailure {
    pub step: String,
    pub reason: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    /// A step's `invoke` failed; earlier steps were compensated.
    #[error("workflow `{workflow}` failed at step `{step}`: {reason}")]
    StepFailed {
        workflow: String,
        step: String,
        reason: String,
        compensation_failures: Vec<CompensationFailure>,
    },

    /// The workflow body failed between steps; completed steps were compensated.
    #[error("workflow `{workflow}` aborted: {reason}")]
    Aborted {
        workflow: String,
        reason: String,
        compensation_failures: Vec<CompensationFailure>,
    },

    /// A step was offered to a run that had already failed; it was not invoked.
    #[error("workflow `{workflow}` already failed at step `{failed_step}`; `{step}` not run")]
    AlreadyFailed {
        workflow: String,
        failed_step: String,
        step: String,
    },
}

impl WorkflowError {
    pub fn workflow(&self) -> &str {
        match self {
            WorkflowError::StepFailed { workflow, .. }
            | WorkflowError::Aborted { workflow, .. }
            | WorkflowError::AlreadyFailed { workflow, .. } => workflow,
        }
    }

    /// Compensations that failed while rolling back (empty on a clean rollback).
    pub fn compensation_failures(&self) -> &[CompensationFailure] {
        match self {
            WorkflowError::StepFailed {
                compensation_failures,
                ..
            }
            | WorkflowError::Aborted {
                compensation_failures,
                ..
            } => compensation_failures,
            WorkflowError::AlreadyFailed { .. } => &[],
        }
    }
}

type Compensation<'a> = Box<dyn FnOnce() -> Result<(), String> + 'a>;

/// A single in-flight run of a workflow.
///
/// End every run with [`finish`](Self::finish) or [`abort`](Self::abort). Once a
/// step has failed the run is spent: later `step` calls return
/// [`WorkflowError::AlreadyFailed`] without invoking anything. Dropping a run that
/// still holds compensations (say, after `?` on a non-workflow error) rolls them
/// back.
///
/// ```ignore
/// let mut run = WorkflowRun::new("create-brand");
/// let brand = run.step(&create_brand_step, input)?;
/// Ok(run.finish(brand))
/// ```
pub struct WorkflowRun<'a> {
    workflow: &'static str,
    compensations: Vec<(&'static str, Compensation<'a>)>,
    failed_at: Option<&'static str>,
}

impl<'a> WorkflowRun<'a> {
    pub fn new(workflow: &'static str) -> Self {
        debug!(workflow, "workflow started");
        Self {
            workflow,
            compensations: Vec::new(),
            failed_at: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.workflow
    }

    /// Number of completed steps that registered a compensation.
    pub fn pending_compensations(&self) -> usize {
        self.compensations.len()
    }

    /// Step that failed this run, if any.
    pub fn failed_at(&self) -> Option<&'static str> {
        self.failed_at
    }

    /// Invoke a step. On failure every previously recorded compensation runs
    /// (newest first) before the error is returned.
    pub fn step<S>(&mut self, step: &'a S, input: S::Input) -> Result<S::Output, WorkflowError>
    where
        S: Step,
        S::CompensateInput: 'a,
    {
        if let Some(failed_step) = self.failed_at {
            warn!(
                workflow = self.workflow,
                step = S::NAME,
                failed_step,
                "step offered to a failed run"
            );
            return Err(WorkflowError::AlreadyFailed {
                workflow: self.workflow.to_string(),
                failed_step: failed_step.to_string(),
                step: S::NAME.to_string(),
            });
        }

        match step.invoke(input) {
            Ok(response) => {
                let (output, compensate_input) = response.into_parts();
                debug!(workflow = self.workflow, step = S::NAME, "step completed");
                if let Some(compensate_input) = compensate_input {
                    self.compensations.push((
                        S::NAME,
                        Box::new(move || step.compensate(compensate_input).map_err(|e| e.to_string())),
                    ));
                }
                Ok(output)
            }
            Err(e) => {
                let reason = e.to_string();
                warn!(workflow = self.workflow, step = S::NAME, %reason, "step failed");
                self.failed_at = Some(S::NAME);
                let compensation_failures = self.rollback();
                Err(WorkflowError::StepFailed {
                    workflow: self.workflow.to_string(),
                    step: S::NAME.to_string(),
                    reason,
                    compensation_failures,
                })
            }
        }
    }

    /// Fail the run from outside a step (e.g. a check on step output).
    pub fn abort(mut self, reason: impl Into<String>) -> WorkflowError {
        let reason = reason.into();
        warn!(workflow = self.workflow, %reason, "workflow aborted");
        let compensation_failures = self.rollback();
        WorkflowError::Aborted {
            workflow: self.workflow.to_string(),
            reason,
            compensation_failures,
        }
    }

    /// Complete the run; recorded compensations are discarded.
    pub fn finish<T>(mut self, output: T) -> T {
        info!(
            workflow = self.workflow,
            steps = self.compensations.len(),
            "workflow completed"
        );
        self.compensations.clear();
        output
    }

    fn rollback(&mut self) -> Vec<CompensationFailure> {
        let mut failures = Vec::new();
        while let Some((step, compensation)) = self.compensations.pop() {
            match compensation() {
                Ok(()) => info!(workflow = self.workflow, step, "step compensated"),
                Err(reason) => {
                    warn!(workflow = self.workflow, step, %reason, "compensation failed");
                    failures.push(CompensationFailure {
                        step: step.to_string(),
                        reason,
                    });
                }
            }
        }
        failures
    }
}

impl Drop for WorkflowRun<'_> {
    fn drop(&mut self) {
        if self.compensations.is_empty() {
            return;
        }
        warn!(
            workflow = self.workflow,
            pending = self.compensations.len(),
            "workflow run dropped unfinished, rolling back"
        );
        self.rollback();
    }
}
