//! Resource extraction: turning evaluated instances into render plans.

use crate::engine::{ValidateOptions, ValidationFailure, Value, ValueError};
use crate::evaluate::Evaluated;
use thiserror::Error;

/// Field whose presence marks a value as a deployable resource.
pub const RESOURCE_MARKER: &str = "apiVersion";

/// Why an instance or a single candidate produced no resource.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// The instance as a whole could not be encoded to YAML.
    #[error("failed to encode instance to YAML: {0}")]
    Encode(ValueError),

    /// A resource candidate failed strict validation.
    #[error("invalid resource: {0}")]
    Validation(ValidationFailure),
}

/// One resource candidate, in walk order.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanEntry<'a> {
    /// The candidate passed validation and will be rendered.
    Resource(&'a Value),
    /// The candidate was dropped.
    Rejected(PlanError),
}

/// What a plan carries: its candidates, or the error that suppressed the
/// whole instance.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome<'a> {
    Entries(Vec<PlanEntry<'a>>),
    Failed(PlanError),
}

/// The renderable result of one instance.
///
/// A rejected candidate only drops itself; accepted resources before and
/// after it are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan<'a> {
    pub instance: String,
    outcome: PlanOutcome<'a>,
}

impl<'a> RenderPlan<'a> {
    fn new(instance: String) -> Self {
        Self {
            instance,
            outcome: PlanOutcome::Entries(Vec::new()),
        }
    }

    fn failed(instance: String, error: PlanError) -> Self {
        Self {
            instance,
            outcome: PlanOutcome::Failed(error),
        }
    }

    fn push(&mut self, entry: PlanEntry<'a>) {
        if let PlanOutcome::Entries(entries) = &mut self.outcome {
            entries.push(entry);
        }
    }

    pub fn outcome(&self) -> &PlanOutcome<'a> {
        &self.outcome
    }

    /// Accepted resources, in walk order.
    pub fn resources(&self) -> Vec<&'a Value> {
        match &self.outcome {
            PlanOutcome::Entries(entries) => entries
                .iter()
                .filter_map(|entry| match entry {
                    PlanEntry::Resource(value) => Some(*value),
                    PlanEntry::Rejected(_) => None,
                })
                .collect(),
            PlanOutcome::Failed(_) => Vec::new(),
        }
    }

    /// Every error on this plan: the instance failure, or each rejected
    /// candidate in walk order.
    pub fn errors(&self) -> Vec<&PlanError> {
        match &self.outcome {
            PlanOutcome::Entries(entries) => entries
                .iter()
                .filter_map(|entry| match entry {
                    PlanEntry::Rejected(error) => Some(error),
                    PlanEntry::Resource(_) => None,
                })
                .collect(),
            PlanOutcome::Failed(error) => vec![error],
        }
    }
}

/// Build one plan per instance that contains at least one resource
/// candidate, in instance order.
///
/// Each instance is walked depth-first. A value with an `apiVersion` field is
/// a candidate: it is validated strictly and the walk does not descend into
/// it. Instances whose encode check failed yield a failed plan without being
/// walked.
pub fn extract_plans(evaluated: &[Evaluated]) -> Vec<RenderPlan<'_>> {
    let options = ValidateOptions::strict();
    let mut plans = Vec::new();

    for item in evaluated {
        let instance = item.instance.name();
        if let Err(error) = &item.encode_check {
            plans.push(RenderPlan::failed(instance, PlanError::Encode(error.clone())));
            continue;
        }

        let mut plan: Option<RenderPlan<'_>> = None;
        item.instance.value.walk(&mut |node| {
            if !node.exists(RESOURCE_MARKER) {
                return true;
            }
            let plan = plan.get_or_insert_with(|| RenderPlan::new(instance.clone()));
            match node.validate(&options) {
                Ok(()) => plan.push(PlanEntry::Resource(node)),
                Err(failure) => plan.push(PlanEntry::Rejected(PlanError::Validation(failure))),
            }
            false
        });
        plans.extend(plan);
    }

    plans
}
