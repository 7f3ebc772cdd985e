//! Ordered progress steps and the derived "current step".
//!
//! A step sequence only moves forward: the first pending step is the current
//! one, completing it advances the sequence, and nothing un-completes a step.
//! Progress is presentational; it is independent of the application status.

use crate::error::{LoanError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const REVIEW_STEPS: [&str; 5] = [
    "Application Submitted",
    "Document Verification",
    "Credit Check",
    "Final Approval",
    "Loan Disbursement",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: String,
    pub name: String,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl Step {
    pub fn pending(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            completed: false,
            date: None,
        }
    }

    pub fn completed_on(id: impl Into<String>, name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            completed: true,
            date: Some(date),
        }
    }
}

/// Index of the first pending step.
///
/// `None` when every step is completed, including the empty sequence.
pub fn current_step(steps: &[Step]) -> Option<usize> {
    steps.iter().position(|step| !step.completed)
}

/// Completed share of the sequence as a percentage with two decimals.
///
/// Position-based: the current step index over the sequence length. A sequence
/// with no current step (complete or empty) reports 100.
pub fn progress_percent(steps: &[Step]) -> Decimal {
    match current_step(steps) {
        Some(index) => {
            let total = Decimal::from(steps.len() as u64);
            (Decimal::from(index as u64) * dec!(100) / total).round_dp(2)
        }
        None => dec!(100),
    }
}

/// A validated, forward-only sequence of steps.
///
/// Ids are unique and completed steps always form a prefix of the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Step>", into = "Vec<Step>")]
pub struct StepSequence {
    steps: Vec<Step>,
}

impl StepSequence {
    pub fn new(steps: Vec<Step>) -> Result<Self> {
        let mut seen = HashSet::new();
        for step in &steps {
            if !seen.insert(step.id.as_str()) {
                return Err(LoanError::ValidationError(format!(
                    "Duplicate step id '{}'",
                    step.id
                )));
            }
        }

        let first_pending = current_step(&steps).unwrap_or(steps.len());
        if let Some(step) = steps[first_pending..].iter().find(|s| s.completed) {
            return Err(LoanError::ProgressError(format!(
                "Step '{}' is completed before an earlier pending step",
                step.name
            )));
        }

        Ok(Self { steps })
    }

    /// The loan review workflow for an application submitted on `submitted_on`.
    pub fn review_workflow(submitted_on: NaiveDate) -> Self {
        Self::review_workflow_completed_on(&[submitted_on])
    }

    /// The review workflow with its leading steps completed on `dates`, in
    /// order. Dates beyond the last step are ignored.
    pub fn review_workflow_completed_on(dates: &[NaiveDate]) -> Self {
        let steps = REVIEW_STEPS
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let id = (i + 1).to_string();
                match dates.get(i) {
                    Some(date) => Step::completed_on(id, *name, *date),
                    None => Step::pending(id, *name),
                }
            })
            .collect();
        Self { steps }
    }

    /// Builds a sequence whose first `completed` entries are done.
    pub(crate) fn with_prefix_completed(names: &[&str], completed: usize) -> Self {
        let steps = names
            .iter()
            .enumerate()
            .map(|(i, name)| Step {
                id: (i + 1).to_string(),
                name: (*name).to_string(),
                completed: i < completed,
                date: None,
            })
            .collect();
        Self { steps }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn current(&self) -> Option<usize> {
        current_step(&self.steps)
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.current().map(|i| &self.steps[i])
    }

    pub fn is_complete(&self) -> bool {
        self.current().is_none()
    }

    pub fn completed_count(&self) -> usize {
        self.current().unwrap_or(self.steps.len())
    }

    pub fn progress_percent(&self) -> Decimal {
        progress_percent(&self.steps)
    }

    /// Completes the current step on `date` and returns it.
    pub fn advance(&mut self, date: NaiveDate) -> Result<&Step> {
        let index = self.current().ok_or_else(|| {
            LoanError::ProgressError("All steps are already completed".to_string())
        })?;
        let step = &mut self.steps[index];
        step.completed = true;
        step.date = Some(date);
        Ok(step)
    }

    /// Completes the step with the given id, which must be the current step.
    pub fn complete(&mut self, id: &str, date: NaiveDate) -> Result<()> {
        let index = self
            .steps
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| LoanError::NotFound(format!("Step '{id}'")))?;

        match self.current() {
            Some(current) if current == index => {
                self.advance(date)?;
                Ok(())
            }
            Some(_) if self.steps[index].completed => Err(LoanError::ProgressError(format!(
                "Step '{}' is already completed",
                self.steps[index].name
            ))),
            Some(current) => Err(LoanError::ProgressError(format!(
                "Step '{}' cannot be completed before '{}'",
                self.steps[index].name, self.steps[current].name
            ))),
            None => Err(LoanError::ProgressError(format!(
                "Step '{}' is already completed",
                self.steps[index].name
            ))),
        }
    }
}

impl TryFrom<Vec<Step>> for StepSequence {
    type Error = LoanError;

    fn try_from(steps: Vec<Step>) -> Result<Self> {
        Self::new(steps)
    }
}

impl From<StepSequence> for Vec<Step> {
    fn from(sequence: StepSequence) -> Self {
        sequence.steps
    }
}
