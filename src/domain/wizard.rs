//! Multi-step application wizard.
//!
//! The wizard walks a draft through four sections. Moving forward validates
//! the section being left; moving back never fails. Its progress is expressed
//! as a [`StepSequence`], the same type the review workflow uses.

use super::application::NewApplication;
use super::loan::LoanType;
use super::money::Money;
use super::product::LoanProduct;
use super::progress::StepSequence;
use crate::error::{LoanError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const WIZARD_STEPS: [&str; 4] = ["Personal Info", "Loan Details", "Employment", "Documents"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    PersonalInfo,
    LoanDetails,
    Employment,
    Documents,
}

impl WizardStep {
    fn from_position(position: usize) -> Self {
        match position {
            1 => WizardStep::PersonalInfo,
            2 => WizardStep::LoanDetails,
            3 => WizardStep::Employment,
            _ => WizardStep::Documents,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WizardStep::PersonalInfo => WIZARD_STEPS[0],
            WizardStep::LoanDetails => WIZARD_STEPS[1],
            WizardStep::Employment => WIZARD_STEPS[2],
            WizardStep::Documents => WIZARD_STEPS[3],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: Option<NaiveDate>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl PersonalInfo {
    pub fn validate(&self) -> Result<()> {
        require("First name", &self.first_name)?;
        require("Last name", &self.last_name)?;
        require("Email", &self.email)?;
        require("Phone", &self.phone)?;
        if !self.email.contains('@') {
            return Err(LoanError::ValidationError(format!(
                "Email '{}' is not a valid address",
                self.email
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanDetails {
    pub loan_type: Option<LoanType>,
    pub amount: Option<Decimal>,
    pub term: Option<u32>,
    pub purpose: String,
}

impl LoanDetails {
    pub fn validate(&self) -> Result<()> {
        let loan_type = self
            .loan_type
            .ok_or_else(|| LoanError::ValidationError("Loan type is required".to_string()))?;
        let amount = self
            .amount
            .ok_or_else(|| LoanError::ValidationError("Loan amount is required".to_string()))?;
        let term = self
            .term
            .ok_or_else(|| LoanError::ValidationError("Loan term is required".to_string()))?;
        LoanProduct::for_type(loan_type).validate(amount, term)?;
        require("Loan purpose", &self.purpose)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentInfo {
    pub employment_status: String,
    pub employer_name: String,
    pub job_title: String,
    pub monthly_income: Decimal,
    pub employment_length: Decimal,
}

impl EmploymentInfo {
    pub fn validate(&self) -> Result<()> {
        require("Employment status", &self.employment_status)?;
        if self.monthly_income < Decimal::ZERO {
            return Err(LoanError::ValidationError(
                "Monthly income must not be negative".to_string(),
            ));
        }
        if self.employment_length < Decimal::ZERO {
            return Err(LoanError::ValidationError(
                "Years at current employer must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Everything collected by the wizard so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationDraft {
    pub personal: PersonalInfo,
    pub loan: LoanDetails,
    pub employment: EmploymentInfo,
    pub documents: Vec<String>,
}

impl ApplicationDraft {
    fn validate_section(&self, step: WizardStep) -> Result<()> {
        match step {
            WizardStep::PersonalInfo => self.personal.validate(),
            WizardStep::LoanDetails => self.loan.validate(),
            WizardStep::Employment => self.employment.validate(),
            WizardStep::Documents => {
                if self.documents.iter().any(|d| !d.trim().is_empty()) {
                    Ok(())
                } else {
                    Err(LoanError::ValidationError(
                        "At least one document is required".to_string(),
                    ))
                }
            }
        }
    }

    /// Validates every section and produces the application to file.
    pub fn finalize(&self) -> Result<NewApplication> {
        for position in 1..=WIZARD_STEPS.len() {
            self.validate_section(WizardStep::from_position(position))?;
        }

        // validate_section guarantees these are present
        let (Some(loan_type), Some(amount), Some(term)) =
            (self.loan.loan_type, self.loan.amount, self.loan.term)
        else {
            return Err(LoanError::ValidationError(
                "Loan details are incomplete".to_string(),
            ));
        };

        Ok(NewApplication {
            loan_type,
            amount: Money::new(amount),
            term,
            purpose: self.loan.purpose.trim().to_string(),
            documents: self
                .documents
                .iter()
                .map(|d| d.trim())
                .filter(|d| !d.is_empty())
                .map(str::to_string)
                .collect(),
        })
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(LoanError::ValidationError(format!("{field} is required")))
    } else {
        Ok(())
    }
}

/// Local state of the application wizard.
#[derive(Debug, Clone)]
pub struct ApplicationWizard {
    position: usize,
    draft: ApplicationDraft,
}

impl Default for ApplicationWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationWizard {
    pub fn new() -> Self {
        Self::with_draft(ApplicationDraft::default())
    }

    pub fn with_draft(draft: ApplicationDraft) -> Self {
        Self { position: 1, draft }
    }

    /// One-based position of the step being shown.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current(&self) -> WizardStep {
        WizardStep::from_position(self.position())
    }

    pub fn is_last_step(&self) -> bool {
        self.position() == WIZARD_STEPS.len()
    }

    pub fn draft(&self) -> &ApplicationDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ApplicationDraft {
        &mut self.draft
    }

    /// Validates the current section and moves to the next one.
    ///
    /// Stays on the last step once reached.
    pub fn next(&mut self) -> Result<WizardStep> {
        self.draft.validate_section(self.current())?;
        self.position = (self.position + 1).min(WIZARD_STEPS.len());
        Ok(self.current())
    }

    pub fn previous(&mut self) -> WizardStep {
        self.position = self.position.saturating_sub(1).max(1);
        self.current()
    }

    /// Steps before the current position are completed.
    pub fn progress(&self) -> StepSequence {
        StepSequence::with_prefix_completed(&WIZARD_STEPS, self.position() - 1)
    }

    pub fn submit(&self) -> Result<NewApplication> {
        if !self.is_last_step() {
            return Err(LoanError::ProgressError(format!(
                "Cannot submit from the '{}' step",
                self.current().name()
            )));
        }
        self.draft.finalize()
    }
}
