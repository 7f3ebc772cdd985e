use super::loan::{LoanStatus, LoanType};
use super::money::Money;
use super::progress::StepSequence;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub enum DocumentStatus {
    Pending,
    #[serde(rename = "Under Review")]
    UnderReview,
    Verified,
    Rejected,
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DocumentStatus::Pending => "Pending",
            DocumentStatus::UnderReview => "Under Review",
            DocumentStatus::Verified => "Verified",
            DocumentStatus::Rejected => "Rejected",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Document {
    pub id: String,
    pub name: String,
    pub status: DocumentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A validated application, ready to be filed.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct NewApplication {
    pub loan_type: LoanType,
    pub amount: Money,
    pub term: u32,
    pub purpose: String,
    pub documents: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplication {
    pub id: String,
    #[serde(rename = "type")]
    pub loan_type: LoanType,
    pub amount: Money,
    pub term: u32,
    pub purpose: String,
    pub status: LoanStatus,
    pub submission_date: NaiveDate,
    pub documents: Vec<Document>,
    pub steps: StepSequence,
}

impl LoanApplication {
    /// Files a new application: status `Submitted`, documents pending review,
    /// and the review workflow with its first step completed on `submitted_on`.
    pub fn submit(id: String, application: NewApplication, submitted_on: NaiveDate) -> Self {
        let documents = application
            .documents
            .into_iter()
            .enumerate()
            .map(|(i, name)| Document {
                id: (i + 1).to_string(),
                name,
                status: DocumentStatus::Pending,
                url: None,
            })
            .collect();

        Self {
            id,
            loan_type: application.loan_type,
            amount: application.amount,
            term: application.term,
            purpose: application.purpose,
            status: LoanStatus::Submitted,
            submission_date: submitted_on,
            documents,
            steps: StepSequence::review_workflow(submitted_on),
        }
    }

    /// Still awaiting a decision.
    pub fn is_pending(&self) -> bool {
        !matches!(self.status, LoanStatus::Approved | LoanStatus::Rejected)
    }

    pub fn current_step_name(&self) -> Option<&str> {
        self.steps.current_step().map(|s| s.name.as_str())
    }

    pub fn progress_percent(&self) -> Decimal {
        self.steps.progress_percent()
    }
}
