use super::money::Money;
use crate::error::{LoanError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy)]
pub enum LoanType {
    #[serde(rename = "Personal Loan", alias = "personal", alias = "Personal")]
    Personal,
    #[serde(rename = "Home Loan", alias = "home", alias = "Home")]
    Home,
    #[serde(rename = "Auto Loan", alias = "auto", alias = "Auto")]
    Auto,
    #[serde(rename = "Education Loan", alias = "education", alias = "Education")]
    Education,
    #[serde(rename = "Business Loan", alias = "business", alias = "Business")]
    Business,
}

impl LoanType {
    pub const ALL: [LoanType; 5] = [
        LoanType::Personal,
        LoanType::Home,
        LoanType::Auto,
        LoanType::Education,
        LoanType::Business,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            LoanType::Personal => "Personal Loan",
            LoanType::Home => "Home Loan",
            LoanType::Auto => "Auto Loan",
            LoanType::Education => "Education Loan",
            LoanType::Business => "Business Loan",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            LoanType::Personal => "personal",
            LoanType::Home => "home",
            LoanType::Auto => "auto",
            LoanType::Education => "education",
            LoanType::Business => "business",
        }
    }
}

impl fmt::Display for LoanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Accepts either the short key (`auto`) or the display name (`Auto Loan`).
impl FromStr for LoanType {
    type Err = LoanError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        LoanType::ALL
            .into_iter()
            .find(|t| {
                t.key().eq_ignore_ascii_case(wanted)
                    || t.display_name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| LoanError::ValidationError(format!("Unknown loan type '{wanted}'")))
    }
}

/// Lifecycle of an application and the loan it becomes.
///
/// Driven externally; it is not derived from the review steps.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub enum LoanStatus {
    Submitted,
    #[serde(rename = "Under Review")]
    UnderReview,
    Approved,
    Rejected,
    Active,
    Closed,
}

impl LoanStatus {
    /// Submitted → Under Review → Approved/Rejected, Approved → Active → Closed.
    pub fn can_transition_to(&self, next: LoanStatus) -> bool {
        use LoanStatus::*;
        matches!(
            (self, next),
            (Submitted, UnderReview)
                | (UnderReview, Approved)
                | (UnderReview, Rejected)
                | (Approved, Active)
                | (Active, Closed)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Submitted => "Submitted",
            LoanStatus::UnderReview => "Under Review",
            LoanStatus::Approved => "Approved",
            LoanStatus::Rejected => "Rejected",
            LoanStatus::Active => "Active",
            LoanStatus::Closed => "Closed",
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoanStatus {
    type Err = LoanError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted: String = s.chars().filter(|c| !matches!(c, ' ' | '-' | '_')).collect();
        [
            LoanStatus::Submitted,
            LoanStatus::UnderReview,
            LoanStatus::Approved,
            LoanStatus::Rejected,
            LoanStatus::Active,
            LoanStatus::Closed,
        ]
        .into_iter()
        .find(|status| status.as_str().replace(' ', "").eq_ignore_ascii_case(&wanted))
        .ok_or_else(|| LoanError::ValidationError(format!("Unknown loan status '{s}'")))
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub enum PaymentStatus {
    Paid,
    Upcoming,
    Overdue,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Upcoming => "Upcoming",
            PaymentStatus::Overdue => "Overdue",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Payment {
    pub id: String,
    pub date: NaiveDate,
    pub amount: Money,
    pub status: PaymentStatus,
}

impl Payment {
    pub fn is_paid(&self) -> bool {
        self.status == PaymentStatus::Paid
    }

    /// Whole days from `as_of` to the due date; negative once overdue.
    pub fn days_until(&self, as_of: NaiveDate) -> i64 {
        (self.date - as_of).num_days()
    }

    pub fn due_label(&self, as_of: NaiveDate) -> String {
        if self.is_paid() {
            return "Paid".to_string();
        }
        match self.days_until(as_of) {
            0 => "Due today".to_string(),
            1 => "Due in 1 day".to_string(),
            -1 => "Overdue by 1 day".to_string(),
            d if d > 0 => format!("Due in {d} days"),
            d => format!("Overdue by {} days", -d),
        }
    }
}

/// An active or historical loan with its repayment plan.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: String,
    #[serde(rename = "type")]
    pub loan_type: LoanType,
    pub amount: Money,
    pub interest_rate: Decimal,
    pub term: u32,
    pub monthly_payment: Money,
    pub status: LoanStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub next_payment_date: Option<NaiveDate>,
    pub next_payment_amount: Money,
    pub total_paid: Money,
    pub total_remaining: Money,
    pub payments: Vec<Payment>,
}

impl Loan {
    /// First payment that has not been paid yet.
    pub fn next_due_payment(&self) -> Option<&Payment> {
        self.payments.iter().find(|p| !p.is_paid())
    }

    /// Marks a payment as paid and recomputes the running totals.
    ///
    /// Paying an already-paid payment changes nothing.
    pub fn mark_payment_paid(&mut self, payment_id: &str) -> Result<()> {
        let payment = self
            .payments
            .iter_mut()
            .find(|p| p.id == payment_id)
            .ok_or_else(|| {
                LoanError::NotFound(format!("Payment '{payment_id}' on loan '{}'", self.id))
            })?;
        payment.status = PaymentStatus::Paid;
        self.recalculate_totals();
        Ok(())
    }

    pub fn recalculate_totals(&mut self) {
        self.total_paid = self
            .payments
            .iter()
            .filter(|p| p.is_paid())
            .map(|p| p.amount)
            .sum();
        self.total_remaining = self.amount - self.total_paid;

        let next = self.next_due_payment().map(|p| (p.date, p.amount));
        self.next_payment_date = next.map(|(date, _)| date);
        self.next_payment_amount = next.map(|(_, amount)| amount).unwrap_or(Money::ZERO);
    }

    pub fn repayment_progress_percent(&self) -> Decimal {
        if self.amount.value().is_zero() {
            return Decimal::ZERO;
        }
        (self.total_paid.value() / self.amount.value() * dec!(100)).round_dp(2)
    }
}
