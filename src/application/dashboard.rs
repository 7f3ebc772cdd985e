use crate::domain::application::LoanApplication;
use crate::domain::loan::{Loan, LoanStatus, LoanType};
use crate::domain::money::Money;
use chrono::NaiveDate;
use serde::Serialize;

/// The earliest unpaid installment across all loans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextPayment {
    pub loan_id: String,
    pub loan_type: LoanType,
    pub date: NaiveDate,
    pub amount: Money,
    /// Relative to the as-of date; negative when overdue.
    pub days_until: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub as_of: NaiveDate,
    pub active_loans: usize,
    pub pending_applications: usize,
    pub total_outstanding: Money,
    pub next_payment: Option<NextPayment>,
}

impl DashboardSummary {
    pub fn build(loans: &[Loan], applications: &[LoanApplication], as_of: NaiveDate) -> Self {
        let next_payment = loans
            .iter()
            .filter_map(|loan| loan.next_due_payment().map(|p| (loan, p)))
            .min_by_key(|(_, p)| p.date)
            .map(|(loan, p)| NextPayment {
                loan_id: loan.id.clone(),
                loan_type: loan.loan_type,
                date: p.date,
                amount: p.amount,
                days_until: p.days_until(as_of),
            });

        Self {
            as_of,
            active_loans: loans
                .iter()
                .filter(|l| l.status == LoanStatus::Active)
                .count(),
            pending_applications: applications.iter().filter(|a| a.is_pending()).count(),
            total_outstanding: loans.iter().map(|l| l.total_remaining).sum(),
            next_payment,
        }
    }
}
