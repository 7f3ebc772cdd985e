//! Demo records used to seed the in-memory stores.
//!
//! Dates are laid out relative to an anchor (normally today), so the demo
//! loan always has a payment coming up instead of one that went overdue
//! long ago.

use super::in_memory::{InMemoryApplicationStore, InMemoryLoanStore};
use crate::domain::application::{Document, DocumentStatus, LoanApplication};
use crate::domain::loan::{Loan, LoanStatus, LoanType, Payment, PaymentStatus};
use crate::domain::money::Money;
use crate::domain::progress::StepSequence;
use chrono::{Duration, Months, NaiveDate};
use rust_decimal_macros::dec;

const PAID_INSTALLMENTS: u32 = 4;
const SCHEDULED_INSTALLMENTS: u32 = 6;

fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let delta = Months::new(months.unsigned_abs());
    let shifted = if months >= 0 {
        date.checked_add_months(delta)
    } else {
        date.checked_sub_months(delta)
    };
    shifted.unwrap_or(date)
}

/// A 36-month personal loan with four installments paid and the next one
/// due two weeks after `anchor`.
pub fn sample_loans(anchor: NaiveDate) -> Vec<Loan> {
    let next_due = anchor + Duration::days(14);
    let installment = Money::new(dec!(301.96));

    let payments = (1..=SCHEDULED_INSTALLMENTS)
        .map(|n| Payment {
            id: n.to_string(),
            date: shift_months(next_due, n as i32 - (PAID_INSTALLMENTS as i32 + 1)),
            amount: installment,
            status: if n <= PAID_INSTALLMENTS {
                PaymentStatus::Paid
            } else {
                PaymentStatus::Upcoming
            },
        })
        .collect();

    let start_date = shift_months(next_due, -(PAID_INSTALLMENTS as i32 + 1));
    let mut loan = Loan {
        id: "1".to_string(),
        loan_type: LoanType::Personal,
        amount: Money::new(dec!(10000)),
        interest_rate: dec!(5.5),
        term: 36,
        monthly_payment: installment,
        status: LoanStatus::Active,
        start_date,
        end_date: shift_months(start_date, 36),
        next_payment_date: None,
        next_payment_amount: Money::ZERO,
        total_paid: Money::ZERO,
        total_remaining: Money::ZERO,
        payments,
    };
    loan.recalculate_totals();
    vec![loan]
}

/// A personal-loan application three weeks into review.
pub fn sample_applications(anchor: NaiveDate) -> Vec<LoanApplication> {
    let submitted = anchor - Duration::days(21);

    let steps = StepSequence::review_workflow_completed_on(&[
        submitted,
        submitted + Duration::days(2),
        submitted + Duration::days(4),
    ]);

    let documents = [
        ("ID Proof", DocumentStatus::Verified),
        ("Income Proof", DocumentStatus::UnderReview),
        ("Address Proof", DocumentStatus::Verified),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (name, status))| Document {
        id: (i + 1).to_string(),
        name: name.to_string(),
        status,
        url: None,
    })
    .collect();

    vec![LoanApplication {
        id: "1".to_string(),
        loan_type: LoanType::Personal,
        amount: Money::new(dec!(15000)),
        term: 48,
        purpose: "Home renovation".to_string(),
        status: LoanStatus::UnderReview,
        submission_date: submitted,
        documents,
        steps,
    }]
}

/// Stores pre-loaded with the demo records.
pub fn seeded_stores(anchor: NaiveDate) -> (InMemoryLoanStore, InMemoryApplicationStore) {
    (
        InMemoryLoanStore::with_loans(sample_loans(anchor)),
        InMemoryApplicationStore::with_applications(sample_applications(anchor)),
    )
}
