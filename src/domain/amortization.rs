use super::money::{Money, round_to_cents};
use crate::error::{LoanError, Result};
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::Serialize;

/// Longest term accepted, one hundred years.
pub const MAX_TERM_MONTHS: u32 = 1200;

/// Immutable input to the amortization calculator.
///
/// Construction rejects a non-positive principal or term, a term longer than
/// [`MAX_TERM_MONTHS`] and a negative rate, so every `LoanTerms` value can be
/// priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoanTerms {
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_months: u32,
}

/// The figures a borrower sees before applying.
///
/// The monthly payment is rounded to cents and the totals are derived from the
/// rounded payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RepaymentQuote {
    pub monthly_payment: Money,
    pub total_repayment: Money,
    pub total_interest: Money,
}

/// One month of an amortization schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduleRow {
    pub month: u32,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    pub balance: Money,
}

impl LoanTerms {
    pub fn new(principal: Decimal, annual_rate_percent: Decimal, term_months: u32) -> Result<Self> {
        if principal <= Decimal::ZERO {
            return Err(LoanError::ValidationError(
                "Principal must be positive".to_string(),
            ));
        }
        if annual_rate_percent < Decimal::ZERO {
            return Err(LoanError::ValidationError(
                "Interest rate must not be negative".to_string(),
            ));
        }
        if term_months == 0 {
            return Err(LoanError::ValidationError(
                "Term must be at least one month".to_string(),
            ));
        }
        if term_months > MAX_TERM_MONTHS {
            return Err(LoanError::ValidationError(format!(
                "Term must not exceed {MAX_TERM_MONTHS} months"
            )));
        }
        Ok(Self {
            principal,
            annual_rate_percent,
            term_months,
        })
    }

    pub fn principal(&self) -> Decimal {
        self.principal
    }

    pub fn annual_rate_percent(&self) -> Decimal {
        self.annual_rate_percent
    }

    pub fn term_months(&self) -> u32 {
        self.term_months
    }

    pub fn monthly_rate(&self) -> Decimal {
        self.annual_rate_percent / dec!(100) / dec!(12)
    }

    /// Fixed monthly payment at full precision.
    ///
    /// `M = P·r·(1+r)^N / ((1+r)^N − 1)`, or `P / N` when the rate is zero.
    pub fn monthly_payment(&self) -> Result<Decimal> {
        let n = Decimal::from(self.term_months);
        let rate = self.monthly_rate();
        if rate.is_zero() {
            return Ok(self.principal / n);
        }

        let overflow = || {
            LoanError::ValidationError(format!(
                "Interest rate {}% over {} months is out of range",
                self.annual_rate_percent, self.term_months
            ))
        };

        let growth = (Decimal::ONE + rate)
            .checked_powi(i64::from(self.term_months))
            .ok_or_else(overflow)?;
        let denominator = growth - Decimal::ONE;
        // Rates too small to register in 28 significant digits behave as zero.
        if denominator.is_zero() {
            return Ok(self.principal / n);
        }

        self.principal
            .checked_mul(rate)
            .and_then(|v| v.checked_mul(growth))
            .and_then(|v| v.checked_div(denominator))
            .ok_or_else(overflow)
    }

    pub fn quote(&self) -> Result<RepaymentQuote> {
        let monthly_payment = round_to_cents(self.monthly_payment()?);
        let total_repayment = monthly_payment * Decimal::from(self.term_months);
        Ok(RepaymentQuote {
            monthly_payment: Money::new(monthly_payment),
            total_repayment: Money::new(total_repayment),
            total_interest: Money::new(total_repayment - self.principal),
        })
    }

    /// Month-by-month breakdown of the loan.
    ///
    /// Interest is charged on the outstanding balance and rounded to cents. The
    /// principal portion never exceeds the balance, so a payment that rounded
    /// up retires the loan early and later rows are zero. The final month pays
    /// off whatever balance is left, so the schedule always ends at exactly
    /// zero.
    pub fn schedule(&self) -> Result<Vec<ScheduleRow>> {
        let level_payment = round_to_cents(self.monthly_payment()?);
        let rate = self.monthly_rate();
        let mut balance = self.principal;
        let mut rows = Vec::with_capacity(self.term_months as usize);

        for month in 1..=self.term_months {
            let interest = round_to_cents(balance * rate);
            let principal = if month == self.term_months {
                balance
            } else {
                (level_payment - interest).max(Decimal::ZERO).min(balance)
            };
            balance -= principal;
            rows.push(ScheduleRow {
                month,
                payment: Money::new(principal + interest),
                interest: Money::new(interest),
                principal: Money::new(principal),
                balance: Money::new(balance),
            });
        }

        Ok(rows)
    }
}
