use super::amortization::{LoanTerms, RepaymentQuote};
use super::loan::LoanType;
use crate::error::{LoanError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Indicative pricing and limits for one loan type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoanProduct {
    pub loan_type: LoanType,
    pub apr: Decimal,
    pub min_amount: Decimal,
    pub max_amount: Decimal,
    pub min_term: u32,
    pub max_term: u32,
    pub term_step: u32,
}

impl LoanProduct {
    pub fn for_type(loan_type: LoanType) -> Self {
        let apr = match loan_type {
            LoanType::Personal => dec!(9.99),
            LoanType::Home => dec!(4.5),
            LoanType::Auto => dec!(5.99),
            LoanType::Education => dec!(4.99),
            LoanType::Business => dec!(7.99),
        };
        Self {
            loan_type,
            apr,
            min_amount: dec!(1000),
            max_amount: dec!(100000),
            min_term: 12,
            max_term: 84,
            term_step: 12,
        }
    }

    pub fn catalog() -> Vec<LoanProduct> {
        LoanType::ALL.into_iter().map(Self::for_type).collect()
    }

    pub fn validate(&self, amount: Decimal, term: u32) -> Result<()> {
        if amount < self.min_amount || amount > self.max_amount {
            return Err(LoanError::ValidationError(format!(
                "{} amount must be between {} and {}",
                self.loan_type, self.min_amount, self.max_amount
            )));
        }
        if term < self.min_term || term > self.max_term || term % self.term_step != 0 {
            return Err(LoanError::ValidationError(format!(
                "{} term must be {}-{} months in steps of {}",
                self.loan_type, self.min_term, self.max_term, self.term_step
            )));
        }
        Ok(())
    }

    /// Terms at this product's APR, within its limits.
    pub fn terms(&self, amount: Decimal, term: u32) -> Result<LoanTerms> {
        self.validate(amount, term)?;
        LoanTerms::new(amount, self.apr, term)
    }

    pub fn quote(&self, amount: Decimal, term: u32) -> Result<RepaymentQuote> {
        self.terms(amount, term)?.quote()
    }
}
