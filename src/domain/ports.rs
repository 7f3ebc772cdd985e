use super::application::LoanApplication;
use super::loan::Loan;
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait LoanStore: Send + Sync {
    /// Inserts the loan, or replaces the stored loan with the same id.
    async fn store(&self, loan: Loan) -> Result<()>;
    async fn get(&self, loan_id: &str) -> Result<Option<Loan>>;
    async fn all(&self) -> Result<Vec<Loan>>;
}

#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// Adds a new application; fails if the id is already taken.
    async fn append(&self, application: LoanApplication) -> Result<()>;
    /// Replaces an existing application; fails if the id is unknown.
    async fn update(&self, application: LoanApplication) -> Result<()>;
    async fn get(&self, application_id: &str) -> Result<Option<LoanApplication>>;
    async fn all(&self) -> Result<Vec<LoanApplication>>;
}

pub type LoanStoreBox = Box<dyn LoanStore>;
pub type ApplicationStoreBox = Box<dyn ApplicationStore>;
