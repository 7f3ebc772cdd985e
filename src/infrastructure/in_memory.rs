use crate::domain::application::LoanApplication;
use crate::domain::loan::Loan;
use crate::domain::ports::{ApplicationStore, LoanStore};
use crate::error::{LoanError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for loans.
///
/// Uses `Arc<RwLock<Vec<Loan>>>` so loans come back in insertion order.
#[derive(Default, Clone)]
pub struct InMemoryLoanStore {
    loans: Arc<RwLock<Vec<Loan>>>,
}

impl InMemoryLoanStore {
    /// Creates a new, empty in-memory loan store.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_loans(loans: Vec<Loan>) -> Self {
        Self {
            loans: Arc::new(RwLock::new(loans)),
        }
    }
}

#[async_trait]
impl LoanStore for InMemoryLoanStore {
    async fn store(&self, loan: Loan) -> Result<()> {
        let mut loans = self.loans.write().await;
        match loans.iter_mut().find(|l| l.id == loan.id) {
            Some(existing) => *existing = loan,
            None => loans.push(loan),
        }
        Ok(())
    }

    async fn get(&self, loan_id: &str) -> Result<Option<Loan>> {
        let loans = self.loans.read().await;
        Ok(loans.iter().find(|l| l.id == loan_id).cloned())
    }

    async fn all(&self) -> Result<Vec<Loan>> {
        let loans = self.loans.read().await;
        Ok(loans.clone())
    }
}

/// A thread-safe in-memory store for loan applications.
///
/// Applications are kept in submission order.
#[derive(Default, Clone)]
pub struct InMemoryApplicationStore {
    applications: Arc<RwLock<Vec<LoanApplication>>>,
}

impl InMemoryApplicationStore {
    /// Creates a new, empty in-memory application store.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_applications(applications: Vec<LoanApplication>) -> Self {
        Self {
            applications: Arc::new(RwLock::new(applications)),
        }
    }
}

#[async_trait]
impl ApplicationStore for InMemoryApplicationStore {
    async fn append(&self, application: LoanApplication) -> Result<()> {
        let mut applications = self.applications.write().await;
        if applications.iter().any(|a| a.id == application.id) {
            return Err(LoanError::ValidationError(format!(
                "Application '{}' already exists",
                application.id
            )));
        }
        applications.push(application);
        Ok(())
    }

    async fn update(&self, application: LoanApplication) -> Result<()> {
        let mut applications = self.applications.write().await;
        let existing = applications
            .iter_mut()
            .find(|a| a.id == application.id)
            .ok_or_else(|| LoanError::NotFound(format!("Application '{}'", application.id)))?;
        *existing = application;
        Ok(())
    }

    async fn get(&self, application_id: &str) -> Result<Option<LoanApplication>> {
        let applications = self.applications.read().await;
        Ok(applications.iter().find(|a| a.id == application_id).cloned())
    }

    async fn all(&self) -> Result<Vec<LoanApplication>> {
        let applications = self.applications.read().await;
        Ok(applications.clone())
    }
}
