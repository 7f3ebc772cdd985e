use super::dashboard::DashboardSummary;
use crate::domain::amortization::RepaymentQuote;
use crate::domain::application::{LoanApplication, NewApplication};
use crate::domain::loan::{Loan, LoanStatus, LoanType};
use crate::domain::ports::{ApplicationStoreBox, LoanStoreBox};
use crate::domain::product::LoanProduct;
use crate::error::{LoanError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

/// The main entry point for loan operations.
///
/// `LoanService` owns the storage backends. Every operation is a single
/// read-modify-write against them, awaited before the next one starts.
pub struct LoanService {
    loan_store: LoanStoreBox,
    application_store: ApplicationStoreBox,
}

impl LoanService {
    /// Creates a new `LoanService` instance.
    ///
    /// # Arguments
    ///
    /// * `loan_store` - The store for loans and their payments.
    /// * `application_store` - The store for loan applications.
    pub fn new(loan_store: LoanStoreBox, application_store: ApplicationStoreBox) -> Self {
        Self {
            loan_store,
            application_store,
        }
    }

    pub async fn loans(&self) -> Result<Vec<Loan>> {
        self.loan_store.all().await
    }

    pub async fn applications(&self) -> Result<Vec<LoanApplication>> {
        self.application_store.all().await
    }

    /// Files a validated application and returns the stored record.
    pub async fn submit_application(
        &self,
        application: NewApplication,
        submitted_on: NaiveDate,
    ) -> Result<LoanApplication> {
        let id = Uuid::new_v4().to_string();
        let application = LoanApplication::submit(id, application, submitted_on);
        self.application_store.append(application.clone()).await?;
        info!(
            application_id = %application.id,
            loan_type = %application.loan_type,
            amount = %application.amount,
            "application submitted"
        );
        Ok(application)
    }

    /// Marks one installment of a loan as paid.
    pub async fn make_payment(&self, loan_id: &str, payment_id: &str) -> Result<Loan> {
        let mut loan = self
            .loan_store
            .get(loan_id)
            .await?
            .ok_or_else(|| LoanError::NotFound(format!("Loan '{loan_id}'")))?;
        loan.mark_payment_paid(payment_id)?;
        self.loan_store.store(loan.clone()).await?;
        info!(
            loan_id,
            payment_id,
            total_remaining = %loan.total_remaining,
            "payment recorded"
        );
        Ok(loan)
    }

    /// Completes the next review step of an application.
    pub async fn advance_application(
        &self,
        application_id: &str,
        date: NaiveDate,
    ) -> Result<LoanApplication> {
        let mut application = self.find_application(application_id).await?;
        let step = application.steps.advance(date)?.name.clone();
        self.application_store.update(application.clone()).await?;
        debug!(application_id, step = %step, "review step completed");
        Ok(application)
    }

    /// Moves an application to a new status along the allowed transitions.
    pub async fn update_application_status(
        &self,
        application_id: &str,
        status: LoanStatus,
    ) -> Result<LoanApplication> {
        let mut application = self.find_application(application_id).await?;
        if !application.status.can_transition_to(status) {
            return Err(LoanError::InvalidTransition {
                from: application.status.to_string(),
                to: status.to_string(),
            });
        }
        let previous = application.status;
        application.status = status;
        self.application_store.update(application.clone()).await?;
        info!(application_id, from = %previous, to = %status, "application status changed");
        Ok(application)
    }

    /// Prices a loan at the catalog rate for its type.
    pub fn quote(&self, loan_type: LoanType, amount: Decimal, term: u32) -> Result<RepaymentQuote> {
        LoanProduct::for_type(loan_type).quote(amount, term)
    }

    pub async fn dashboard(&self, as_of: NaiveDate) -> Result<DashboardSummary> {
        let loans = self.loan_store.all().await?;
        let applications = self.application_store.all().await?;
        Ok(DashboardSummary::build(&loans, &applications, as_of))
    }

    async fn find_application(&self, application_id: &str) -> Result<LoanApplication> {
        self.application_store
            .get(application_id)
            .await?
            .ok_or_else(|| LoanError::NotFound(format!("Application '{application_id}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Money;
    use crate::infrastructure::in_memory::{InMemoryApplicationStore, InMemoryLoanStore};
    use crate::infrastructure::sample;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn seeded_service() -> LoanService {
        let (loans, applications) = sample::seeded_stores(today());
        LoanService::new(Box::new(loans), Box::new(applications))
    }

    fn new_application() -> NewApplication {
        NewApplication {
            loan_type: LoanType::Auto,
            amount: Money::new(dec!(18000)),
            term: 60,
            purpose: "Car".to_string(),
            documents: vec!["ID Proof".to_string()],
        }
    }

    #[tokio::test]
    async fn test_submit_appends_application() {
        let service = seeded_service();
        let submitted = service
            .submit_application(new_application(), today())
            .await
            .unwrap();

        let applications = service.applications().await.unwrap();
        assert_eq!(applications.len(), 2);
        assert_eq!(applications[1], submitted);
        assert_eq!(submitted.status, LoanStatus::Submitted);
        assert_eq!(submitted.steps.current(), Some(1));
    }

    #[tokio::test]
    async fn test_submissions_get_distinct_ids() {
        let service = LoanService::new(
            Box::new(InMemoryLoanStore::new()),
            Box::new(InMemoryApplicationStore::new()),
        );
        let a = service
            .submit_application(new_application(), today())
            .await
            .unwrap();
        let b = service
            .submit_application(new_application(), today())
            .await
            .unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_make_payment_updates_totals() {
        let service = seeded_service();
        let loan = service.make_payment("1", "5").await.unwrap();

        assert_eq!(loan.total_paid, Money::new(dec!(1509.80)));
        assert_eq!(loan.total_remaining, Money::new(dec!(8490.20)));

        let stored = service.loans().await.unwrap().remove(0);
        assert_eq!(stored, loan);
    }

    #[tokio::test]
    async fn test_make_payment_unknown_ids() {
        let service = seeded_service();
        assert!(matches!(
            service.make_payment("9", "1").await,
            Err(LoanError::NotFound(_))
        ));
        assert!(matches!(
            service.make_payment("1", "99").await,
            Err(LoanError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_advance_application_until_complete() {
        let service = seeded_service();
        let app = service.advance_application("1", today()).await.unwrap();
        assert_eq!(app.current_step_name(), Some("Loan Disbursement"));

        let app = service.advance_application("1", today()).await.unwrap();
        assert!(app.steps.is_complete());

        assert!(matches!(
            service.advance_application("1", today()).await,
            Err(LoanError::ProgressError(_))
        ));
    }

    #[tokio::test]
    async fn test_status_is_independent_of_steps() {
        let service = seeded_service();
        let app = service
            .update_application_status("1", LoanStatus::Approved)
            .await
            .unwrap();
        assert_eq!(app.status, LoanStatus::Approved);
        assert_eq!(app.steps.completed_count(), 3);

        assert!(matches!(
            service
                .update_application_status("1", LoanStatus::Submitted)
                .await,
            Err(LoanError::InvalidTransition { .. })
        ));

        let dashboard = service.dashboard(today()).await.unwrap();
        assert_eq!(dashboard.pending_applications, 0);
    }

    #[tokio::test]
    async fn test_quote() {
        let service = seeded_service();
        let quote = service.quote(LoanType::Personal, dec!(10000), 36).unwrap();
        assert_eq!(quote.monthly_payment, Money::new(dec!(322.62)));
        assert!(service.quote(LoanType::Home, dec!(500), 36).is_err());
    }
}
