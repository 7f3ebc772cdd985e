use chrono::NaiveDate;
use loan_desk::application::service::LoanService;
use loan_desk::domain::ports::{ApplicationStoreBox, LoanStoreBox};
use loan_desk::domain::loan::LoanType;
use loan_desk::domain::wizard::ApplicationWizard;
use loan_desk::infrastructure::in_memory::{InMemoryApplicationStore, InMemoryLoanStore};
use loan_desk::infrastructure::sample;
use rust_decimal_macros::dec;
use std::sync::Arc;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

#[tokio::test]
async fn test_service_with_boxed_stores() {
    let loan_store: LoanStoreBox =
        Box::new(InMemoryLoanStore::with_loans(sample::sample_loans(today())));
    let application_store: ApplicationStoreBox = Box::new(InMemoryApplicationStore::new());
    let service = LoanService::new(loan_store, application_store);

    let dashboard = service.dashboard(today()).await.unwrap();
    assert_eq!(dashboard.active_loans, 1);
    assert_eq!(dashboard.pending_applications, 0);
}

#[tokio::test]
async fn test_wizard_to_review_workflow() {
    let (loans, applications) = sample::seeded_stores(today());
    let service = LoanService::new(Box::new(loans), Box::new(applications));

    let mut wizard = ApplicationWizard::new();
    {
        let draft = wizard.draft_mut();
        draft.personal.first_name = "Grace".to_string();
        draft.personal.last_name = "Hopper".to_string();
        draft.personal.email = "grace@example.com".to_string();
        draft.personal.phone = "555-0199".to_string();
    }
    wizard.next().unwrap();
    {
        let loan = &mut wizard.draft_mut().loan;
        loan.loan_type = Some(LoanType::Business);
        loan.amount = Some(dec!(40000));
        loan.term = Some(72);
        loan.purpose = "Second location".to_string();
    }
    wizard.next().unwrap();
    wizard.draft_mut().employment.employment_status = "Self-employed".to_string();
    wizard.next().unwrap();
    wizard.draft_mut().documents.push("Business Plan".to_string());

    assert_eq!(wizard.progress().completed_count(), 3);
    let application = wizard.submit().unwrap();

    let filed = service.submit_application(application, today()).await.unwrap();
    let filed = service.advance_application(&filed.id, today()).await.unwrap();
    assert_eq!(filed.current_step_name(), Some("Credit Check"));
    assert_eq!(filed.progress_percent(), dec!(40));
}

#[tokio::test]
async fn test_service_shared_across_tasks() {
    let (loans, applications) = sample::seeded_stores(today());
    let service = Arc::new(LoanService::new(Box::new(loans), Box::new(applications)));

    let worker = Arc::clone(&service);
    let handle = tokio::spawn(async move { worker.make_payment("1", "5").await.unwrap() });
    let loan = handle.await.unwrap();

    assert_eq!(loan.total_paid.value(), dec!(1509.80));
    let dashboard = service.dashboard(today()).await.unwrap();
    assert_eq!(dashboard.total_outstanding.value(), dec!(8490.20));
    assert_eq!(dashboard.next_payment.unwrap().days_until, 44);
}
