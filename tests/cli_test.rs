use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_quote_at_catalog_rate() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("loan-desk"));
    cmd.args(["quote", "--type", "personal", "--amount", "10000", "--term", "36"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Personal Loan"))
        .stdout(predicate::str::contains("9.99% APR"))
        .stdout(predicate::str::contains("Monthly payment:  $322.62"))
        .stdout(predicate::str::contains("Total repayment:  $11,614.32"))
        .stdout(predicate::str::contains("Total interest:   $1,614.32"));

    Ok(())
}

#[test]
fn test_quote_with_zero_rate_override() {
    let mut cmd = Command::new(cargo_bin!("loan-desk"));
    cmd.args(["quote", "--amount", "1200", "--term", "12", "--rate", "0"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Monthly payment:  $100.00"))
        .stdout(predicate::str::contains("Total interest:   $0.00"));
}

#[test]
fn test_quote_outside_product_limits() {
    let mut cmd = Command::new(cargo_bin!("loan-desk"));
    cmd.args(["quote", "--type", "home", "--amount", "500", "--term", "36"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("amount must be between"));
}

#[test]
fn test_quote_rejects_unknown_type() {
    let mut cmd = Command::new(cargo_bin!("loan-desk"));
    cmd.args(["quote", "--type", "boat", "--amount", "5000", "--term", "36"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown loan type"));
}

#[test]
fn test_schedule_csv() {
    let mut cmd = Command::new(cargo_bin!("loan-desk"));
    cmd.args(["schedule", "--amount", "1200", "--rate", "0", "--term", "12"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("month,payment,interest,principal,balance"))
        .stdout(predicate::str::contains("1,100.00,0.00,100.00,1100.00"))
        .stdout(predicate::str::contains("12,100.00,0.00,100.00,0.00"));
}

#[test]
fn test_schedule_rejects_zero_term() {
    let mut cmd = Command::new(cargo_bin!("loan-desk"));
    cmd.args(["schedule", "--amount", "1200", "--rate", "5", "--term", "0"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Term must be at least one month"));
}

#[test]
fn test_schedule_rejects_huge_term() {
    let mut cmd = Command::new(cargo_bin!("loan-desk"));
    cmd.args(["schedule", "--amount", "1000", "--rate", "0", "--term", "4294967295"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Term must not exceed 1200 months"));
}

#[test]
fn test_dashboard_is_anchored_to_as_of() {
    let mut cmd = Command::new(cargo_bin!("loan-desk"));
    cmd.args(["dashboard", "--as-of", "2024-06-01"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Dashboard as of June 1, 2024"))
        .stdout(predicate::str::contains("Active loans:          1"))
        .stdout(predicate::str::contains("Pending applications:  1"))
        .stdout(predicate::str::contains("Total outstanding:     $8,792.16"))
        .stdout(predicate::str::contains("(in 14 days)"));
}

#[test]
fn test_status_lists_review_progress() {
    let mut cmd = Command::new(cargo_bin!("loan-desk"));
    cmd.args(["status", "--as-of", "2024-06-01"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "id,type,amount,term,status,submitted,current_step,progress",
        ))
        .stdout(predicate::str::contains(
            "1,Personal Loan,15000.00,48,Under Review,2024-05-11,Final Approval,60",
        ));
}

#[test]
fn test_repayments_list_due_labels() {
    let mut cmd = Command::new(cargo_bin!("loan-desk"));
    cmd.args(["repayments", "--as-of", "2024-06-01"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("loan,payment,date,amount,status,due"))
        .stdout(predicate::str::contains("1,4,2024-05-15,301.96,Paid,Paid"))
        .stdout(predicate::str::contains(
            "1,5,2024-06-15,301.96,Upcoming,Due in 14 days",
        ));
}
