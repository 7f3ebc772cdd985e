use crate::domain::amortization::ScheduleRow;
use crate::domain::application::LoanApplication;
use crate::domain::loan::Loan;
use crate::domain::money::Money;
use crate::error::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct ApplicationRow<'a> {
    id: &'a str,
    r#type: &'a str,
    amount: Decimal,
    term: u32,
    status: &'a str,
    submitted: NaiveDate,
    current_step: &'a str,
    progress: Decimal,
}

#[derive(Serialize)]
struct PaymentRow<'a> {
    loan: &'a str,
    payment: &'a str,
    date: NaiveDate,
    amount: Decimal,
    status: String,
    due: String,
}

#[derive(Serialize)]
struct ScheduleLine {
    month: u32,
    payment: Decimal,
    interest: Decimal,
    principal: Decimal,
    balance: Decimal,
}

/// Always two decimal places, so `100` is written as `100.00`.
fn cents(money: Money) -> Decimal {
    let mut value = money.round_to_cents().value();
    value.rescale(2);
    value
}

/// Writes loan reports as CSV.
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_schedule(&mut self, rows: &[ScheduleRow]) -> Result<()> {
        for row in rows {
            self.writer.serialize(ScheduleLine {
                month: row.month,
                payment: cents(row.payment),
                interest: cents(row.interest),
                principal: cents(row.principal),
                balance: cents(row.balance),
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// One row per application; a finished review shows `Complete`.
    pub fn write_applications(&mut self, applications: &[LoanApplication]) -> Result<()> {
        for application in applications {
            self.writer.serialize(ApplicationRow {
                id: &application.id,
                r#type: application.loan_type.display_name(),
                amount: cents(application.amount),
                term: application.term,
                status: application.status.as_str(),
                submitted: application.submission_date,
                current_step: application.current_step_name().unwrap_or("Complete"),
                progress: application.progress_percent(),
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }

    pub fn write_payments(&mut self, loans: &[Loan], as_of: NaiveDate) -> Result<()> {
        for loan in loans {
            for payment in &loan.payments {
                self.writer.serialize(PaymentRow {
                    loan: &loan.id,
                    payment: &payment.id,
                    date: payment.date,
                    amount: cents(payment.amount),
                    status: payment.status.to_string(),
                    due: payment.due_label(as_of),
                })?;
            }
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::amortization::LoanTerms;
    use crate::infrastructure::sample;
    use rust_decimal_macros::dec;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut ReportWriter<&mut Vec<u8>>) -> Result<()>,
    {
        let mut buffer = Vec::new();
        {
            let mut writer = ReportWriter::new(&mut buffer);
            f(&mut writer).unwrap();
        }
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_write_schedule() {
        let rows = LoanTerms::new(dec!(1200), dec!(0), 12)
            .unwrap()
            .schedule()
            .unwrap();
        let output = render(|w| w.write_schedule(&rows));

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "month,payment,interest,principal,balance");
        assert_eq!(lines[1], "1,100.00,0.00,100.00,1100.00");
        assert_eq!(lines[12], "12,100.00,0.00,100.00,0.00");
    }

    #[test]
    fn test_write_applications() {
        let as_of = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let applications = sample::sample_applications(as_of);
        let output = render(|w| w.write_applications(&applications));

        assert!(output.starts_with("id,type,amount,term,status,submitted,current_step,progress"));
        assert!(
            output.contains("1,Personal Loan,15000.00,48,Under Review,2024-05-11,Final Approval,60")
        );
    }

    #[test]
    fn test_write_payments() {
        let as_of = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let loans = sample::sample_loans(as_of);
        let output = render(|w| w.write_payments(&loans, as_of));

        assert!(output.contains("1,1,2024-02-15,301.96,Paid,Paid"));
        assert!(output.contains("1,5,2024-06-15,301.96,Upcoming,Due in 14 days"));
        assert_eq!(output.lines().count(), 7);
    }
}
