use crate::application::dashboard::DashboardSummary;
use crate::domain::amortization::RepaymentQuote;
use crate::domain::product::LoanProduct;
use chrono::NaiveDate;
use std::fmt::Write;

/// `January 5, 2024`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

pub fn render_quote(product: &LoanProduct, quote: &RepaymentQuote) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Loan type:        {}", product.loan_type);
    let _ = writeln!(out, "Interest rate:    {}% APR", product.apr);
    let _ = writeln!(out, "Monthly payment:  {}", quote.monthly_payment);
    let _ = writeln!(out, "Total repayment:  {}", quote.total_repayment);
    let _ = writeln!(out, "Total interest:   {}", quote.total_interest);
    out
}

pub fn render_dashboard(summary: &DashboardSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Dashboard as of {}", format_date(summary.as_of));
    let _ = writeln!(out, "Active loans:          {}", summary.active_loans);
    let _ = writeln!(out, "Pending applications:  {}", summary.pending_applications);
    let _ = writeln!(out, "Total outstanding:     {}", summary.total_outstanding);

    match &summary.next_payment {
        Some(next) => {
            let when = match next.days_until {
                0 => "today".to_string(),
                d if d > 0 => format!("in {d} days"),
                d => format!("{} days overdue", -d),
            };
            let _ = writeln!(
                out,
                "Next payment:          {} for {} on {} ({when})",
                next.amount,
                next.loan_type,
                format_date(next.date)
            );
        }
        None => {
            let _ = writeln!(out, "Next payment:          none scheduled");
        }
    }
    out
}
