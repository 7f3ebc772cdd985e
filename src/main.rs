use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use loan_desk::application::service::LoanService;
use loan_desk::domain::amortization::LoanTerms;
use loan_desk::domain::loan::LoanType;
use loan_desk::domain::product::LoanProduct;
use loan_desk::infrastructure::sample;
use loan_desk::interfaces::csv::application_reader::ApplicationReader;
use loan_desk::interfaces::csv::report_writer::ReportWriter;
use loan_desk::interfaces::text;
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Date to evaluate due dates against (YYYY-MM-DD). Defaults to today.
    #[arg(long, global = true)]
    as_of: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Monthly payment and totals for a loan
    Quote {
        /// personal, home, auto, education or business
        #[arg(long = "type", default_value = "personal")]
        loan_type: LoanType,
        #[arg(long)]
        amount: Decimal,
        /// Term in months
        #[arg(long)]
        term: u32,
        /// APR in percent. Overrides the catalog rate and its limits.
        #[arg(long)]
        rate: Option<Decimal>,
    },
    /// Month-by-month amortization schedule as CSV
    Schedule {
        #[arg(long)]
        amount: Decimal,
        /// APR in percent
        #[arg(long)]
        rate: Decimal,
        /// Term in months
        #[arg(long)]
        term: u32,
    },
    /// Summary of the demo loans and applications
    Dashboard,
    /// Applications with their review progress as CSV
    Status,
    /// Loan installments as CSV
    Repayments,
    /// Submit applications from a CSV file, then list all applications
    Apply {
        /// Input applications CSV file
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let as_of = cli.as_of.unwrap_or_else(|| Local::now().date_naive());

    match cli.command {
        Command::Quote {
            loan_type,
            amount,
            term,
            rate,
        } => {
            let catalog = LoanProduct::for_type(loan_type);
            let (product, terms) = match rate {
                Some(apr) => (
                    LoanProduct { apr, ..catalog },
                    LoanTerms::new(amount, apr, term).into_diagnostic()?,
                ),
                None => (catalog, catalog.terms(amount, term).into_diagnostic()?),
            };
            let quote = terms.quote().into_diagnostic()?;
            print!("{}", text::render_quote(&product, &quote));
        }
        Command::Schedule { amount, rate, term } => {
            let rows = LoanTerms::new(amount, rate, term)
                .and_then(|terms| terms.schedule())
                .into_diagnostic()?;
            let stdout = io::stdout();
            let mut writer = ReportWriter::new(stdout.lock());
            writer.write_schedule(&rows).into_diagnostic()?;
        }
        Command::Dashboard => {
            let service = seeded_service(as_of);
            let summary = service.dashboard(as_of).await.into_diagnostic()?;
            print!("{}", text::render_dashboard(&summary));
        }
        Command::Status => {
            let service = seeded_service(as_of);
            let applications = service.applications().await.into_diagnostic()?;
            let stdout = io::stdout();
            let mut writer = ReportWriter::new(stdout.lock());
            writer.write_applications(&applications).into_diagnostic()?;
        }
        Command::Repayments => {
            let service = seeded_service(as_of);
            let loans = service.loans().await.into_diagnostic()?;
            let stdout = io::stdout();
            let mut writer = ReportWriter::new(stdout.lock());
            writer.write_payments(&loans, as_of).into_diagnostic()?;
        }
        Command::Apply { input } => {
            let service = seeded_service(as_of);

            let file = File::open(input).into_diagnostic()?;
            let reader = ApplicationReader::new(file);
            for draft_result in reader.drafts() {
                match draft_result {
                    Ok(draft) => {
                        let submitted = match draft.finalize() {
                            Ok(application) => service.submit_application(application, as_of).await,
                            Err(e) => Err(e),
                        };
                        if let Err(e) = submitted {
                            eprintln!("Error submitting application: {}", e);
                        }
                    }
                    Err(e) => {
                        eprintln!("Error reading application: {}", e);
                    }
                }
            }

            let applications = service.applications().await.into_diagnostic()?;
            let stdout = io::stdout();
            let mut writer = ReportWriter::new(stdout.lock());
            writer.write_applications(&applications).into_diagnostic()?;
        }
    }

    Ok(())
}

fn seeded_service(as_of: NaiveDate) -> LoanService {
    let (loans, applications) = sample::seeded_stores(as_of);
    LoanService::new(Box::new(loans), Box::new(applications))
}
