use crate::domain::loan::LoanType;
use crate::domain::wizard::{ApplicationDraft, EmploymentInfo, LoanDetails, PersonalInfo};
use crate::error::{LoanError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// One application as it appears in an input file.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct ApplicationRecord {
    pub r#type: LoanType,
    pub amount: Decimal,
    pub term: u32,
    pub purpose: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub employment_status: String,
    #[serde(default)]
    pub monthly_income: Option<Decimal>,
    /// Document names separated by `;`.
    #[serde(default)]
    pub documents: String,
}

impl From<ApplicationRecord> for ApplicationDraft {
    fn from(record: ApplicationRecord) -> Self {
        ApplicationDraft {
            personal: PersonalInfo {
                first_name: record.first_name,
                last_name: record.last_name,
                email: record.email,
                phone: record.phone,
                ..Default::default()
            },
            loan: LoanDetails {
                loan_type: Some(record.r#type),
                amount: Some(record.amount),
                term: Some(record.term),
                purpose: record.purpose,
            },
            employment: EmploymentInfo {
                employment_status: record.employment_status,
                monthly_income: record.monthly_income.unwrap_or_default(),
                ..Default::default()
            },
            documents: record
                .documents
                .split(';')
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Reads application drafts from a CSV source.
///
/// Whitespace around fields is trimmed and short rows are accepted; missing
/// optional columns fall back to their defaults.
pub struct ApplicationReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ApplicationReader<R> {
    /// Creates a new `ApplicationReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and converts each row.
    pub fn drafts(self) -> impl Iterator<Item = Result<ApplicationDraft>> {
        self.reader.into_deserialize().map(|result| {
            result
                .map(|record: ApplicationRecord| ApplicationDraft::from(record))
                .map_err(LoanError::from)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const HEADER: &str =
        "type, amount, term, purpose, first_name, last_name, email, phone, employment_status, monthly_income, documents";

    #[test]
    fn test_reader_valid_stream() {
        let data = format!(
            "{HEADER}\n\
             auto, 18000, 60, Car, Ada, Lovelace, ada@example.com, 555, Full-time, 4200, ID Proof;Income Proof\n\
             Home Loan, 90000, 84, House, Alan, Turing, alan@example.com, 556, Retired, , ID Proof"
        );
        let reader = ApplicationReader::new(data.as_bytes());
        let results: Vec<Result<ApplicationDraft>> = reader.drafts().collect();

        assert_eq!(results.len(), 2);
        let first = results[0].as_ref().unwrap();
        assert_eq!(first.loan.loan_type, Some(LoanType::Auto));
        assert_eq!(first.loan.amount, Some(dec!(18000)));
        assert_eq!(first.employment.monthly_income, dec!(4200));
        assert_eq!(first.documents, vec!["ID Proof", "Income Proof"]);

        let second = results[1].as_ref().unwrap();
        assert_eq!(second.loan.loan_type, Some(LoanType::Home));
        assert_eq!(second.employment.monthly_income, Decimal::ZERO);
        assert!(second.finalize().is_ok());
    }

    #[test]
    fn test_reader_malformed_line() {
        let data = format!(
            "{HEADER}\n\
             boat, 18000, 60, Car, Ada, Lovelace, ada@example.com, 555, Full-time, 4200, ID Proof\n\
             auto, lots, 60, Car, Ada, Lovelace, ada@example.com, 555, Full-time, 4200, ID Proof"
        );
        let reader = ApplicationReader::new(data.as_bytes());
        let results: Vec<Result<ApplicationDraft>> = reader.drafts().collect();

        assert!(matches!(results[0], Err(LoanError::CsvError(_))));
        assert!(results[1].is_err());
    }
}
