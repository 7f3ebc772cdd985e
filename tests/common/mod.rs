use std::fs::File;
use std::io::Error;
use std::path::Path;

pub const HEADER: [&str; 11] = [
    "type",
    "amount",
    "term",
    "purpose",
    "first_name",
    "last_name",
    "email",
    "phone",
    "employment_status",
    "monthly_income",
    "documents",
];

/// Writes `rows` valid personal-loan applications.
pub fn generate_applications_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(HEADER)?;

    for i in 1..=rows {
        let amount = (1000 + i * 1000).to_string();
        let email = format!("applicant{i}@example.com");
        wtr.write_record([
            "personal",
            &amount,
            "36",
            "Consolidation",
            "Applicant",
            &i.to_string(),
            &email,
            "555-0100",
            "Full-time",
            "3000",
            "ID Proof;Income Proof;Address Proof",
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
