pub mod application_reader;
pub mod report_writer;
