//! Adapters between the outside world and the application layer: CSV input
//! and output, and plain-text summaries for the terminal.

pub mod csv;
pub mod text;
