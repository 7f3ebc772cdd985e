//! Application layer containing the loan operations.
//!
//! `LoanService` is the primary entry point: it owns the injected stores and
//! applies domain rules on each read-modify-write.

pub mod dashboard;
pub mod service;
