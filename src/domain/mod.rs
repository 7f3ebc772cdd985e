//! Domain layer: loan records, the amortization calculator, progress steps
//! and the storage ports the application layer depends on.

pub mod amortization;
pub mod application;
pub mod loan;
pub mod money;
pub mod ports;
pub mod product;
pub mod progress;
pub mod wizard;
