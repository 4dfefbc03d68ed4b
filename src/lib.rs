//! Aether Climate Core
//!
//! A single-page carbon-accounting dashboard with:
//! - Fixed-factor scope 1/2/3 emissions calculator
//! - Inline SVG chart of the scope totals
//! - Fixed-layout 7-page PDF compliance dossier
//! - Illustrative license-key gate on the report download

pub mod access;
pub mod chart;
pub mod config;
pub mod inventory;
pub mod report;
pub mod server;

// Re-exports for convenience
pub use config::AetherConfig;
pub use inventory::{compute, EmissionTotals, RawInputs, SupplyMethod};
pub use report::ReportDocument;
