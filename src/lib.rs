//! Herb Traceability Portal
//!
//! Farm-to-shelf tracing for Ayurvedic herb batches:
//! - Static role dashboards (farmer, collector, distributor, manufacturer)
//! - Batch lookup and transaction timeline
//! - Herb chat assistant over a generative API or offline keyword rules
//! - Plant identification proxy

pub mod chat;
pub mod config;
pub mod error;
pub mod identify;
pub mod ledger;
pub mod quota;
pub mod server;
pub mod services;
pub mod telemetry;
pub mod utils;

// Re-exports for convenience
pub use config::PortalConfig;
pub use error::PortalError;
pub use ledger::Ledger;
pub use server::{build_router, run_server, AppState};
