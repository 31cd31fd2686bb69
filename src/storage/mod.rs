mod repository;

pub use repository::*;

/// SQL migration for companies, products and types
pub const MIGRATION_001_INITIAL: &str = include_str!("migrations/001_initial.sql");

/// SQL migration for the cash-flow ledger
pub const MIGRATION_002_LEDGER: &str = include_str!("migrations/002_ledger.sql");

/// SQL migration for employees, customers and schedules
pub const MIGRATION_003_SCHEDULING: &str = include_str!("migrations/003_scheduling.sql");
