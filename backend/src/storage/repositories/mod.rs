// Repository modules
pub mod account_repository;
pub mod kid_repository;
pub mod ledger_repository;

// Re-export repository types
pub use account_repository::AccountRepository;
pub use kid_repository::KidRepository;
pub use ledger_repository::LedgerRepository;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

/// Timestamps are stored as RFC 3339 text
pub(crate) fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339()
}

pub(crate) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(value)
        .with_context(|| format!("Failed to parse stored timestamp '{}'", value))?;
    Ok(parsed.with_timezone(&Utc))
}
