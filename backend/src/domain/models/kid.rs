//! Domain model for a kid inside a ledger.
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Kid {
    pub id: i64,
    pub ledger_id: String,
    pub name: String,
    pub emoji: String,
    pub sort_order: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
