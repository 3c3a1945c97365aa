//! Domain model for a family ledger.
use chrono::{DateTime, Utc};
use rand::{rngs::OsRng, RngCore};

#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ledger {
    /// Generate a fresh ledger id: 128 bits from the OS random source, hex encoded.
    ///
    /// The id is the only credential protecting a ledger, so it must not be
    /// derived from anything guessable (time, counters).
    pub fn generate_id() -> String {
        let mut bytes = [0u8; 16];
        OsRng.fill_bytes(&mut bytes);
        format!("{:032x}", u128::from_be_bytes(bytes))
    }
}
