//! # Storage Module
//!
//! Handles all data persistence for the family ledger.
//!
//! Every call is a round trip to SQLite through a shared `sqlx` pool; nothing
//! is cached in process, so several service instances can share one database.
//!
//! ## Components
//!
//! - **connection.rs** - Pool setup and schema creation
//! - **traits.rs** - `SiblingStorage`, the seam the ordering engine works through
//! - **repositories/** - One repository per table (ledgers, kids, accounts)
//!
//! ## Schema Guarantees
//!
//! - Kids reference their ledger and accounts reference their kid with
//!   `ON DELETE CASCADE`, so deletes never leave orphans behind
//! - Kid and account ids come from `AUTOINCREMENT`, never from a process counter
//! - Sibling lists are indexed on `(parent, sort_order, id)`, the canonical read order

pub mod connection;
pub mod repositories;
pub mod traits;

// Re-export the main types that other modules need
pub use connection::DbConnection;
pub use repositories::{AccountRepository, KidRepository, LedgerRepository};
pub use traits::{SiblingPosition, SiblingStorage};
