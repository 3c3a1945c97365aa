//! # Domain Module
//!
//! Contains all business logic for the family ledger.
//!
//! Services validate their inputs, call into the storage repositories and
//! log every intent. They know nothing about HTTP; the io layer translates
//! requests into the commands defined here.
//!
//! ## Module Organization
//!
//! - **ledger_service**: Create, rename and delete ledgers
//! - **kid_service**: Kid CRUD, reordering and ownership checks
//! - **account_service**: Account CRUD, reordering and ownership checks
//! - **balance_service**: Atomic add/remove on an account balance
//! - **full_ledger_service**: Read-only assembly of a whole ledger tree
//! - **ordering**: Fractional sort keys shared by kids and accounts
//! - **validation**: Field rules applied before any store round trip
//!
//! ## Business Rules
//!
//! - A ledger id is the only credential; whoever holds it can read and write
//!   everything below it
//! - Kids and accounts are read in `(sort_order, id)` order
//! - Balances have no floor; removing more than is held goes negative
//! - A missing entity is `Ok(None)`, never an error

pub mod account_service;
pub mod balance_service;
pub mod commands;
pub mod errors;
pub mod full_ledger_service;
pub mod kid_service;
pub mod ledger_service;
pub mod models;
pub mod ordering;
pub mod validation;

pub use account_service::AccountService;
pub use balance_service::BalanceService;
pub use errors::{DomainError, DomainResult};
pub use full_ledger_service::FullLedgerService;
pub use kid_service::KidService;
pub use ledger_service::LedgerService;
pub use ordering::OrderingEngine;
