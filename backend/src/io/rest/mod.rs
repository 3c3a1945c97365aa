//! # REST API Interface Layer
//!
//! Provides HTTP REST endpoints for the family ledger. This layer handles:
//! - JSON request/response serialization through the `shared` DTOs
//! - Mapping DTOs to domain commands and domain models back to DTOs
//! - Ledger ownership checks on every kid and account route
//! - Error translation from domain errors to HTTP status codes
//!
//! ## Status Codes
//!
//! | Outcome                          | Status |
//! |----------------------------------|--------|
//! | success                          | 200    |
//! | created                          | 201    |
//! | validation failure               | 400    |
//! | missing, or under another ledger | 404    |
//! | reorder neighbor not a sibling   | 409    |
//! | creation or storage failure      | 500    |
//!
//! Business rules live in the domain layer; handlers only translate.

use axum::Router;

use crate::AppState;

pub mod account_apis;
pub mod error;
pub mod kid_apis;
pub mod ledger_apis;
pub mod mappers;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::{ApiError, ApiJson, ApiResult};

/// All REST routes, to be nested under `/api`
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(ledger_apis::router())
        .merge(kid_apis::router())
        .merge(account_apis::router())
}
