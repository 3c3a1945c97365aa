//! # Family Ledger Backend
//!
//! Tracks, per family ledger, a list of kids and per kid a list of named
//! money accounts with running balances.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! ```text
//! IO Layer (REST API over axum)
//!     ↓
//! Domain Layer (services, ordering engine, validation)
//!     ↓
//! Storage Layer (SQLite repositories over sqlx)
//! ```
//!
//! ## Key Responsibilities
//!
//! - Initialize the database pool and the services that share it
//! - Set up the REST router with CORS for the browser frontend
//! - Keep every kid and account inside the ledger that owns it

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{http::Method, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{AccountService, BalanceService, FullLedgerService, KidService, LedgerService};
use crate::storage::DbConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub ledger_service: LedgerService,
    pub kid_service: KidService,
    pub account_service: AccountService,
    pub balance_service: BalanceService,
    pub full_ledger_service: FullLedgerService,
}

impl AppState {
    /// Build every service on top of one shared connection pool
    pub fn new(db: Arc<DbConnection>) -> Self {
        Self {
            ledger_service: LedgerService::new(db.clone()),
            kid_service: KidService::new(db.clone()),
            account_service: AccountService::new(db.clone()),
            balance_service: BalanceService::new(db.clone()),
            full_ledger_service: FullLedgerService::new(db),
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database");
    let db = DbConnection::new(&config.database_url, config.db_max_connections).await?;

    info!("Setting up application state");
    Ok(AppState::new(Arc::new(db)))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &AppConfig) -> Router {
    // CORS setup to allow the frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .nest("/api", io::router())
        .layer(cors)
        .with_state(app_state)
}
