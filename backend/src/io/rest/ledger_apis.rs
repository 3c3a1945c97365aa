//! # REST API for Ledger Management
//!
//! Endpoints for creating, reading, renaming and deleting ledgers, plus the
//! full-tree read used to render a ledger page.
//!
//! The ledger id in the path is the credential, so it is never written to
//! the logs.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use tracing::info;

use super::error::{ApiError, ApiJson, ApiResult};
use super::mappers::LedgerMapper;
use crate::AppState;
use shared::{
    CreateLedgerRequest, DeleteResponse, FullLedger, Ledger, UpdateLedgerRequest,
};

/// Create the ledger API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ledgers", post(create_ledger))
        .route(
            "/ledgers/:ledger_id",
            get(get_ledger).put(update_ledger).delete(delete_ledger),
        )
        .route("/ledgers/:ledger_id/full", get(get_full_ledger))
}

/// Create a new ledger
pub async fn create_ledger(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateLedgerRequest>,
) -> ApiResult<(StatusCode, Json<Ledger>)> {
    info!("POST /api/ledgers - request: {:?}", request);

    let ledger = state
        .ledger_service
        .create_ledger(LedgerMapper::to_create_command(request))
        .await?;
    Ok((StatusCode::CREATED, Json(LedgerMapper::to_dto(ledger))))
}

/// Get a ledger by ID
pub async fn get_ledger(
    State(state): State<AppState>,
    Path(ledger_id): Path<String>,
) -> ApiResult<Json<Ledger>> {
    info!("GET /api/ledgers/:ledger_id");

    match state.ledger_service.get_ledger(&ledger_id).await? {
        Some(ledger) => Ok(Json(LedgerMapper::to_dto(ledger))),
        None => Err(ApiError::not_found("Ledger")),
    }
}

/// Rename a ledger
pub async fn update_ledger(
    State(state): State<AppState>,
    Path(ledger_id): Path<String>,
    ApiJson(request): ApiJson<UpdateLedgerRequest>,
) -> ApiResult<Json<Ledger>> {
    info!("PUT /api/ledgers/:ledger_id - request: {:?}", request);

    let updated = state
        .ledger_service
        .update_ledger(&ledger_id, LedgerMapper::to_update_command(request))
        .await?;
    match updated {
        Some(ledger) => Ok(Json(LedgerMapper::to_dto(ledger))),
        None => Err(ApiError::not_found("Ledger")),
    }
}

/// Delete a ledger with all of its kids and accounts
pub async fn delete_ledger(
    State(state): State<AppState>,
    Path(ledger_id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    info!("DELETE /api/ledgers/:ledger_id");

    let deleted = state.ledger_service.delete_ledger(&ledger_id).await?;
    Ok(Json(DeleteResponse { deleted }))
}

/// Get the ledger with its kids and their accounts, all in display order
pub async fn get_full_ledger(
    State(state): State<AppState>,
    Path(ledger_id): Path<String>,
) -> ApiResult<Json<FullLedger>> {
    info!("GET /api/ledgers/:ledger_id/full");

    match state.full_ledger_service.get_full_ledger(&ledger_id).await? {
        Some(full) => Ok(Json(LedgerMapper::to_full_ledger_dto(full))),
        None => Err(ApiError::not_found("Ledger")),
    }
}
