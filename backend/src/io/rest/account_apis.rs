//! # REST API for Account Management
//!
//! Accounts are created and listed under their kid and addressed directly
//! afterwards, always inside the ledger path. Balance changes go through
//! the dedicated `/balance` route.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use tracing::info;

use super::error::{ApiError, ApiJson, ApiResult};
use super::kid_apis::ensure_kid_in_ledger;
use super::mappers::{to_reorder_command, AccountMapper};
use crate::AppState;
use shared::{
    Account, CreateAccountRequest, DeleteResponse, ReorderRequest, UpdateAccountRequest,
    UpdateBalanceRequest,
};

/// Create the account API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/ledgers/:ledger_id/kids/:kid_id/accounts",
            get(list_accounts).post(create_account),
        )
        .route(
            "/ledgers/:ledger_id/accounts/:account_id",
            get(get_account).put(update_account).delete(delete_account),
        )
        .route("/ledgers/:ledger_id/accounts/:account_id/balance", post(update_balance))
        .route("/ledgers/:ledger_id/accounts/:account_id/reorder", post(reorder_account))
}

/// 404 unless the account lives in this ledger
async fn ensure_account_in_ledger(
    state: &AppState,
    ledger_id: &str,
    account_id: i64,
) -> ApiResult<()> {
    if state.account_service.account_belongs_to_ledger(ledger_id, account_id).await? {
        Ok(())
    } else {
        Err(ApiError::not_found("Account"))
    }
}

/// List a kid's accounts in display order
pub async fn list_accounts(
    State(state): State<AppState>,
    Path((ledger_id, kid_id)): Path<(String, i64)>,
) -> ApiResult<Json<Vec<Account>>> {
    info!("GET /api/ledgers/:ledger_id/kids/{}/accounts", kid_id);

    ensure_kid_in_ledger(&state, &ledger_id, kid_id).await?;
    let accounts = state.account_service.list_accounts(kid_id).await?;
    Ok(Json(accounts.into_iter().map(AccountMapper::to_dto).collect()))
}

/// Create an account at the end of the kid's list
pub async fn create_account(
    State(state): State<AppState>,
    Path((ledger_id, kid_id)): Path<(String, i64)>,
    ApiJson(request): ApiJson<CreateAccountRequest>,
) -> ApiResult<(StatusCode, Json<Account>)> {
    info!("POST /api/ledgers/:ledger_id/kids/{}/accounts - request: {:?}", kid_id, request);

    ensure_kid_in_ledger(&state, &ledger_id, kid_id).await?;
    let created = state
        .account_service
        .create_account(AccountMapper::to_create_command(kid_id, request))
        .await?;
    match created {
        Some(account) => Ok((StatusCode::CREATED, Json(AccountMapper::to_dto(account)))),
        // The kid was deleted between the ownership check and the insert
        None => Err(ApiError::not_found("Kid")),
    }
}

/// Get an account by ID
pub async fn get_account(
    State(state): State<AppState>,
    Path((ledger_id, account_id)): Path<(String, i64)>,
) -> ApiResult<Json<Account>> {
    info!("GET /api/ledgers/:ledger_id/accounts/{}", account_id);

    ensure_account_in_ledger(&state, &ledger_id, account_id).await?;
    match state.account_service.get_account(account_id).await? {
        Some(account) => Ok(Json(AccountMapper::to_dto(account))),
        None => Err(ApiError::not_found("Account")),
    }
}

/// Rename an account
pub async fn update_account(
    State(state): State<AppState>,
    Path((ledger_id, account_id)): Path<(String, i64)>,
    ApiJson(request): ApiJson<UpdateAccountRequest>,
) -> ApiResult<Json<Account>> {
    info!("PUT /api/ledgers/:ledger_id/accounts/{} - request: {:?}", account_id, request);

    ensure_account_in_ledger(&state, &ledger_id, account_id).await?;
    let updated = state
        .account_service
        .update_account(account_id, AccountMapper::to_update_command(request))
        .await?;
    match updated {
        Some(account) => Ok(Json(AccountMapper::to_dto(account))),
        None => Err(ApiError::not_found("Account")),
    }
}

/// Delete an account.
/// An account from another ledger is left alone and reported as not deleted.
pub async fn delete_account(
    State(state): State<AppState>,
    Path((ledger_id, account_id)): Path<(String, i64)>,
) -> ApiResult<Json<DeleteResponse>> {
    info!("DELETE /api/ledgers/:ledger_id/accounts/{}", account_id);

    if !state.account_service.account_belongs_to_ledger(&ledger_id, account_id).await? {
        return Ok(Json(DeleteResponse { deleted: false }));
    }
    let deleted = state.account_service.delete_account(account_id).await?;
    Ok(Json(DeleteResponse { deleted }))
}

/// Add money to or remove money from an account
pub async fn update_balance(
    State(state): State<AppState>,
    Path((ledger_id, account_id)): Path<(String, i64)>,
    ApiJson(request): ApiJson<UpdateBalanceRequest>,
) -> ApiResult<Json<Account>> {
    info!("POST /api/ledgers/:ledger_id/accounts/{}/balance - request: {:?}", account_id, request);

    let command = AccountMapper::to_balance_command(account_id, request)?;
    ensure_account_in_ledger(&state, &ledger_id, account_id).await?;
    match state.balance_service.update_balance(command).await? {
        Some(account) => Ok(Json(AccountMapper::to_dto(account))),
        None => Err(ApiError::not_found("Account")),
    }
}

/// Move an account between new neighbors
pub async fn reorder_account(
    State(state): State<AppState>,
    Path((ledger_id, account_id)): Path<(String, i64)>,
    ApiJson(request): ApiJson<ReorderRequest>,
) -> ApiResult<Json<Account>> {
    info!(
        "POST /api/ledgers/:ledger_id/accounts/{}/reorder - request: {:?}",
        account_id, request
    );

    ensure_account_in_ledger(&state, &ledger_id, account_id).await?;
    match state
        .account_service
        .reorder_account(account_id, to_reorder_command(request))
        .await?
    {
        Some(account) => Ok(Json(AccountMapper::to_dto(account))),
        None => Err(ApiError::not_found("Account")),
    }
}
