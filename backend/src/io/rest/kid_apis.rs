//! # REST API for Kid Management
//!
//! Every route is nested under a ledger. A kid id that exists but belongs to
//! a different ledger is answered exactly like one that does not exist.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use tracing::info;

use super::error::{ApiError, ApiJson, ApiResult};
use super::mappers::{to_reorder_command, KidMapper};
use crate::AppState;
use shared::{CreateKidRequest, DeleteResponse, Kid, ReorderRequest, UpdateKidRequest};

/// Create the kid API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ledgers/:ledger_id/kids", get(list_kids).post(create_kid))
        .route(
            "/ledgers/:ledger_id/kids/:kid_id",
            get(get_kid).put(update_kid).delete(delete_kid),
        )
        .route("/ledgers/:ledger_id/kids/:kid_id/reorder", post(reorder_kid))
}

/// 404 unless the kid lives in this ledger
pub(crate) async fn ensure_kid_in_ledger(
    state: &AppState,
    ledger_id: &str,
    kid_id: i64,
) -> ApiResult<()> {
    if state.kid_service.kid_belongs_to_ledger(ledger_id, kid_id).await? {
        Ok(())
    } else {
        Err(ApiError::not_found("Kid"))
    }
}

/// List a ledger's kids in display order
pub async fn list_kids(
    State(state): State<AppState>,
    Path(ledger_id): Path<String>,
) -> ApiResult<Json<Vec<Kid>>> {
    info!("GET /api/ledgers/:ledger_id/kids");

    if state.ledger_service.get_ledger(&ledger_id).await?.is_none() {
        return Err(ApiError::not_found("Ledger"));
    }
    let kids = state.kid_service.list_kids(&ledger_id).await?;
    Ok(Json(kids.into_iter().map(KidMapper::to_dto).collect()))
}

/// Create a kid at the end of the ledger's list
pub async fn create_kid(
    State(state): State<AppState>,
    Path(ledger_id): Path<String>,
    ApiJson(request): ApiJson<CreateKidRequest>,
) -> ApiResult<(StatusCode, Json<Kid>)> {
    info!("POST /api/ledgers/:ledger_id/kids - request: {:?}", request);

    let created = state
        .kid_service
        .create_kid(KidMapper::to_create_command(ledger_id, request))
        .await?;
    match created {
        Some(kid) => Ok((StatusCode::CREATED, Json(KidMapper::to_dto(kid)))),
        None => Err(ApiError::not_found("Ledger")),
    }
}

/// Get a kid by ID
pub async fn get_kid(
    State(state): State<AppState>,
    Path((ledger_id, kid_id)): Path<(String, i64)>,
) -> ApiResult<Json<Kid>> {
    info!("GET /api/ledgers/:ledger_id/kids/{}", kid_id);

    ensure_kid_in_ledger(&state, &ledger_id, kid_id).await?;
    match state.kid_service.get_kid(kid_id).await? {
        Some(kid) => Ok(Json(KidMapper::to_dto(kid))),
        None => Err(ApiError::not_found("Kid")),
    }
}

/// Update a kid's name and/or emoji
pub async fn update_kid(
    State(state): State<AppState>,
    Path((ledger_id, kid_id)): Path<(String, i64)>,
    ApiJson(request): ApiJson<UpdateKidRequest>,
) -> ApiResult<Json<Kid>> {
    info!("PUT /api/ledgers/:ledger_id/kids/{} - request: {:?}", kid_id, request);

    ensure_kid_in_ledger(&state, &ledger_id, kid_id).await?;
    let updated = state
        .kid_service
        .update_kid(kid_id, KidMapper::to_update_command(request))
        .await?;
    match updated {
        Some(kid) => Ok(Json(KidMapper::to_dto(kid))),
        None => Err(ApiError::not_found("Kid")),
    }
}

/// Delete a kid and its accounts.
/// A kid from another ledger is left alone and reported as not deleted.
pub async fn delete_kid(
    State(state): State<AppState>,
    Path((ledger_id, kid_id)): Path<(String, i64)>,
) -> ApiResult<Json<DeleteResponse>> {
    info!("DELETE /api/ledgers/:ledger_id/kids/{}", kid_id);

    if !state.kid_service.kid_belongs_to_ledger(&ledger_id, kid_id).await? {
        return Ok(Json(DeleteResponse { deleted: false }));
    }
    let deleted = state.kid_service.delete_kid(kid_id).await?;
    Ok(Json(DeleteResponse { deleted }))
}

/// Move a kid between new neighbors
pub async fn reorder_kid(
    State(state): State<AppState>,
    Path((ledger_id, kid_id)): Path<(String, i64)>,
    ApiJson(request): ApiJson<ReorderRequest>,
) -> ApiResult<Json<Kid>> {
    info!("POST /api/ledgers/:ledger_id/kids/{}/reorder - request: {:?}", kid_id, request);

    ensure_kid_in_ledger(&state, &ledger_id, kid_id).await?;
    match state.kid_service.reorder_kid(kid_id, to_reorder_command(request)).await? {
        Some(kid) => Ok(Json(KidMapper::to_dto(kid))),
        None => Err(ApiError::not_found("Kid")),
    }
}
