//! Transaction batch endpoints.
//!
//! A batch is one teller's working session; ending it snapshots the
//! balancing totals against the counted cash.

use api_types::{
    common::PageQuery,
    transaction_batch::{BatchEnd, BatchSearchResponse, BatchStart, TransactionBatchView},
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    ServerError,
    server::{AuthSession, ServerState},
};

fn view(batch: engine::TransactionBatch) -> TransactionBatchView {
    TransactionBatchView {
        id: batch.id,
        batch_name: batch.batch_name,
        employee_user_id: batch.employee_user_id,
        is_closed: batch.is_closed,
        beginning_balance: batch.beginning_balance,
        deposit_in_bank: batch.deposit_in_bank,
        cash_count_total: batch.cash_count_total,
        total_cash_collection: batch.total_cash_collection,
        total_deposit_entry: batch.total_deposit_entry,
        total_cash_handled: batch.total_cash_handled,
        total_withdrawals: batch.total_withdrawals,
        total_supposed_remittance: batch.total_supposed_remittance,
        total_check_remittance: batch.total_check_remittance,
        total_online_remittance: batch.total_online_remittance,
        total_cash_on_hand: batch.total_cash_on_hand,
        total_deposit_in_bank: batch.total_deposit_in_bank,
        total_actual_remittance: batch.total_actual_remittance,
        total_actual_supposed_comparison: batch.total_actual_supposed_comparison,
        grand_total: batch.grand_total,
        ended_at: batch.ended_at,
        ended_by: batch.ended_by,
        created_at: batch.created_at,
    }
}

pub async fn start(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Json(payload): Json<BatchStart>,
) -> Result<(StatusCode, Json<TransactionBatchView>), ServerError> {
    let actor = session.actor()?;
    let result = state
        .engine
        .start_transaction_batch(
            actor,
            &payload.batch_name,
            payload.beginning_balance,
            payload.deposit_in_bank,
        )
        .await;
    state
        .footstep(
            actor,
            "transaction-batch",
            "start",
            format!("start batch {}", payload.batch_name),
            &result,
        )
        .await;

    Ok((StatusCode::CREATED, Json(view(result?))))
}

pub async fn current(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
) -> Result<Json<TransactionBatchView>, ServerError> {
    let actor = session.actor()?;
    let batch = state.engine.current_transaction_batch(actor).await?;

    Ok(Json(view(batch)))
}

pub async fn list(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<BatchSearchResponse>, ServerError> {
    let actor = session.actor()?;
    let (batches, next_cursor) = state
        .engine
        .list_transaction_batches(actor, query.limit, query.cursor.as_deref())
        .await?;

    Ok(Json(BatchSearchResponse {
        batches: batches.into_iter().map(view).collect(),
        next_cursor,
    }))
}

pub async fn get(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TransactionBatchView>, ServerError> {
    let actor = session.actor()?;
    let batch = state.engine.transaction_batch(actor, id).await?;

    Ok(Json(view(batch)))
}

pub async fn end(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<BatchEnd>,
) -> Result<Json<TransactionBatchView>, ServerError> {
    let actor = session.actor()?;
    let result = state
        .engine
        .end_transaction_batch(actor, id, payload.cash_count_total)
        .await;
    state
        .footstep(
            actor,
            "transaction-batch",
            "end",
            format!("end batch {id}"),
            &result,
        )
        .await;

    Ok(Json(view(result?)))
}
