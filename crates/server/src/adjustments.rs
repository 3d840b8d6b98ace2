//! Adjustment entry endpoints.
//!
//! Amounts are fixed once posted; updates may only touch the reference
//! number and description.

use api_types::{
    adjustment::{
        AdjustmentEntryNew, AdjustmentEntryUpdate, AdjustmentEntryView, AdjustmentSearchResponse,
    },
    common::{BalanceTotals, IdsRequest, PageQuery},
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
use engine::AdjustmentEntryInput;

fn view(entry: engine::AdjustmentEntry) -> AdjustmentEntryView {
    AdjustmentEntryView {
        id: entry.id,
        account_id: entry.account_id,
        member_profile_id: entry.member_profile_id,
        employee_user_id: entry.employee_user_id,
        payment_type_id: entry.payment_type_id,
        reference_number: entry.reference_number,
        description: entry.description,
        debit: entry.debit,
        credit: entry.credit,
        created_at: entry.created_at,
        updated_at: entry.updated_at,
    }
}

pub async fn list(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<AdjustmentSearchResponse>, ServerError> {
    let actor = session.actor()?;
    let (entries, next_cursor) = state
        .engine
        .list_adjustment_entries(actor, query.limit, query.cursor.as_deref())
        .await?;

    Ok(Json(AdjustmentSearchResponse {
        entries: entries.into_iter().map(view).collect(),
        next_cursor,
    }))
}

pub async fn total(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
) -> Result<Json<BalanceTotals>, ServerError> {
    let actor = session.actor()?;
    let summary = state.engine.adjustment_totals(actor).await?;

    Ok(Json(BalanceTotals {
        total_debit: summary.total_debit,
        total_credit: summary.total_credit,
        balance: summary.balance,
        is_balanced: summary.is_balanced,
    }))
}

pub async fn get(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AdjustmentEntryView>, ServerError> {
    let actor = session.actor()?;
    let entry = state.engine.adjustment_entry(actor, id).await?;

    Ok(Json(view(entry)))
}

pub async fn create(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Json(payload): Json<AdjustmentEntryNew>,
) -> Result<(StatusCode, Json<AdjustmentEntryView>), ServerError> {
    let actor = session.actor()?;
    let input = AdjustmentEntryInput {
        account_id: payload.account_id,
        member_profile_id: payload.member_profile_id,
        payment_type_id: payload.payment_type_id,
        reference_number: payload.reference_number,
        description: payload.description,
        debit: payload.debit,
        credit: payload.credit,
    };
    let result = state.engine.create_adjustment_entry(actor, &input).await;
    state
        .footstep(
            actor,
            "adjustment-entry",
            "create",
            format!("create adjustment {}", input.reference_number),
            &result,
        )
        .await;

    Ok((StatusCode::CREATED, Json(view(result?))))
}

pub async fn update(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AdjustmentEntryUpdate>,
) -> Result<Json<AdjustmentEntryView>, ServerError> {
    let actor = session.actor()?;
    let result = state
        .engine
        .update_adjustment_entry(
            actor,
            id,
            &payload.reference_number,
            payload.description.as_deref(),
        )
        .await;
    state
        .footstep(
            actor,
            "adjustment-entry",
            "update",
            format!("update adjustment {id}"),
            &result,
        )
        .await;

    Ok(Json(view(result?)))
}

pub async fn remove(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    let actor = session.actor()?;
    let result = state.engine.delete_adjustment_entry(actor, id).await;
    state
        .footstep(
            actor,
            "adjustment-entry",
            "delete",
            format!("delete adjustment {id}"),
            &result,
        )
        .await;
    result?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_many(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Json(payload): Json<IdsRequest>,
) -> Result<StatusCode, ServerError> {
    let actor = session.actor()?;
    let result = state
        .engine
        .delete_adjustment_entries(actor, &payload.ids)
        .await;
    state
        .footstep(
            actor,
            "adjustment-entry",
            "bulk-delete",
            format!("delete {} adjustments", payload.ids.len()),
            &result,
        )
        .await;
    result?;

    Ok(StatusCode::NO_CONTENT)
}
