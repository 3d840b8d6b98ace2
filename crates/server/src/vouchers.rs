//! Cash/check voucher endpoints.
//!
//! Vouchers move pending -> printed -> approved -> released; each transition
//! has its own route and every write leaves a footstep.

use api_types::{
    common::{IdsRequest, PageQuery},
    voucher::{
        CashCheckVoucherDetail, CashCheckVoucherNew, CashCheckVoucherUpdate, CashCheckVoucherView,
        VoucherEntryUpsert, VoucherEntryView, VoucherPrint, VoucherSearchResponse,
        VoucherStatus as ApiStatus,
    },
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
use engine::VoucherEntryInput;

fn map_status(status: engine::VoucherStatus) -> ApiStatus {
    match status {
        engine::VoucherStatus::Pending => ApiStatus::Pending,
        engine::VoucherStatus::Printed => ApiStatus::Printed,
        engine::VoucherStatus::Approved => ApiStatus::Approved,
        engine::VoucherStatus::Released => ApiStatus::Released,
    }
}

fn view(voucher: engine::CashCheckVoucher) -> CashCheckVoucherView {
    CashCheckVoucherView {
        id: voucher.id,
        member_profile_id: voucher.member_profile_id,
        pay_to: voucher.pay_to,
        description: voucher.description,
        status: map_status(voucher.status),
        cash_voucher_number: voucher.cash_voucher_number,
        total_debit: voucher.total_debit,
        total_credit: voucher.total_credit,
        print_count: voucher.print_count,
        entry_date: voucher.entry_date,
        printed_date: voucher.printed_date,
        printed_by: voucher.printed_by,
        approved_date: voucher.approved_date,
        approved_by: voucher.approved_by,
        released_date: voucher.released_date,
        released_by: voucher.released_by,
        transaction_batch_id: voucher.transaction_batch_id,
        created_at: voucher.created_at,
        updated_at: voucher.updated_at,
    }
}

fn entry_view(entry: engine::CashCheckVoucherEntry) -> VoucherEntryView {
    VoucherEntryView {
        id: entry.id,
        account_id: entry.account_id,
        description: entry.description,
        debit: entry.debit,
        credit: entry.credit,
    }
}

fn detail(
    (voucher, entries): (engine::CashCheckVoucher, Vec<engine::CashCheckVoucherEntry>),
) -> CashCheckVoucherDetail {
    CashCheckVoucherDetail {
        voucher: view(voucher),
        entries: entries.into_iter().map(entry_view).collect(),
    }
}

fn entry_inputs(entries: &[VoucherEntryUpsert]) -> Vec<VoucherEntryInput> {
    entries
        .iter()
        .map(|entry| VoucherEntryInput {
            id: entry.id,
            account_id: entry.account_id,
            description: entry.description.clone(),
            debit: entry.debit,
            credit: entry.credit,
        })
        .collect()
}

async fn page(
    session: &AuthSession,
    state: &ServerState,
    status: Option<engine::VoucherStatus>,
    query: PageQuery,
) -> Result<Json<VoucherSearchResponse>, ServerError> {
    let actor = session.actor()?;
    let (vouchers, next_cursor) = state
        .engine
        .list_cash_check_vouchers(
            actor,
            status,
            query.q.as_deref(),
            query.limit,
            query.cursor.as_deref(),
        )
        .await?;

    Ok(Json(VoucherSearchResponse {
        vouchers: vouchers.into_iter().map(view).collect(),
        next_cursor,
    }))
}

pub async fn list(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<VoucherSearchResponse>, ServerError> {
    page(&session, &state, None, query).await
}

pub async fn draft(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<VoucherSearchResponse>, ServerError> {
    page(&session, &state, Some(engine::VoucherStatus::Pending), query).await
}

pub async fn printed(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<VoucherSearchResponse>, ServerError> {
    page(&session, &state, Some(engine::VoucherStatus::Printed), query).await
}

pub async fn approved(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<VoucherSearchResponse>, ServerError> {
    page(&session, &state, Some(engine::VoucherStatus::Approved), query).await
}

pub async fn released(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<VoucherSearchResponse>, ServerError> {
    page(&session, &state, Some(engine::VoucherStatus::Released), query).await
}

pub async fn released_today(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<VoucherSearchResponse>, ServerError> {
    let actor = session.actor()?;
    let (vouchers, next_cursor) = state
        .engine
        .list_cash_check_vouchers_released_today(actor, query.limit, query.cursor.as_deref())
        .await?;

    Ok(Json(VoucherSearchResponse {
        vouchers: vouchers.into_iter().map(view).collect(),
        next_cursor,
    }))
}

pub async fn get(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CashCheckVoucherDetail>, ServerError> {
    let actor = session.actor()?;
    let voucher = state.engine.cash_check_voucher(actor, id).await?;

    Ok(Json(detail(voucher)))
}

pub async fn create(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Json(payload): Json<CashCheckVoucherNew>,
) -> Result<(StatusCode, Json<CashCheckVoucherDetail>), ServerError> {
    let actor = session.actor()?;
    let entries = entry_inputs(&payload.entries);
    let result = state
        .engine
        .create_cash_check_voucher(
            actor,
            payload.member_profile_id,
            &payload.pay_to,
            payload.description.as_deref(),
            &entries,
        )
        .await;
    state
        .footstep(
            actor,
            "cash-check-voucher",
            "create",
            format!("create voucher for {}", payload.pay_to),
            &result,
        )
        .await;

    Ok((StatusCode::CREATED, Json(detail(result?))))
}

pub async fn update(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CashCheckVoucherUpdate>,
) -> Result<Json<CashCheckVoucherDetail>, ServerError> {
    let actor = session.actor()?;
    let entries = entry_inputs(&payload.entries);
    let result = state
        .engine
        .update_cash_check_voucher(
            actor,
            id,
            payload.member_profile_id,
            &payload.pay_to,
            payload.description.as_deref(),
            &entries,
            &payload.deleted_entry_ids,
        )
        .await;
    state
        .footstep(
            actor,
            "cash-check-voucher",
            "update",
            format!("update voucher {id}"),
            &result,
        )
        .await;

    Ok(Json(detail(result?)))
}

pub async fn remove(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    let actor = session.actor()?;
    let result = state.engine.delete_cash_check_voucher(actor, id).await;
    state
        .footstep(
            actor,
            "cash-check-voucher",
            "delete",
            format!("delete voucher {id}"),
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
        .delete_cash_check_vouchers(actor, &payload.ids)
        .await;
    state
        .footstep(
            actor,
            "cash-check-voucher",
            "bulk-delete",
            format!("delete {} vouchers", payload.ids.len()),
            &result,
        )
        .await;
    result?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn print(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<VoucherPrint>,
) -> Result<Json<CashCheckVoucherView>, ServerError> {
    let actor = session.actor()?;
    let result = state
        .engine
        .print_cash_check_voucher(actor, id, &payload.cash_voucher_number)
        .await;
    state
        .footstep(
            actor,
            "cash-check-voucher",
            "print",
            format!("print voucher {id} as {}", payload.cash_voucher_number),
            &result,
        )
        .await;

    Ok(Json(view(result?)))
}

pub async fn print_only(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CashCheckVoucherView>, ServerError> {
    let actor = session.actor()?;
    let result = state.engine.print_only_cash_check_voucher(actor, id).await;
    state
        .footstep(
            actor,
            "cash-check-voucher",
            "print-only",
            format!("reprint voucher {id}"),
            &result,
        )
        .await;

    Ok(Json(view(result?)))
}

pub async fn print_undo(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CashCheckVoucherView>, ServerError> {
    let actor = session.actor()?;
    let result = state.engine.undo_print_cash_check_voucher(actor, id).await;
    state
        .footstep(
            actor,
            "cash-check-voucher",
            "print-undo",
            format!("undo print of voucher {id}"),
            &result,
        )
        .await;

    Ok(Json(view(result?)))
}

pub async fn approve(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CashCheckVoucherView>, ServerError> {
    let actor = session.actor()?;
    let result = state.engine.approve_cash_check_voucher(actor, id).await;
    state
        .footstep(
            actor,
            "cash-check-voucher",
            "approve",
            format!("approve voucher {id}"),
            &result,
        )
        .await;

    Ok(Json(view(result?)))
}

pub async fn approve_undo(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CashCheckVoucherView>, ServerError> {
    let actor = session.actor()?;
    let result = state
        .engine
        .undo_approve_cash_check_voucher(actor, id)
        .await;
    state
        .footstep(
            actor,
            "cash-check-voucher",
            "approve-undo",
            format!("undo approval of voucher {id}"),
            &result,
        )
        .await;

    Ok(Json(view(result?)))
}

pub async fn release(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CashCheckVoucherView>, ServerError> {
    let actor = session.actor()?;
    let result = state.engine.release_cash_check_voucher(actor, id).await;
    state
        .footstep(
            actor,
            "cash-check-voucher",
            "release",
            format!("release voucher {id}"),
            &result,
        )
        .await;

    Ok(Json(view(result?)))
}
