//! Chart-of-accounts endpoints, including the per-account change history.

use api_types::{
    account::{
        AccountHistoryListResponse, AccountHistoryView, AccountNew, AccountSearchResponse,
        AccountUpdate, AccountView, GeneralLedgerType as ApiLedgerType,
    },
    common::{IdsRequest, PageQuery},
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

fn map_ledger_type(value: engine::GeneralLedgerType) -> ApiLedgerType {
    match value {
        engine::GeneralLedgerType::Assets => ApiLedgerType::Assets,
        engine::GeneralLedgerType::Liabilities => ApiLedgerType::Liabilities,
        engine::GeneralLedgerType::Equity => ApiLedgerType::Equity,
        engine::GeneralLedgerType::Revenue => ApiLedgerType::Revenue,
        engine::GeneralLedgerType::Expenses => ApiLedgerType::Expenses,
    }
}

fn ledger_type_for(value: ApiLedgerType) -> engine::GeneralLedgerType {
    match value {
        ApiLedgerType::Assets => engine::GeneralLedgerType::Assets,
        ApiLedgerType::Liabilities => engine::GeneralLedgerType::Liabilities,
        ApiLedgerType::Equity => engine::GeneralLedgerType::Equity,
        ApiLedgerType::Revenue => engine::GeneralLedgerType::Revenue,
        ApiLedgerType::Expenses => engine::GeneralLedgerType::Expenses,
    }
}

fn view(account: engine::Account) -> AccountView {
    AccountView {
        id: account.id,
        name: account.name,
        description: account.description,
        general_ledger_type: map_ledger_type(account.general_ledger_type),
        created_at: account.created_at,
        updated_at: account.updated_at,
    }
}

fn history_view(row: engine::AccountHistory) -> AccountHistoryView {
    AccountHistoryView {
        id: row.id,
        account_id: row.account_id,
        name: row.name,
        description: row.description,
        general_ledger_type: map_ledger_type(row.general_ledger_type),
        changed_at: row.changed_at,
        changed_by: row.changed_by,
    }
}

pub async fn list(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<AccountSearchResponse>, ServerError> {
    let actor = session.actor()?;
    let (accounts, next_cursor) = state
        .engine
        .list_accounts(
            actor,
            query.q.as_deref(),
            query.limit,
            query.cursor.as_deref(),
        )
        .await?;

    Ok(Json(AccountSearchResponse {
        accounts: accounts.into_iter().map(view).collect(),
        next_cursor,
    }))
}

pub async fn get(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AccountView>, ServerError> {
    let actor = session.actor()?;
    let account = state.engine.account(actor, id).await?;

    Ok(Json(view(account)))
}

pub async fn history(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Json<AccountHistoryListResponse>, ServerError> {
    let actor = session.actor()?;
    let (history, next_cursor) = state
        .engine
        .account_history(actor, id, query.limit, query.cursor.as_deref())
        .await?;

    Ok(Json(AccountHistoryListResponse {
        history: history.into_iter().map(history_view).collect(),
        next_cursor,
    }))
}

pub async fn create(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Json(payload): Json<AccountNew>,
) -> Result<(StatusCode, Json<AccountView>), ServerError> {
    let actor = session.actor()?;
    let result = state
        .engine
        .create_account(
            actor,
            &payload.name,
            payload.description.as_deref(),
            ledger_type_for(payload.general_ledger_type),
        )
        .await;
    state
        .footstep(
            actor,
            "account",
            "create",
            format!("create account {}", payload.name),
            &result,
        )
        .await;

    Ok((StatusCode::CREATED, Json(view(result?))))
}

pub async fn update(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AccountUpdate>,
) -> Result<Json<AccountView>, ServerError> {
    let actor = session.actor()?;
    let result = state
        .engine
        .update_account(
            actor,
            id,
            &payload.name,
            payload.description.as_deref(),
            ledger_type_for(payload.general_ledger_type),
        )
        .await;
    state
        .footstep(
            actor,
            "account",
            "update",
            format!("update account {id}"),
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
    let result = state.engine.delete_account(actor, id).await;
    state
        .footstep(
            actor,
            "account",
            "delete",
            format!("delete account {id}"),
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
    let result = state.engine.delete_accounts(actor, &payload.ids).await;
    state
        .footstep(
            actor,
            "account",
            "bulk-delete",
            format!("delete {} accounts", payload.ids.len()),
            &result,
        )
        .await;
    result?;

    Ok(StatusCode::NO_CONTENT)
}
