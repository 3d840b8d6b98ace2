//! General ledger read endpoints and the CSV export.

use api_types::{
    common::PageQuery,
    general_ledger::{
        GeneralLedgerListResponse, GeneralLedgerSource as ApiSource, GeneralLedgerView,
        LedgerQuery,
    },
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use csv::Writer;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    ServerError,
    server::{AuthSession, ServerState},
};
use engine::LedgerFilter;

fn map_source(source: engine::GeneralLedgerSource) -> ApiSource {
    match source {
        engine::GeneralLedgerSource::Withdraw => ApiSource::Withdraw,
        engine::GeneralLedgerSource::Deposit => ApiSource::Deposit,
        engine::GeneralLedgerSource::Journal => ApiSource::Journal,
        engine::GeneralLedgerSource::Payment => ApiSource::Payment,
        engine::GeneralLedgerSource::Adjustment => ApiSource::Adjustment,
        engine::GeneralLedgerSource::JournalVoucher => ApiSource::JournalVoucher,
        engine::GeneralLedgerSource::CheckVoucher => ApiSource::CheckVoucher,
        engine::GeneralLedgerSource::Loan => ApiSource::Loan,
        engine::GeneralLedgerSource::SavingsInterest => ApiSource::SavingsInterest,
        engine::GeneralLedgerSource::MutualContribution => ApiSource::MutualContribution,
    }
}

fn source_for(source: ApiSource) -> engine::GeneralLedgerSource {
    match source {
        ApiSource::Withdraw => engine::GeneralLedgerSource::Withdraw,
        ApiSource::Deposit => engine::GeneralLedgerSource::Deposit,
        ApiSource::Journal => engine::GeneralLedgerSource::Journal,
        ApiSource::Payment => engine::GeneralLedgerSource::Payment,
        ApiSource::Adjustment => engine::GeneralLedgerSource::Adjustment,
        ApiSource::JournalVoucher => engine::GeneralLedgerSource::JournalVoucher,
        ApiSource::CheckVoucher => engine::GeneralLedgerSource::CheckVoucher,
        ApiSource::Loan => engine::GeneralLedgerSource::Loan,
        ApiSource::SavingsInterest => engine::GeneralLedgerSource::SavingsInterest,
        ApiSource::MutualContribution => engine::GeneralLedgerSource::MutualContribution,
    }
}

fn view(row: engine::GeneralLedger) -> GeneralLedgerView {
    GeneralLedgerView {
        id: row.id,
        account_id: row.account_id,
        member_profile_id: row.member_profile_id,
        employee_user_id: row.employee_user_id,
        transaction_batch_id: row.transaction_batch_id,
        payment_type_id: row.payment_type_id,
        source: map_source(row.source),
        reference_number: row.reference_number,
        description: row.description,
        debit: row.debit,
        credit: row.credit,
        balance: row.balance,
        created_at: row.created_at,
    }
}

fn filter_for(query: &LedgerQuery) -> LedgerFilter {
    LedgerFilter {
        account_id: query.account_id,
        member_profile_id: query.member_profile_id,
        transaction_batch_id: query.transaction_batch_id,
        source: query.source.map(source_for),
    }
}

async fn page(
    session: &AuthSession,
    state: &ServerState,
    filter: LedgerFilter,
    limit: Option<u64>,
    cursor: Option<&str>,
) -> Result<Json<GeneralLedgerListResponse>, ServerError> {
    let actor = session.actor()?;
    let (entries, next_cursor) = state
        .engine
        .list_general_ledger(actor, &filter, limit, cursor)
        .await?;

    Ok(Json(GeneralLedgerListResponse {
        entries: entries.into_iter().map(view).collect(),
        next_cursor,
    }))
}

pub async fn list(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Query(query): Query<LedgerQuery>,
) -> Result<Json<GeneralLedgerListResponse>, ServerError> {
    let filter = filter_for(&query);
    page(&session, &state, filter, query.limit, query.cursor.as_deref()).await
}

pub async fn by_account(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Json<GeneralLedgerListResponse>, ServerError> {
    let filter = LedgerFilter {
        account_id: Some(id),
        ..LedgerFilter::default()
    };
    page(&session, &state, filter, query.limit, query.cursor.as_deref()).await
}

pub async fn by_member_profile(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Json<GeneralLedgerListResponse>, ServerError> {
    let filter = LedgerFilter {
        member_profile_id: Some(id),
        ..LedgerFilter::default()
    };
    page(&session, &state, filter, query.limit, query.cursor.as_deref()).await
}

pub async fn by_batch(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Json<GeneralLedgerListResponse>, ServerError> {
    let filter = LedgerFilter {
        transaction_batch_id: Some(id),
        ..LedgerFilter::default()
    };
    page(&session, &state, filter, query.limit, query.cursor.as_deref()).await
}

pub async fn export(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Query(query): Query<LedgerQuery>,
) -> Result<Response, ServerError> {
    let actor = session.actor()?;
    let filter = filter_for(&query);
    let rows = state.engine.export_general_ledger(actor, &filter).await?;

    #[derive(Serialize)]
    struct ExportRow {
        created_at: String,
        source: &'static str,
        reference_number: String,
        description: Option<String>,
        debit: i64,
        credit: i64,
        balance: i64,
        account_id: String,
        member_profile_id: Option<String>,
        transaction_batch_id: Option<String>,
        id: String,
    }

    let mut writer = Writer::from_writer(vec![]);
    for row in rows {
        writer
            .serialize(ExportRow {
                created_at: row.created_at.to_rfc3339(),
                source: row.source.as_str(),
                reference_number: row.reference_number,
                description: row.description,
                debit: row.debit,
                credit: row.credit,
                balance: row.balance,
                account_id: row.account_id.to_string(),
                member_profile_id: row.member_profile_id.map(|id| id.to_string()),
                transaction_batch_id: row.transaction_batch_id.map(|id| id.to_string()),
                id: row.id.to_string(),
            })
            .map_err(|err| {
                tracing::error!("failed to serialize export row: {err}");
                ServerError::Generic("failed to build export".to_string())
            })?;
    }

    let data = writer.into_inner().map_err(|err| {
        tracing::error!("failed to finalize export: {err}");
        ServerError::Generic("failed to build export".to_string())
    })?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"general-ledger.csv\"",
            ),
        ],
        data,
    )
        .into_response())
}
