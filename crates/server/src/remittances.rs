//! Check and online remittance endpoints.
//!
//! Both resources share one engine surface; each route pair pins the kind.

use api_types::{
    common::PageQuery,
    remittance::{RemittanceListResponse, RemittanceNew, RemittanceUpdate, RemittanceView},
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
use engine::{RemittanceInput, RemittanceKind};

fn module(kind: RemittanceKind) -> &'static str {
    match kind {
        RemittanceKind::Check => "check-remittance",
        RemittanceKind::Online => "online-remittance",
    }
}

fn view(remittance: engine::Remittance) -> RemittanceView {
    RemittanceView {
        id: remittance.id,
        transaction_batch_id: remittance.transaction_batch_id,
        employee_user_id: remittance.employee_user_id,
        reference_number: remittance.reference_number,
        account_name: remittance.account_name,
        amount: remittance.amount,
        date_entry: remittance.date_entry,
        description: remittance.description,
        created_at: remittance.created_at,
        updated_at: remittance.updated_at,
    }
}

async fn list(
    kind: RemittanceKind,
    session: AuthSession,
    state: ServerState,
    query: PageQuery,
) -> Result<Json<RemittanceListResponse>, ServerError> {
    let actor = session.actor()?;
    let (remittances, next_cursor) = state
        .engine
        .list_remittances(actor, kind, query.limit, query.cursor.as_deref())
        .await?;

    Ok(Json(RemittanceListResponse {
        remittances: remittances.into_iter().map(view).collect(),
        next_cursor,
    }))
}

async fn create(
    kind: RemittanceKind,
    session: AuthSession,
    state: ServerState,
    payload: RemittanceNew,
) -> Result<(StatusCode, Json<RemittanceView>), ServerError> {
    let actor = session.actor()?;
    let input = RemittanceInput {
        reference_number: payload.reference_number,
        account_name: payload.account_name,
        amount: payload.amount,
        date_entry: payload.date_entry,
        description: payload.description,
    };
    let result = state.engine.create_remittance(actor, kind, &input).await;
    state
        .footstep(
            actor,
            module(kind),
            "create",
            format!("create remittance {}", input.reference_number),
            &result,
        )
        .await;

    Ok((StatusCode::CREATED, Json(view(result?))))
}

async fn update(
    kind: RemittanceKind,
    session: AuthSession,
    state: ServerState,
    id: Uuid,
    payload: RemittanceUpdate,
) -> Result<Json<RemittanceView>, ServerError> {
    let actor = session.actor()?;
    let input = RemittanceInput {
        reference_number: payload.reference_number,
        account_name: payload.account_name,
        amount: payload.amount,
        date_entry: payload.date_entry,
        description: payload.description,
    };
    let result = state
        .engine
        .update_remittance(actor, kind, id, &input)
        .await;
    state
        .footstep(
            actor,
            module(kind),
            "update",
            format!("update remittance {id}"),
            &result,
        )
        .await;

    Ok(Json(view(result?)))
}

async fn remove(
    kind: RemittanceKind,
    session: AuthSession,
    state: ServerState,
    id: Uuid,
) -> Result<StatusCode, ServerError> {
    let actor = session.actor()?;
    let result = state.engine.delete_remittance(actor, kind, id).await;
    state
        .footstep(
            actor,
            module(kind),
            "delete",
            format!("delete remittance {id}"),
            &result,
        )
        .await;
    result?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn check_list(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<RemittanceListResponse>, ServerError> {
    list(RemittanceKind::Check, session, state, query).await
}

pub async fn check_create(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Json(payload): Json<RemittanceNew>,
) -> Result<(StatusCode, Json<RemittanceView>), ServerError> {
    create(RemittanceKind::Check, session, state, payload).await
}

pub async fn check_update(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RemittanceUpdate>,
) -> Result<Json<RemittanceView>, ServerError> {
    update(RemittanceKind::Check, session, state, id, payload).await
}

pub async fn check_remove(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    remove(RemittanceKind::Check, session, state, id).await
}

pub async fn online_list(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<RemittanceListResponse>, ServerError> {
    list(RemittanceKind::Online, session, state, query).await
}

pub async fn online_create(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Json(payload): Json<RemittanceNew>,
) -> Result<(StatusCode, Json<RemittanceView>), ServerError> {
    create(RemittanceKind::Online, session, state, payload).await
}

pub async fn online_update(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RemittanceUpdate>,
) -> Result<Json<RemittanceView>, ServerError> {
    update(RemittanceKind::Online, session, state, id, payload).await
}

pub async fn online_remove(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    remove(RemittanceKind::Online, session, state, id).await
}
