//! Payment type endpoints.

use api_types::{
    common::{IdsRequest, PageQuery},
    payment_type::{
        PaymentKind as ApiKind, PaymentTypeNew, PaymentTypeSearchResponse, PaymentTypeUpdate,
        PaymentTypeView,
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

fn map_kind(kind: engine::PaymentKind) -> ApiKind {
    match kind {
        engine::PaymentKind::Cash => ApiKind::Cash,
        engine::PaymentKind::Check => ApiKind::Check,
        engine::PaymentKind::Online => ApiKind::Online,
    }
}

fn kind_for(kind: ApiKind) -> engine::PaymentKind {
    match kind {
        ApiKind::Cash => engine::PaymentKind::Cash,
        ApiKind::Check => engine::PaymentKind::Check,
        ApiKind::Online => engine::PaymentKind::Online,
    }
}

fn view(payment_type: engine::PaymentType) -> PaymentTypeView {
    PaymentTypeView {
        id: payment_type.id,
        name: payment_type.name,
        description: payment_type.description,
        kind: map_kind(payment_type.kind),
        created_at: payment_type.created_at,
        updated_at: payment_type.updated_at,
    }
}

pub async fn list(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PaymentTypeSearchResponse>, ServerError> {
    let actor = session.actor()?;
    let (payment_types, next_cursor) = state
        .engine
        .list_payment_types(
            actor,
            query.q.as_deref(),
            query.limit,
            query.cursor.as_deref(),
        )
        .await?;

    Ok(Json(PaymentTypeSearchResponse {
        payment_types: payment_types.into_iter().map(view).collect(),
        next_cursor,
    }))
}

pub async fn get(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PaymentTypeView>, ServerError> {
    let actor = session.actor()?;
    let payment_type = state.engine.payment_type(actor, id).await?;

    Ok(Json(view(payment_type)))
}

pub async fn create(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Json(payload): Json<PaymentTypeNew>,
) -> Result<(StatusCode, Json<PaymentTypeView>), ServerError> {
    let actor = session.actor()?;
    let result = state
        .engine
        .create_payment_type(
            actor,
            &payload.name,
            payload.description.as_deref(),
            kind_for(payload.kind),
        )
        .await;
    state
        .footstep(
            actor,
            "payment-type",
            "create",
            format!("create payment type {}", payload.name),
            &result,
        )
        .await;

    Ok((StatusCode::CREATED, Json(view(result?))))
}

pub async fn update(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PaymentTypeUpdate>,
) -> Result<Json<PaymentTypeView>, ServerError> {
    let actor = session.actor()?;
    let result = state
        .engine
        .update_payment_type(
            actor,
            id,
            &payload.name,
            payload.description.as_deref(),
            kind_for(payload.kind),
        )
        .await;
    state
        .footstep(
            actor,
            "payment-type",
            "update",
            format!("update payment type {id}"),
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
    let result = state.engine.delete_payment_type(actor, id).await;
    state
        .footstep(
            actor,
            "payment-type",
            "delete",
            format!("delete payment type {id}"),
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
    let result = state.engine.delete_payment_types(actor, &payload.ids).await;
    state
        .footstep(
            actor,
            "payment-type",
            "bulk-delete",
            format!("delete {} payment types", payload.ids.len()),
            &result,
        )
        .await;
    result?;

    Ok(StatusCode::NO_CONTENT)
}
