//! Company directory endpoints.

use api_types::{
    common::{IdsRequest, PageQuery},
    company::{CompanyNew, CompanySearchResponse, CompanyUpdate, CompanyView},
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

fn view(company: engine::Company) -> CompanyView {
    CompanyView {
        id: company.id,
        name: company.name,
        description: company.description,
        contact_number: company.contact_number,
        created_at: company.created_at,
        updated_at: company.updated_at,
    }
}

pub async fn list(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<CompanySearchResponse>, ServerError> {
    let actor = session.actor()?;
    let (companies, next_cursor) = state
        .engine
        .list_companies(
            actor,
            query.q.as_deref(),
            query.limit,
            query.cursor.as_deref(),
        )
        .await?;

    Ok(Json(CompanySearchResponse {
        companies: companies.into_iter().map(view).collect(),
        next_cursor,
    }))
}

pub async fn get(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CompanyView>, ServerError> {
    let actor = session.actor()?;
    let company = state.engine.company(actor, id).await?;

    Ok(Json(view(company)))
}

pub async fn create(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Json(payload): Json<CompanyNew>,
) -> Result<(StatusCode, Json<CompanyView>), ServerError> {
    let actor = session.actor()?;
    let result = state
        .engine
        .create_company(
            actor,
            &payload.name,
            payload.description.as_deref(),
            payload.contact_number.as_deref(),
        )
        .await;
    state
        .footstep(
            actor,
            "company",
            "create",
            format!("create company {}", payload.name),
            &result,
        )
        .await;

    Ok((StatusCode::CREATED, Json(view(result?))))
}

pub async fn update(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CompanyUpdate>,
) -> Result<Json<CompanyView>, ServerError> {
    let actor = session.actor()?;
    let result = state
        .engine
        .update_company(
            actor,
            id,
            &payload.name,
            payload.description.as_deref(),
            payload.contact_number.as_deref(),
        )
        .await;
    state
        .footstep(
            actor,
            "company",
            "update",
            format!("update company {id}"),
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
    let result = state.engine.delete_company(actor, id).await;
    state
        .footstep(
            actor,
            "company",
            "delete",
            format!("delete company {id}"),
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
    let result = state.engine.delete_companies(actor, &payload.ids).await;
    state
        .footstep(
            actor,
            "company",
            "bulk-delete",
            format!("delete {} companies", payload.ids.len()),
            &result,
        )
        .await;
    result?;

    Ok(StatusCode::NO_CONTENT)
}
