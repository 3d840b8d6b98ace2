//! Activity trail endpoints.

use api_types::{
    common::PageQuery,
    footstep::{FootstepListResponse, FootstepView},
};
use axum::{
    Extension, Json,
    extract::{Query, State},
};

use crate::{
    ServerError,
    server::{AuthSession, ServerState},
};

fn view(footstep: engine::Footstep) -> FootstepView {
    FootstepView {
        id: footstep.id,
        module: footstep.module,
        activity: footstep.activity,
        description: footstep.description,
        created_at: footstep.created_at,
    }
}

pub async fn me(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<FootstepListResponse>, ServerError> {
    let actor = session.actor()?;
    let (footsteps, next_cursor) = state
        .engine
        .list_footsteps_me(actor, query.limit, query.cursor.as_deref())
        .await?;

    Ok(Json(FootstepListResponse {
        footsteps: footsteps.into_iter().map(view).collect(),
        next_cursor,
    }))
}

pub async fn branch(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<FootstepListResponse>, ServerError> {
    let actor = session.actor()?;
    let (footsteps, next_cursor) = state
        .engine
        .list_footsteps_branch(actor, query.limit, query.cursor.as_deref())
        .await?;

    Ok(Json(FootstepListResponse {
        footsteps: footsteps.into_iter().map(view).collect(),
        next_cursor,
    }))
}
