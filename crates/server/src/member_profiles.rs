//! Member profile endpoints.

use api_types::{
    common::{IdsRequest, PageQuery},
    member_profile::{
        MemberProfileNew, MemberProfileSearchResponse, MemberProfileUpdate, MemberProfileView,
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
use engine::MemberProfileInput;

fn view(profile: engine::MemberProfile) -> MemberProfileView {
    MemberProfileView {
        id: profile.id,
        user_id: profile.user_id,
        first_name: profile.first_name,
        middle_name: profile.middle_name,
        last_name: profile.last_name,
        passbook_number: profile.passbook_number,
        contact_number: profile.contact_number,
        description: profile.description,
        created_at: profile.created_at,
        updated_at: profile.updated_at,
    }
}

pub async fn list(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<MemberProfileSearchResponse>, ServerError> {
    let actor = session.actor()?;
    let (profiles, next_cursor) = state
        .engine
        .list_member_profiles(
            actor,
            query.q.as_deref(),
            query.limit,
            query.cursor.as_deref(),
        )
        .await?;

    Ok(Json(MemberProfileSearchResponse {
        member_profiles: profiles.into_iter().map(view).collect(),
        next_cursor,
    }))
}

pub async fn get(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MemberProfileView>, ServerError> {
    let actor = session.actor()?;
    let profile = state.engine.member_profile(actor, id).await?;

    Ok(Json(view(profile)))
}

pub async fn create(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Json(payload): Json<MemberProfileNew>,
) -> Result<(StatusCode, Json<MemberProfileView>), ServerError> {
    let actor = session.actor()?;
    let input = MemberProfileInput {
        user_id: payload.user_id,
        first_name: payload.first_name,
        middle_name: payload.middle_name,
        last_name: payload.last_name,
        passbook_number: payload.passbook_number,
        contact_number: payload.contact_number,
        description: payload.description,
    };
    let result = state.engine.create_member_profile(actor, &input).await;
    state
        .footstep(
            actor,
            "member-profile",
            "create",
            format!("create member profile {} {}", input.first_name, input.last_name),
            &result,
        )
        .await;

    Ok((StatusCode::CREATED, Json(view(result?))))
}

pub async fn update(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MemberProfileUpdate>,
) -> Result<Json<MemberProfileView>, ServerError> {
    let actor = session.actor()?;
    let input = MemberProfileInput {
        user_id: payload.user_id,
        first_name: payload.first_name,
        middle_name: payload.middle_name,
        last_name: payload.last_name,
        passbook_number: payload.passbook_number,
        contact_number: payload.contact_number,
        description: payload.description,
    };
    let result = state.engine.update_member_profile(actor, id, &input).await;
    state
        .footstep(
            actor,
            "member-profile",
            "update",
            format!("update member profile {id}"),
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
    let result = state.engine.delete_member_profile(actor, id).await;
    state
        .footstep(
            actor,
            "member-profile",
            "delete",
            format!("delete member profile {id}"),
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
        .delete_member_profiles(actor, &payload.ids)
        .await;
    state
        .footstep(
            actor,
            "member-profile",
            "bulk-delete",
            format!("delete {} member profiles", payload.ids.len()),
            &result,
        )
        .await;
    result?;

    Ok(StatusCode::NO_CONTENT)
}
