//! Caller identity endpoints.

use api_types::user::{MeResponse, UserOrganizationView, UserType as ApiUserType, UserView};
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::{
    ServerError,
    server::{AuthSession, ServerState},
};

fn map_user_type(user_type: engine::UserType) -> ApiUserType {
    match user_type {
        engine::UserType::Owner => ApiUserType::Owner,
        engine::UserType::Employee => ApiUserType::Employee,
        engine::UserType::Member => ApiUserType::Member,
    }
}

fn binding_view(
    (binding, organization, branch): (
        engine::UserOrganization,
        engine::Organization,
        Option<engine::Branch>,
    ),
) -> UserOrganizationView {
    UserOrganizationView {
        id: binding.id,
        organization_id: organization.id,
        organization_name: organization.name,
        branch_id: binding.branch_id,
        branch_name: branch.map(|branch| branch.name),
        user_type: map_user_type(binding.user_type),
    }
}

pub async fn me(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
) -> Result<Json<MeResponse>, ServerError> {
    let bindings = state.engine.bindings_with_names(session.user.id).await?;
    let organizations = bindings.into_iter().map(binding_view).collect();

    Ok(Json(MeResponse {
        user: UserView {
            id: session.user.id,
            username: session.user.username,
            full_name: session.user.full_name,
        },
        organizations,
    }))
}

pub async fn list_bindings(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<UserOrganizationView>>, ServerError> {
    let bindings = state.engine.bindings_with_names(session.user.id).await?;

    Ok(Json(bindings.into_iter().map(binding_view).collect()))
}

pub async fn get_binding(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserOrganizationView>, ServerError> {
    let binding = state
        .engine
        .binding_with_names(session.user.id, id)
        .await?;

    Ok(Json(binding_view(binding)))
}
