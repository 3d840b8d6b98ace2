//! Peer rating endpoints.

use api_types::{
    common::PageQuery,
    user_rating::{UserRatingListResponse, UserRatingNew, UserRatingView},
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

fn view(rating: engine::UserRating) -> UserRatingView {
    UserRatingView {
        id: rating.id,
        rater_user_id: rating.rater_user_id,
        ratee_user_id: rating.ratee_user_id,
        rate: rating.rate,
        remark: rating.remark,
        created_at: rating.created_at,
    }
}

async fn page(
    session: &AuthSession,
    state: &ServerState,
    ratee_user_id: Option<Uuid>,
    query: PageQuery,
) -> Result<Json<UserRatingListResponse>, ServerError> {
    let actor = session.actor()?;
    let (ratings, next_cursor) = state
        .engine
        .list_user_ratings(actor, ratee_user_id, query.limit, query.cursor.as_deref())
        .await?;

    Ok(Json(UserRatingListResponse {
        ratings: ratings.into_iter().map(view).collect(),
        next_cursor,
    }))
}

pub async fn list(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<UserRatingListResponse>, ServerError> {
    page(&session, &state, None, query).await
}

pub async fn for_user(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Json<UserRatingListResponse>, ServerError> {
    page(&session, &state, Some(user_id), query).await
}

pub async fn get(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserRatingView>, ServerError> {
    let actor = session.actor()?;
    let rating = state.engine.user_rating(actor, id).await?;

    Ok(Json(view(rating)))
}

pub async fn create(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Json(payload): Json<UserRatingNew>,
) -> Result<(StatusCode, Json<UserRatingView>), ServerError> {
    let actor = session.actor()?;
    let result = state
        .engine
        .create_user_rating(actor, payload.ratee_user_id, payload.rate, &payload.remark)
        .await;
    state
        .footstep(
            actor,
            "user-rating",
            "create",
            format!("rate user {}", payload.ratee_user_id),
            &result,
        )
        .await;

    Ok((StatusCode::CREATED, Json(view(result?))))
}

pub async fn remove(
    Extension(session): Extension<AuthSession>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    let actor = session.actor()?;
    let result = state.engine.delete_user_rating(actor, id).await;
    state
        .footstep(
            actor,
            "user-rating",
            "delete",
            format!("delete user rating {id}"),
            &result,
        )
        .await;
    result?;

    Ok(StatusCode::NO_CONTENT)
}
