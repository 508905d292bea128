use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::AuthClaims,
    db::comment::{delete_comment, get_comments, post_comment},
    models::{comment::Comment, rating::RatableKind},
    state::AppState,
};

#[derive(Deserialize)]
pub struct PostCommentPayload {
    pub body: String,
}

async fn list(
    kind: RatableKind,
    entity_id: Uuid,
    state: AppState,
) -> Result<Json<Vec<Comment>>, (StatusCode, String)> {
    get_comments(kind, entity_id, state.redis.clone())
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!("Error listing comments of {:?} {}: {}", kind, entity_id, e);
            e.to_response()
        })
}

async fn post(
    kind: RatableKind,
    entity_id: Uuid,
    claims: AuthClaims,
    payload: PostCommentPayload,
    state: AppState,
) -> Result<(StatusCode, Json<Comment>), (StatusCode, String)> {
    let user_id = claims.user_id().map_err(|e| e.to_response())?;

    match post_comment(kind, entity_id, user_id, payload.body, state.redis.clone()).await {
        Ok(comment) => Ok((StatusCode::CREATED, Json(comment))),
        Err(err) => {
            tracing::error!("Error commenting on {:?} {}: {}", kind, entity_id, err);
            Err(err.to_response())
        }
    }
}

async fn delete(
    kind: RatableKind,
    entity_id: Uuid,
    comment_id: Uuid,
    claims: AuthClaims,
    state: AppState,
) -> Result<StatusCode, (StatusCode, String)> {
    let caller_id = claims.user_id().map_err(|e| e.to_response())?;

    delete_comment(
        kind,
        entity_id,
        comment_id,
        caller_id,
        claims.role(),
        state.redis.clone(),
    )
    .await
    .map(|_| StatusCode::NO_CONTENT)
    .map_err(|e| {
        tracing::error!(
            "Error deleting comment {} on {:?} {}: {}",
            comment_id,
            kind,
            entity_id,
            e
        );
        e.to_response()
    })
}

pub async fn list_story_comments_handler(
    State(state): State<AppState>,
    Path(story_id): Path<Uuid>,
) -> Result<Json<Vec<Comment>>, (StatusCode, String)> {
    list(RatableKind::Story, story_id, state).await
}

pub async fn post_story_comment_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(story_id): Path<Uuid>,
    Json(payload): Json<PostCommentPayload>,
) -> Result<(StatusCode, Json<Comment>), (StatusCode, String)> {
    post(RatableKind::Story, story_id, claims, payload, state).await
}

pub async fn delete_story_comment_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path((story_id, comment_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, (StatusCode, String)> {
    delete(RatableKind::Story, story_id, comment_id, claims, state).await
}

pub async fn list_chapter_comments_handler(
    State(state): State<AppState>,
    Path(chapter_id): Path<Uuid>,
) -> Result<Json<Vec<Comment>>, (StatusCode, String)> {
    list(RatableKind::Chapter, chapter_id, state).await
}

pub async fn post_chapter_comment_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(chapter_id): Path<Uuid>,
    Json(payload): Json<PostCommentPayload>,
) -> Result<(StatusCode, Json<Comment>), (StatusCode, String)> {
    post(RatableKind::Chapter, chapter_id, claims, payload, state).await
}

pub async fn delete_chapter_comment_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path((chapter_id, comment_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, (StatusCode, String)> {
    delete(RatableKind::Chapter, chapter_id, comment_id, claims, state).await
}
