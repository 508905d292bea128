use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    auth::AuthClaims,
    db::library::{add_to_library, get_library, remove_from_library},
    models::story::Story,
    state::AppState,
};

pub async fn get_library_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
) -> Result<Json<Vec<Story>>, (StatusCode, String)> {
    let user_id = claims.user_id().map_err(|e| e.to_response())?;

    get_library(user_id, state.redis.clone())
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!("Error loading library of {}: {}", user_id, e);
            e.to_response()
        })
}

pub async fn add_to_library_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(story_id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let user_id = claims.user_id().map_err(|e| e.to_response())?;

    add_to_library(user_id, story_id, state.redis.clone())
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(|e| {
            tracing::error!("Error saving story {} for {}: {}", story_id, user_id, e);
            e.to_response()
        })
}

pub async fn remove_from_library_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(story_id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let user_id = claims.user_id().map_err(|e| e.to_response())?;

    remove_from_library(user_id, story_id, state.redis.clone())
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(|e| {
            tracing::error!("Error removing story {} for {}: {}", story_id, user_id, e);
            e.to_response()
        })
}
