use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::AuthClaims,
    db::story::{
        StoryUpdate, create_story, delete_story, get_published_stories, get_story_by_id,
        get_story_by_slug, update_story,
    },
    models::story::Story,
    state::AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoryPayload {
    pub title: String,
    pub description: String,
    pub cover_url: Option<String>,
    #[serde(default)]
    pub published: bool,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStoryPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub published: Option<bool>,
}

pub async fn list_stories_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Story>>, (StatusCode, String)> {
    get_published_stories(state.redis.clone())
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!("Error listing stories: {}", e);
            e.to_response()
        })
}

/// Accepts either a story id or its slug, so reader URLs can use slugs.
pub async fn get_story_handler(
    State(state): State<AppState>,
    Path(id_or_slug): Path<String>,
) -> Result<Json<Story>, (StatusCode, String)> {
    let result = match Uuid::parse_str(&id_or_slug) {
        Ok(story_id) => get_story_by_id(story_id, state.redis.clone()).await,
        Err(_) => get_story_by_slug(&id_or_slug, state.redis.clone()).await,
    };

    result.map(Json).map_err(|e| {
        tracing::error!("Error retrieving story '{}': {}", id_or_slug, e);
        e.to_response()
    })
}

pub async fn create_story_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    Json(payload): Json<CreateStoryPayload>,
) -> Result<(StatusCode, Json<Story>), (StatusCode, String)> {
    claims.require_admin().map_err(|e| e.to_response())?;
    let author_id = claims.user_id().map_err(|e| e.to_response())?;

    match create_story(
        payload.title,
        payload.description,
        payload.cover_url,
        payload.published,
        author_id,
        state.redis.clone(),
    )
    .await
    {
        Ok(story) => Ok((StatusCode::CREATED, Json(story))),
        Err(err) => {
            tracing::error!("Error creating story: {}", err);
            Err(err.to_response())
        }
    }
}

pub async fn update_story_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(story_id): Path<Uuid>,
    Json(payload): Json<UpdateStoryPayload>,
) -> Result<Json<Story>, (StatusCode, String)> {
    claims.require_admin().map_err(|e| e.to_response())?;

    let update = StoryUpdate {
        title: payload.title,
        description: payload.description,
        cover_url: payload.cover_url,
        published: payload.published,
    };

    update_story(story_id, update, state.redis.clone())
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!("Error updating story {}: {}", story_id, e);
            e.to_response()
        })
}

pub async fn delete_story_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(story_id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    claims.require_admin().map_err(|e| e.to_response())?;

    delete_story(story_id, state.redis.clone())
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(|e| {
            tracing::error!("Error deleting story {}: {}", story_id, e);
            e.to_response()
        })
}
