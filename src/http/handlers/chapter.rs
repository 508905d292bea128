use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::AuthClaims,
    db::chapter::{
        ChapterUpdate, create_chapter, delete_chapter, get_chapter_by_id, get_story_chapters,
        update_chapter,
    },
    models::chapter::{Chapter, ChapterSummary},
    state::AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChapterPayload {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub published: bool,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChapterPayload {
    pub title: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
}

pub async fn list_chapters_handler(
    State(state): State<AppState>,
    Path(story_id): Path<Uuid>,
) -> Result<Json<Vec<ChapterSummary>>, (StatusCode, String)> {
    get_story_chapters(story_id, state.redis.clone())
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!("Error listing chapters of story {}: {}", story_id, e);
            e.to_response()
        })
}

pub async fn get_chapter_handler(
    State(state): State<AppState>,
    Path(chapter_id): Path<Uuid>,
) -> Result<Json<Chapter>, (StatusCode, String)> {
    get_chapter_by_id(chapter_id, state.redis.clone())
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!("Error retrieving chapter {}: {}", chapter_id, e);
            e.to_response()
        })
}

pub async fn create_chapter_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(story_id): Path<Uuid>,
    Json(payload): Json<CreateChapterPayload>,
) -> Result<(StatusCode, Json<Chapter>), (StatusCode, String)> {
    claims.require_admin().map_err(|e| e.to_response())?;

    match create_chapter(
        story_id,
        payload.title,
        payload.content,
        payload.published,
        state.redis.clone(),
    )
    .await
    {
        Ok(chapter) => Ok((StatusCode::CREATED, Json(chapter))),
        Err(err) => {
            tracing::error!("Error creating chapter for story {}: {}", story_id, err);
            Err(err.to_response())
        }
    }
}

pub async fn update_chapter_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(chapter_id): Path<Uuid>,
    Json(payload): Json<UpdateChapterPayload>,
) -> Result<Json<Chapter>, (StatusCode, String)> {
    claims.require_admin().map_err(|e| e.to_response())?;

    let update = ChapterUpdate {
        title: payload.title,
        content: payload.content,
        published: payload.published,
    };

    update_chapter(chapter_id, update, state.redis.clone())
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!("Error updating chapter {}: {}", chapter_id, e);
            e.to_response()
        })
}

pub async fn delete_chapter_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(chapter_id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    claims.require_admin().map_err(|e| e.to_response())?;

    delete_chapter(chapter_id, state.redis.clone())
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(|e| {
            tracing::error!("Error deleting chapter {}: {}", chapter_id, e);
            e.to_response()
        })
}
