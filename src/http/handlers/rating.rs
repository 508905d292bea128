use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::AuthClaims,
    db::rating::{get_rating_summary, submit_rating},
    models::rating::{RatableKind, RatingSummary},
    state::AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRatingPayload {
    pub rating: u8,
    /// Defaults to the authenticated caller. Supplying another user's id
    /// is rejected; the field exists so clients can be explicit.
    pub user_id: Option<Uuid>,
}

async fn submit(
    kind: RatableKind,
    entity_id: Uuid,
    claims: AuthClaims,
    payload: SubmitRatingPayload,
    state: AppState,
) -> Result<Json<RatingSummary>, (StatusCode, String)> {
    let caller_id = claims.user_id().map_err(|e| e.to_response())?;
    let user_id = payload.user_id.unwrap_or(caller_id);

    submit_rating(
        kind,
        entity_id,
        caller_id,
        user_id,
        payload.rating,
        state.redis.clone(),
    )
    .await
    .map(Json)
    .map_err(|e| {
        tracing::error!("Error rating {:?} {}: {}", kind, entity_id, e);
        e.to_response()
    })
}

async fn summary(
    kind: RatableKind,
    entity_id: Uuid,
    claims: Option<AuthClaims>,
    state: AppState,
) -> Result<Json<RatingSummary>, (StatusCode, String)> {
    let user_id = match claims {
        Some(claims) => Some(claims.user_id().map_err(|e| e.to_response())?),
        None => None,
    };

    get_rating_summary(kind, entity_id, user_id, state.redis.clone())
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!("Error fetching rating of {:?} {}: {}", kind, entity_id, e);
            e.to_response()
        })
}

pub async fn rate_story_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(story_id): Path<Uuid>,
    Json(payload): Json<SubmitRatingPayload>,
) -> Result<Json<RatingSummary>, (StatusCode, String)> {
    submit(RatableKind::Story, story_id, claims, payload, state).await
}

pub async fn rate_chapter_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(chapter_id): Path<Uuid>,
    Json(payload): Json<SubmitRatingPayload>,
) -> Result<Json<RatingSummary>, (StatusCode, String)> {
    submit(RatableKind::Chapter, chapter_id, claims, payload, state).await
}

pub async fn get_story_rating_handler(
    State(state): State<AppState>,
    claims: Option<AuthClaims>,
    Path(story_id): Path<Uuid>,
) -> Result<Json<RatingSummary>, (StatusCode, String)> {
    summary(RatableKind::Story, story_id, claims, state).await
}

pub async fn get_chapter_rating_handler(
    State(state): State<AppState>,
    claims: Option<AuthClaims>,
    Path(chapter_id): Path<Uuid>,
) -> Result<Json<RatingSummary>, (StatusCode, String)> {
    summary(RatableKind::Chapter, chapter_id, claims, state).await
}
