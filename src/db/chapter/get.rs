use chrono::{DateTime, Utc};
use redis::AsyncCommands;
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    db,
    errors::AppError,
    models::{
        chapter::{Chapter, ChapterSummary},
        rating::RatingAggregate,
        redis::RedisKey,
    },
    state::RedisClient,
};

pub(crate) fn chapter_from_hash(
    id: Uuid,
    data: &HashMap<String, String>,
) -> Result<Chapter, AppError> {
    let story_id = data
        .get("story_id")
        .and_then(|v| Uuid::parse_str(v).ok())
        .ok_or_else(|| AppError::Deserialization(format!("Chapter {id} has no story_id")))?;

    let parse_time = |field: &str| -> DateTime<Utc> {
        data.get(field)
            .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_default()
    };

    Ok(Chapter {
        id,
        story_id,
        position: data
            .get("position")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0),
        title: data.get("title").cloned().unwrap_or_default(),
        content: data.get("content").cloned().unwrap_or_default(),
        published: data.get("published").map(|v| v == "true").unwrap_or(false),
        created_at: parse_time("created_at"),
        updated_at: parse_time("updated_at"),
        rating: RatingAggregate {
            total_rating_sum: data
                .get("total_rating_sum")
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            rating_count: data
                .get("rating_count")
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
        },
    })
}

pub async fn get_chapter_by_id(chapter_id: Uuid, redis: RedisClient) -> Result<Chapter, AppError> {
    let mut conn = db::connection(&redis).await?;

    let key = RedisKey::chapter(chapter_id);

    let data: HashMap<String, String> = conn
        .hgetall(&key)
        .await
        .map_err(AppError::RedisCommandError)?;

    if data.is_empty() {
        return Err(AppError::NotFound("Chapter not found".into()));
    }

    chapter_from_hash(chapter_id, &data)
}

/// A story's chapters in position order, without content bodies.
pub async fn get_story_chapters(
    story_id: Uuid,
    redis: RedisClient,
) -> Result<Vec<ChapterSummary>, AppError> {
    let mut conn = db::connection(&redis).await?;

    let story_exists: bool = conn
        .exists(RedisKey::story(story_id))
        .await
        .map_err(AppError::RedisCommandError)?;
    if !story_exists {
        return Err(AppError::NotFound("Story not found".into()));
    }

    let ids: Vec<String> = conn
        .zrange(RedisKey::story_chapters(story_id), 0, -1)
        .await
        .map_err(AppError::RedisCommandError)?;

    drop(conn);

    let mut chapters = Vec::with_capacity(ids.len());
    for id in ids {
        let Ok(chapter_id) = Uuid::parse_str(&id) else {
            tracing::warn!("Skipping malformed chapter id in story index: {}", id);
            continue;
        };
        match get_chapter_by_id(chapter_id, redis.clone()).await {
            Ok(chapter) => chapters.push(ChapterSummary {
                id: chapter.id,
                story_id: chapter.story_id,
                position: chapter.position,
                title: chapter.title,
                published: chapter.published,
                created_at: chapter.created_at,
            }),
            Err(AppError::NotFound(_)) => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(chapters)
}
