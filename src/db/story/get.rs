use chrono::{DateTime, Utc};
use redis::AsyncCommands;
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    db,
    errors::AppError,
    models::{rating::RatingAggregate, redis::RedisKey, story::Story},
    state::RedisClient,
};

pub(crate) fn story_from_hash(id: Uuid, data: &HashMap<String, String>) -> Result<Story, AppError> {
    let author_id = data
        .get("author_id")
        .and_then(|v| Uuid::parse_str(v).ok())
        .ok_or_else(|| AppError::Deserialization(format!("Story {id} has no author_id")))?;

    let parse_time = |field: &str| -> DateTime<Utc> {
        data.get(field)
            .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_default()
    };

    Ok(Story {
        id,
        title: data.get("title").cloned().unwrap_or_default(),
        slug: data.get("slug").cloned().unwrap_or_default(),
        description: data.get("description").cloned().unwrap_or_default(),
        author_id,
        author_name: data.get("author_name").cloned().unwrap_or_default(),
        cover_url: data.get("cover_url").filter(|v| !v.is_empty()).cloned(),
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

pub async fn get_story_by_id(story_id: Uuid, redis: RedisClient) -> Result<Story, AppError> {
    let mut conn = db::connection(&redis).await?;

    let key = RedisKey::story(story_id);

    let data: HashMap<String, String> = conn
        .hgetall(&key)
        .await
        .map_err(AppError::RedisCommandError)?;

    if data.is_empty() {
        return Err(AppError::NotFound("Story not found".into()));
    }

    story_from_hash(story_id, &data)
}

pub async fn get_story_by_slug(slug: &str, redis: RedisClient) -> Result<Story, AppError> {
    let mut conn = db::connection(&redis).await?;

    let slug_key = RedisKey::story_slug(slug);
    let story_id: Option<String> = conn
        .get(&slug_key)
        .await
        .map_err(AppError::RedisCommandError)?;

    let Some(story_id) = story_id else {
        return Err(AppError::NotFound(format!("No story with slug '{slug}'")));
    };

    let story_id = Uuid::parse_str(&story_id)
        .map_err(|e| AppError::Deserialization(format!("Invalid UUID from slug lookup: {e}")))?;

    drop(conn);

    get_story_by_id(story_id, redis).await
}

/// Published stories, newest first.
pub async fn get_published_stories(redis: RedisClient) -> Result<Vec<Story>, AppError> {
    let mut conn = db::connection(&redis).await?;

    let ids: Vec<String> = conn
        .zrevrange(RedisKey::stories_published(), 0, -1)
        .await
        .map_err(AppError::RedisCommandError)?;

    drop(conn);

    let mut stories = Vec::with_capacity(ids.len());
    for id in ids {
        let Ok(story_id) = Uuid::parse_str(&id) else {
            tracing::warn!("Skipping malformed story id in published index: {}", id);
            continue;
        };
        match get_story_by_id(story_id, redis.clone()).await {
            Ok(story) => stories.push(story),
            // Index entries can outlive a deleted story briefly.
            Err(AppError::NotFound(_)) => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(stories)
}
