use redis::AsyncCommands;
use uuid::Uuid;

use crate::{
    db::{self, story::get_story_by_id},
    errors::AppError,
    models::{redis::RedisKey, story::Story},
    state::RedisClient,
};

/// The stories a user has saved. Ids of since-deleted stories are skipped.
pub async fn get_library(user_id: Uuid, redis: RedisClient) -> Result<Vec<Story>, AppError> {
    let mut conn = db::connection(&redis).await?;

    let ids: Vec<String> = conn
        .smembers(RedisKey::library(user_id))
        .await
        .map_err(AppError::RedisCommandError)?;

    drop(conn);

    let mut stories = Vec::with_capacity(ids.len());
    for id in ids {
        let Ok(story_id) = Uuid::parse_str(&id) else {
            tracing::warn!("Skipping malformed story id in library of {}: {}", user_id, id);
            continue;
        };
        match get_story_by_id(story_id, redis.clone()).await {
            Ok(story) => stories.push(story),
            Err(AppError::NotFound(_)) => continue,
            Err(e) => return Err(e),
        }
    }

    stories.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(stories)
}
