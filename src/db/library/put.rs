use redis::AsyncCommands;
use uuid::Uuid;

use crate::{
    db,
    errors::AppError,
    models::redis::RedisKey,
    state::RedisClient,
};

pub async fn add_to_library(
    user_id: Uuid,
    story_id: Uuid,
    redis: RedisClient,
) -> Result<(), AppError> {
    let mut conn = db::connection(&redis).await?;

    let story_exists: bool = conn
        .exists(RedisKey::story(story_id))
        .await
        .map_err(AppError::RedisCommandError)?;
    if !story_exists {
        return Err(AppError::NotFound("Story not found".into()));
    }

    let added: bool = conn
        .sadd(RedisKey::library(user_id), story_id.to_string())
        .await
        .map_err(AppError::RedisCommandError)?;

    if added {
        tracing::info!("User {} saved story {} to library", user_id, story_id);
    }

    Ok(())
}

pub async fn remove_from_library(
    user_id: Uuid,
    story_id: Uuid,
    redis: RedisClient,
) -> Result<(), AppError> {
    let mut conn = db::connection(&redis).await?;

    let removed: bool = conn
        .srem(RedisKey::library(user_id), story_id.to_string())
        .await
        .map_err(AppError::RedisCommandError)?;

    if !removed {
        return Err(AppError::NotFound("Story is not in the library".into()));
    }

    tracing::info!("User {} removed story {} from library", user_id, story_id);

    Ok(())
}
