use redis::AsyncCommands;
use uuid::Uuid;

use crate::{
    db,
    errors::AppError,
    models::{comment::Comment, rating::RatableKind, redis::RedisKey},
    state::RedisClient,
};

/// An entity's comments, newest first. Entries that fail to parse are
/// skipped rather than failing the whole listing.
pub async fn get_comments(
    kind: RatableKind,
    entity_id: Uuid,
    redis: RedisClient,
) -> Result<Vec<Comment>, AppError> {
    let mut conn = db::connection(&redis).await?;

    let entity_exists: bool = conn
        .exists(RedisKey::entity(kind, entity_id))
        .await
        .map_err(AppError::RedisCommandError)?;
    if !entity_exists {
        return Err(AppError::NotFound(format!("No entity with id {entity_id}")));
    }

    let raw: Vec<String> = conn
        .lrange(RedisKey::comments(kind, entity_id), 0, -1)
        .await
        .map_err(AppError::RedisCommandError)?;

    let mut comments = Vec::with_capacity(raw.len());
    for entry in raw {
        match serde_json::from_str::<Comment>(&entry) {
            Ok(comment) => comments.push(comment),
            Err(e) => {
                tracing::warn!("Skipping malformed comment on {:?} {}: {}", kind, entity_id, e);
            }
        }
    }

    Ok(comments)
}
