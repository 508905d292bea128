use redis::AsyncCommands;
use uuid::Uuid;

use crate::{
    db,
    errors::AppError,
    models::{comment::Comment, rating::RatableKind, redis::RedisKey, user::Role},
    state::RedisClient,
};

/// Removes one comment. Only its author or an admin may delete it.
pub async fn delete_comment(
    kind: RatableKind,
    entity_id: Uuid,
    comment_id: Uuid,
    caller_id: Uuid,
    caller_role: Role,
    redis: RedisClient,
) -> Result<(), AppError> {
    let mut conn = db::connection(&redis).await?;

    let key = RedisKey::comments(kind, entity_id);
    let raw: Vec<String> = conn
        .lrange(&key, 0, -1)
        .await
        .map_err(AppError::RedisCommandError)?;

    let Some(entry) = raw.iter().find(|entry| {
        serde_json::from_str::<Comment>(entry.as_str())
            .map(|c| c.id == comment_id)
            .unwrap_or(false)
    }) else {
        return Err(AppError::NotFound("Comment not found".into()));
    };

    let comment: Comment = serde_json::from_str(entry)
        .map_err(|e| AppError::Deserialization(e.to_string()))?;

    if comment.user_id != caller_id && caller_role != Role::Admin {
        return Err(AppError::Forbidden(
            "Only the comment author or an admin can delete a comment".into(),
        ));
    }

    let _: () = conn
        .lrem(&key, 1, entry)
        .await
        .map_err(AppError::RedisCommandError)?;

    tracing::info!(
        "Deleted comment {} from {:?} {} by user {}",
        comment_id,
        kind,
        entity_id,
        caller_id
    );

    Ok(())
}
