use chrono::Utc;
use redis::AsyncCommands;
use uuid::Uuid;

use crate::{
    db::{self, user::get_user_by_id},
    errors::AppError,
    models::{
        comment::{Comment, MAX_COMMENT_LENGTH, MAX_COMMENTS_PER_ENTITY, sanitize_body},
        rating::RatableKind,
        redis::RedisKey,
    },
    state::RedisClient,
};

pub async fn post_comment(
    kind: RatableKind,
    entity_id: Uuid,
    user_id: Uuid,
    body: String,
    redis: RedisClient,
) -> Result<Comment, AppError> {
    let body = sanitize_body(&body);
    if body.is_empty() {
        return Err(AppError::Validation("Comment cannot be empty".into()));
    }
    if body.len() > MAX_COMMENT_LENGTH {
        return Err(AppError::Validation(format!(
            "Comment exceeds {MAX_COMMENT_LENGTH} characters"
        )));
    }

    let author = get_user_by_id(user_id, redis.clone()).await?;

    let mut conn = db::connection(&redis).await?;

    let entity_exists: bool = conn
        .exists(RedisKey::entity(kind, entity_id))
        .await
        .map_err(AppError::RedisCommandError)?;
    if !entity_exists {
        return Err(AppError::NotFound(format!("No entity with id {entity_id}")));
    }

    let comment = Comment {
        id: Uuid::new_v4(),
        user_id,
        author_name: author.display_name.unwrap_or(author.username),
        body,
        created_at: Utc::now(),
    };

    let json =
        serde_json::to_string(&comment).map_err(|e| AppError::Serialization(e.to_string()))?;

    let key = RedisKey::comments(kind, entity_id);
    let _: () = redis::pipe()
        .lpush(&key, json)
        .ignore()
        .ltrim(&key, 0, MAX_COMMENTS_PER_ENTITY as isize - 1)
        .ignore()
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    tracing::info!(
        "User {} commented on {:?} {}",
        user_id,
        kind,
        entity_id
    );

    Ok(comment)
}
