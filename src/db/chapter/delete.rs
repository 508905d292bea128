use uuid::Uuid;

use crate::{
    db::{self, chapter::get_chapter_by_id},
    errors::AppError,
    models::{rating::RatableKind, redis::RedisKey},
    state::RedisClient,
};

pub async fn delete_chapter(chapter_id: Uuid, redis: RedisClient) -> Result<(), AppError> {
    let chapter = get_chapter_by_id(chapter_id, redis.clone()).await?;

    let mut conn = db::connection(&redis).await?;

    let mut keys: Vec<String> = vec![
        RedisKey::chapter(chapter_id),
        RedisKey::comments(RatableKind::Chapter, chapter_id),
    ];

    let rating_keys: Vec<String> = redis::cmd("KEYS")
        .arg(format!("rating:chapter:{chapter_id}:*"))
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;
    keys.extend(rating_keys);

    let _: () = redis::pipe()
        .del(&keys)
        .ignore()
        .zrem(
            RedisKey::story_chapters(chapter.story_id),
            chapter_id.to_string(),
        )
        .ignore()
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    tracing::info!(
        "Deleted chapter {} from story {}",
        chapter_id,
        chapter.story_id
    );

    Ok(())
}
