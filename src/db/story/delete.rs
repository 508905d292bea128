use redis::AsyncCommands;
use uuid::Uuid;

use crate::{
    db::{self, story::get_story_by_id},
    errors::AppError,
    models::{rating::RatableKind, redis::RedisKey},
    state::RedisClient,
};

/// Deletes a story with its chapters, comments, ratings, slug lookup and
/// index entries. Library sets are left alone; library reads skip ids that
/// no longer resolve.
pub async fn delete_story(story_id: Uuid, redis: RedisClient) -> Result<(), AppError> {
    let story = get_story_by_id(story_id, redis.clone()).await?;

    let mut conn = db::connection(&redis).await?;

    let chapter_ids: Vec<String> = conn
        .zrange(RedisKey::story_chapters(story_id), 0, -1)
        .await
        .map_err(AppError::RedisCommandError)?;

    let mut keys: Vec<String> = vec![
        RedisKey::story(story_id),
        RedisKey::story_slug(&story.slug),
        RedisKey::story_chapters(story_id),
        RedisKey::comments(RatableKind::Story, story_id),
    ];

    let story_rating_keys: Vec<String> = redis::cmd("KEYS")
        .arg(format!("rating:story:{story_id}:*"))
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;
    keys.extend(story_rating_keys);

    for id in &chapter_ids {
        let Ok(chapter_id) = Uuid::parse_str(id) else {
            continue;
        };
        keys.push(RedisKey::chapter(chapter_id));
        keys.push(RedisKey::comments(RatableKind::Chapter, chapter_id));

        let chapter_rating_keys: Vec<String> = redis::cmd("KEYS")
            .arg(format!("rating:chapter:{chapter_id}:*"))
            .query_async(&mut *conn)
            .await
            .map_err(AppError::RedisCommandError)?;
        keys.extend(chapter_rating_keys);
    }

    let mut pipe = redis::pipe();
    pipe.del(&keys).ignore();
    pipe.zrem(RedisKey::stories_published(), story_id.to_string())
        .ignore();

    let _: () = pipe
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    tracing::info!(
        "Deleted story {} with {} chapters",
        story_id,
        chapter_ids.len()
    );

    Ok(())
}
