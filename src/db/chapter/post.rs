use chrono::Utc;
use redis::AsyncCommands;
use uuid::Uuid;

use crate::{
    db,
    errors::AppError,
    models::{chapter::Chapter, rating::RatingAggregate, redis::RedisKey},
    state::RedisClient,
};

pub async fn create_chapter(
    story_id: Uuid,
    title: String,
    content: String,
    published: bool,
    redis: RedisClient,
) -> Result<Chapter, AppError> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("Chapter title cannot be empty".into()));
    }

    let mut conn = db::connection(&redis).await?;

    let story_exists: bool = conn
        .exists(RedisKey::story(story_id))
        .await
        .map_err(AppError::RedisCommandError)?;
    if !story_exists {
        return Err(AppError::NotFound("Story not found".into()));
    }

    // Positions only grow, so deleted chapters never renumber the rest.
    let chapters_key = RedisKey::story_chapters(story_id);
    let last: Vec<(String, f64)> = conn
        .zrevrange_withscores(&chapters_key, 0, 0)
        .await
        .map_err(AppError::RedisCommandError)?;
    let position = last.first().map(|(_, score)| *score as u32 + 1).unwrap_or(1);

    let chapter_id = Uuid::new_v4();
    let now = Utc::now();

    let chapter = Chapter {
        id: chapter_id,
        story_id,
        position,
        title,
        content,
        published,
        created_at: now,
        updated_at: now,
        rating: RatingAggregate::default(),
    };

    let fields = [
        ("story_id", story_id.to_string()),
        ("position", position.to_string()),
        ("title", chapter.title.clone()),
        ("content", chapter.content.clone()),
        ("published", chapter.published.to_string()),
        ("created_at", now.to_rfc3339()),
        ("updated_at", now.to_rfc3339()),
        ("total_rating_sum", "0".into()),
        ("rating_count", "0".into()),
    ];

    let _: () = redis::pipe()
        .hset_multiple(RedisKey::chapter(chapter_id), &fields)
        .ignore()
        .zadd(&chapters_key, chapter_id.to_string(), position)
        .ignore()
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    tracing::info!(
        "Created chapter {} at position {} of story {}",
        chapter_id,
        position,
        story_id
    );

    Ok(chapter)
}
