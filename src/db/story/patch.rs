use chrono::Utc;
use uuid::Uuid;

use crate::{
    db::{self, story::get_story_by_id},
    errors::AppError,
    models::{redis::RedisKey, story::Story},
    state::RedisClient,
};

#[derive(Debug, Default)]
pub struct StoryUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub published: Option<bool>,
}

/// Updates story metadata. The slug is allocated once at creation and kept
/// stable even when the title changes, so reader bookmarks keep working.
pub async fn update_story(
    story_id: Uuid,
    update: StoryUpdate,
    redis: RedisClient,
) -> Result<Story, AppError> {
    let story = get_story_by_id(story_id, redis.clone()).await?;

    if let Some(title) = &update.title {
        if title.trim().is_empty() {
            return Err(AppError::Validation("Story title cannot be empty".into()));
        }
    }

    let mut conn = db::connection(&redis).await?;

    let key = RedisKey::story(story_id);
    let now = Utc::now();

    let mut fields: Vec<(&str, String)> = vec![("updated_at", now.to_rfc3339())];
    if let Some(title) = &update.title {
        fields.push(("title", title.clone()));
    }
    if let Some(description) = &update.description {
        fields.push(("description", description.clone()));
    }
    if let Some(cover_url) = &update.cover_url {
        fields.push(("cover_url", cover_url.clone()));
    }
    if let Some(published) = update.published {
        fields.push(("published", published.to_string()));
    }

    let mut pipe = redis::pipe();
    pipe.hset_multiple(&key, &fields).ignore();

    match update.published {
        Some(true) if !story.published => {
            pipe.zadd(
                RedisKey::stories_published(),
                story_id.to_string(),
                story.created_at.timestamp(),
            )
            .ignore();
        }
        Some(false) if story.published => {
            pipe.zrem(RedisKey::stories_published(), story_id.to_string())
                .ignore();
        }
        _ => {}
    }

    let _: () = pipe
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    drop(conn);

    tracing::info!("Updated story {}", story_id);

    get_story_by_id(story_id, redis).await
}
