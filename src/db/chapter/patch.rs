use chrono::Utc;
use redis::AsyncCommands;
use uuid::Uuid;

use crate::{
    db::{self, chapter::get_chapter_by_id},
    errors::AppError,
    models::{chapter::Chapter, redis::RedisKey},
    state::RedisClient,
};

#[derive(Debug, Default)]
pub struct ChapterUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
}

pub async fn update_chapter(
    chapter_id: Uuid,
    update: ChapterUpdate,
    redis: RedisClient,
) -> Result<Chapter, AppError> {
    // Existence check doubles as the NotFound error source.
    get_chapter_by_id(chapter_id, redis.clone()).await?;

    if let Some(title) = &update.title {
        if title.trim().is_empty() {
            return Err(AppError::Validation("Chapter title cannot be empty".into()));
        }
    }

    let mut conn = db::connection(&redis).await?;

    let mut fields: Vec<(&str, String)> = vec![("updated_at", Utc::now().to_rfc3339())];
    if let Some(title) = &update.title {
        fields.push(("title", title.clone()));
    }
    if let Some(content) = &update.content {
        fields.push(("content", content.clone()));
    }
    if let Some(published) = update.published {
        fields.push(("published", published.to_string()));
    }

    let _: () = conn
        .hset_multiple(RedisKey::chapter(chapter_id), &fields)
        .await
        .map_err(AppError::RedisCommandError)?;

    drop(conn);

    tracing::info!("Updated chapter {}", chapter_id);

    get_chapter_by_id(chapter_id, redis).await
}
