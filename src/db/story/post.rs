use chrono::Utc;
use rand::Rng;
use redis::AsyncCommands;
use uuid::Uuid;

use crate::{
    db::{self, user::get_user_by_id},
    errors::AppError,
    models::{
        rating::RatingAggregate,
        redis::RedisKey,
        story::{Story, slugify},
    },
    state::RedisClient,
};

fn random_suffix() -> String {
    rand::rng()
        .sample_iter(rand::distr::Alphanumeric)
        .take(6)
        .map(char::from)
        .collect::<String>()
        .to_lowercase()
}

/// Claims a unique slug lookup key for the story. On collision a random
/// suffix is appended and claimed instead.
async fn claim_slug(
    conn: &mut bb8::PooledConnection<'_, bb8_redis::RedisConnectionManager>,
    title: &str,
    story_id: Uuid,
) -> Result<String, AppError> {
    let base = slugify(title);

    let claimed: bool = conn
        .set_nx(RedisKey::story_slug(&base), story_id.to_string())
        .await
        .map_err(AppError::RedisCommandError)?;

    if claimed {
        return Ok(base);
    }

    let suffixed = format!("{}-{}", base, random_suffix());
    let claimed: bool = conn
        .set_nx(RedisKey::story_slug(&suffixed), story_id.to_string())
        .await
        .map_err(AppError::RedisCommandError)?;

    if claimed {
        return Ok(suffixed);
    }

    Err(AppError::Conflict(format!(
        "Could not allocate a unique slug for '{title}'"
    )))
}

pub async fn create_story(
    title: String,
    description: String,
    cover_url: Option<String>,
    published: bool,
    author_id: Uuid,
    redis: RedisClient,
) -> Result<Story, AppError> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("Story title cannot be empty".into()));
    }

    let author = get_user_by_id(author_id, redis.clone()).await?;
    let author_name = author.display_name.unwrap_or(author.username);

    let mut conn = db::connection(&redis).await?;

    let story_id = Uuid::new_v4();
    let slug = claim_slug(&mut conn, &title, story_id).await?;
    let now = Utc::now();

    let story = Story {
        id: story_id,
        title,
        slug,
        description,
        author_id,
        author_name,
        cover_url,
        published,
        created_at: now,
        updated_at: now,
        rating: RatingAggregate::default(),
    };

    let key = RedisKey::story(story_id);
    let fields = [
        ("title", story.title.clone()),
        ("slug", story.slug.clone()),
        ("description", story.description.clone()),
        ("author_id", story.author_id.to_string()),
        ("author_name", story.author_name.clone()),
        ("cover_url", story.cover_url.clone().unwrap_or_default()),
        ("published", story.published.to_string()),
        ("created_at", now.to_rfc3339()),
        ("updated_at", now.to_rfc3339()),
        ("total_rating_sum", "0".into()),
        ("rating_count", "0".into()),
    ];

    let mut pipe = redis::pipe();
    pipe.hset_multiple(&key, &fields).ignore();
    if story.published {
        pipe.zadd(
            RedisKey::stories_published(),
            story_id.to_string(),
            now.timestamp(),
        )
        .ignore();
    }

    let _: () = pipe
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    tracing::info!("Created story {} ('{}')", story.id, story.slug);

    Ok(story)
}
