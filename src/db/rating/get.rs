use chrono::{DateTime, Utc};
use redis::AsyncCommands;
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    db,
    errors::AppError,
    models::{
        rating::{RatableKind, RatingAggregate, RatingSummary, UserRating},
        redis::RedisKey,
    },
    state::RedisClient,
};

/// The caller's own rating record for an entity, if any.
pub async fn get_user_rating(
    kind: RatableKind,
    entity_id: Uuid,
    user_id: Uuid,
    redis: RedisClient,
) -> Result<Option<UserRating>, AppError> {
    let mut conn = db::connection(&redis).await?;

    let data: HashMap<String, String> = conn
        .hgetall(RedisKey::rating(kind, entity_id, user_id))
        .await
        .map_err(AppError::RedisCommandError)?;

    if data.is_empty() {
        return Ok(None);
    }

    let rating = data
        .get("rating")
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| {
            AppError::Deserialization(format!(
                "Rating record for {:?} {} user {} has no rating field",
                kind, entity_id, user_id
            ))
        })?;

    Ok(Some(UserRating {
        entity_id,
        user_id,
        rating,
        updated_at: data
            .get("updated_at")
            .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_default(),
    }))
}

/// Aggregate rating state for an entity, with the caller's own rating when
/// an authenticated user id is supplied. The average is derived here from
/// the stored sum and count.
pub async fn get_rating_summary(
    kind: RatableKind,
    entity_id: Uuid,
    user_id: Option<Uuid>,
    redis: RedisClient,
) -> Result<RatingSummary, AppError> {
    let mut conn = db::connection(&redis).await?;

    let entity_key = RedisKey::entity(kind, entity_id);

    let exists: bool = conn
        .exists(&entity_key)
        .await
        .map_err(AppError::RedisCommandError)?;

    if !exists {
        return Err(AppError::NotFound(format!("No entity with id {entity_id}")));
    }

    let (total_rating_sum, rating_count): (Option<i64>, Option<i64>) = redis::pipe()
        .hget(&entity_key, "total_rating_sum")
        .hget(&entity_key, "rating_count")
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    let aggregate = RatingAggregate {
        total_rating_sum: total_rating_sum.unwrap_or(0),
        rating_count: rating_count.unwrap_or(0),
    };

    drop(conn);

    let user_rating = match user_id {
        Some(user_id) => get_user_rating(kind, entity_id, user_id, redis)
            .await?
            .map(|r| r.rating),
        None => None,
    };

    Ok(RatingSummary::from_aggregate(aggregate, user_rating))
}
