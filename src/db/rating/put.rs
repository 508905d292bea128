use chrono::Utc;
use redis::AsyncCommands;
use uuid::Uuid;

use crate::{
    db,
    errors::AppError,
    models::{
        rating::{RatableKind, RatingDelta, RatingSummary, validate_rating},
        redis::RedisKey,
    },
    state::RedisClient,
};

/// Conflicting raters force a full re-read, so a handful of attempts is
/// enough before surfacing the contention to the caller.
const MAX_TX_ATTEMPTS: u32 = 5;

/// A pooled connection keeps its WATCH registration until EXEC or UNWATCH
/// runs, so every early exit between the two must clear it before the
/// connection returns to the pool.
async fn clear_watch(conn: &mut bb8::PooledConnection<'_, bb8_redis::RedisConnectionManager>) {
    let result: redis::RedisResult<()> = redis::cmd("UNWATCH").query_async(&mut **conn).await;
    if let Err(e) = result {
        tracing::warn!("Failed to clear WATCH state: {}", e);
    }
}

/// Applies one user's rating of a story or chapter.
///
/// The user's rating record and the entity's aggregate fields are read and
/// written under an optimistic transaction (WATCH on both keys). If any
/// watched key changes before EXEC the whole read-modify-write is retried,
/// so concurrent raters never lose updates and re-rating never double
/// counts. The average is not touched here; reads derive it from the
/// aggregate fields.
pub async fn submit_rating(
    kind: RatableKind,
    entity_id: Uuid,
    caller_id: Uuid,
    user_id: Uuid,
    rating: u8,
    redis: RedisClient,
) -> Result<RatingSummary, AppError> {
    validate_rating(rating)?;

    if caller_id != user_id {
        return Err(AppError::Unauthorized(
            "Cannot submit a rating on behalf of another user".into(),
        ));
    }

    let mut conn = db::connection(&redis).await?;

    let entity_key = RedisKey::entity(kind, entity_id);
    let rating_key = RedisKey::rating(kind, entity_id, user_id);

    for attempt in 1..=MAX_TX_ATTEMPTS {
        let _: () = redis::cmd("WATCH")
            .arg(&entity_key)
            .arg(&rating_key)
            .query_async(&mut *conn)
            .await
            .map_err(AppError::RedisCommandError)?;

        let exists: bool = match conn.exists(&entity_key).await {
            Ok(exists) => exists,
            Err(e) => {
                clear_watch(&mut conn).await;
                return Err(AppError::RedisCommandError(e));
            }
        };

        if !exists {
            clear_watch(&mut conn).await;
            return Err(AppError::NotFound(format!(
                "No {} with id {}",
                match kind {
                    RatableKind::Story => "story",
                    RatableKind::Chapter => "chapter",
                },
                entity_id
            )));
        }

        let previous: Option<u8> = match conn.hget(&rating_key, "rating").await {
            Ok(previous) => previous,
            Err(e) => {
                clear_watch(&mut conn).await;
                return Err(AppError::RedisCommandError(e));
            }
        };

        let delta = RatingDelta::new(previous, rating);
        let now = Utc::now().to_rfc3339();

        let mut pipe = redis::pipe();
        pipe.atomic()
            .hset(&rating_key, "rating", rating)
            .ignore()
            .hset(&rating_key, "updated_at", &now)
            .ignore()
            .hincr(&entity_key, "total_rating_sum", delta.sum_diff)
            .hincr(&entity_key, "rating_count", delta.count_delta);

        // EXEC returns nil when a watched key was touched; retry from the read.
        let result: Option<(i64, i64)> = match pipe.query_async(&mut *conn).await {
            Ok(result) => result,
            Err(e) => {
                clear_watch(&mut conn).await;
                return Err(AppError::RedisCommandError(e));
            }
        };

        match result {
            Some((total_rating_sum, rating_count)) => {
                tracing::info!(
                    "User {} rated {:?} {} as {} (previous {:?}, sum {}, count {})",
                    user_id,
                    kind,
                    entity_id,
                    rating,
                    previous,
                    total_rating_sum,
                    rating_count
                );
                return Ok(RatingSummary::from_aggregate(
                    crate::models::rating::RatingAggregate {
                        total_rating_sum,
                        rating_count,
                    },
                    Some(rating),
                ));
            }
            None => {
                tracing::debug!(
                    "Rating transaction conflict for {:?} {} (attempt {}/{})",
                    kind,
                    entity_id,
                    attempt,
                    MAX_TX_ATTEMPTS
                );
            }
        }
    }

    Err(AppError::Transient(
        "Rating could not be recorded due to contention, try again".into(),
    ))
}
