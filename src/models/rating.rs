use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Which kind of record a rating applies to. Stories and chapters share
/// one rating code path; only the key namespace differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatableKind {
    Story,
    Chapter,
}

/// One user's rating of one entity. Unique per (entity, user); a later
/// submission overwrites, it never adds a second record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRating {
    pub entity_id: Uuid,
    pub user_id: Uuid,
    pub rating: u8,
    pub updated_at: DateTime<Utc>,
}

/// Aggregate rating fields stored on a story or chapter hash. The average
/// is never stored; it is derived from these two fields on every read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingAggregate {
    pub total_rating_sum: i64,
    pub rating_count: i64,
}

impl RatingAggregate {
    /// Display average, rounded to one decimal. None when nobody has rated.
    pub fn average(&self) -> Option<f64> {
        if self.rating_count <= 0 {
            return None;
        }
        let avg = self.total_rating_sum as f64 / self.rating_count as f64;
        Some((avg * 10.0).round() / 10.0)
    }

    pub fn apply(&self, delta: RatingDelta) -> RatingAggregate {
        RatingAggregate {
            total_rating_sum: self.total_rating_sum + delta.sum_diff,
            rating_count: self.rating_count + delta.count_delta,
        }
    }
}

/// The increments a single rating submission applies to an aggregate.
/// First-time raters add to the count; re-raters only shift the sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingDelta {
    pub sum_diff: i64,
    pub count_delta: i64,
}

impl RatingDelta {
    pub fn new(previous: Option<u8>, rating: u8) -> RatingDelta {
        let previous = previous.unwrap_or(0);
        RatingDelta {
            sum_diff: rating as i64 - previous as i64,
            count_delta: if previous == 0 { 1 } else { 0 },
        }
    }
}

pub fn validate_rating(rating: u8) -> Result<(), AppError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(AppError::Validation(format!(
            "Rating must be between {} and {}, got {}",
            MIN_RATING, MAX_RATING, rating
        )));
    }
    Ok(())
}

/// What the rating endpoints return: the aggregate, the derived average
/// and, when the caller is authenticated, their own current rating.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    pub total_rating_sum: i64,
    pub rating_count: i64,
    pub average_rating: Option<f64>,
    pub user_rating: Option<u8>,
}

impl RatingSummary {
    pub fn from_aggregate(aggregate: RatingAggregate, user_rating: Option<u8>) -> RatingSummary {
        RatingSummary {
            total_rating_sum: aggregate.total_rating_sum,
            rating_count: aggregate.rating_count,
            average_rating: aggregate.average(),
            user_rating,
        }
    }
}
