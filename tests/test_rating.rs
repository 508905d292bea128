use bb8::Pool;
use bb8_redis::RedisConnectionManager;
use uuid::Uuid;

use katha_vault_be::db::rating::submit_rating;
use katha_vault_be::errors::AppError;
use katha_vault_be::models::rating::{
    MAX_RATING, MIN_RATING, RatableKind, RatingAggregate, RatingDelta, RatingSummary,
    validate_rating,
};

// Connections are created lazily, so submissions rejected before any store
// access can run against a pool pointing at a dead address.
fn dead_pool() -> Pool<RedisConnectionManager> {
    let manager =
        RedisConnectionManager::new("redis://127.0.0.1:1").expect("valid redis url");
    Pool::builder().build_unchecked(manager)
}

fn rate(aggregate: RatingAggregate, previous: Option<u8>, rating: u8) -> RatingAggregate {
    aggregate.apply(RatingDelta::new(previous, rating))
}

#[test]
fn test_first_rating_counts_once() {
    let delta = RatingDelta::new(None, 4);
    assert_eq!(delta.sum_diff, 4);
    assert_eq!(delta.count_delta, 1);
}

#[test]
fn test_re_rating_never_increments_count() {
    let delta = RatingDelta::new(Some(4), 5);
    assert_eq!(delta.sum_diff, 1);
    assert_eq!(delta.count_delta, 0);

    // Lowering a rating shifts the sum down.
    let delta = RatingDelta::new(Some(5), 2);
    assert_eq!(delta.sum_diff, -3);
    assert_eq!(delta.count_delta, 0);

    // Re-submitting the same value is a no-op on the aggregate.
    let delta = RatingDelta::new(Some(3), 3);
    assert_eq!(delta.sum_diff, 0);
    assert_eq!(delta.count_delta, 0);
}

#[test]
fn test_distinct_users_accumulate() {
    // n distinct users each rate once: count == n, sum == sum of ratings.
    let ratings = [5u8, 3, 1, 4, 4, 2, 5];
    let mut aggregate = RatingAggregate::default();
    for r in ratings {
        aggregate = rate(aggregate, None, r);
    }
    assert_eq!(aggregate.rating_count, ratings.len() as i64);
    assert_eq!(
        aggregate.total_rating_sum,
        ratings.iter().map(|&r| r as i64).sum::<i64>()
    );
}

#[test]
fn test_re_rating_adjusts_sum_by_difference() {
    let mut aggregate = RatingAggregate::default();
    aggregate = rate(aggregate, None, 2);
    let before = aggregate;

    aggregate = rate(aggregate, Some(2), 5);
    assert_eq!(aggregate.rating_count, before.rating_count);
    assert_eq!(aggregate.total_rating_sum, before.total_rating_sum + (5 - 2));
}

#[test]
fn test_two_user_scenario_with_re_rate() {
    let mut aggregate = RatingAggregate::default();
    assert_eq!(aggregate.average(), None);

    // User A rates 4.
    aggregate = rate(aggregate, None, 4);
    assert_eq!(aggregate.total_rating_sum, 4);
    assert_eq!(aggregate.rating_count, 1);
    assert_eq!(aggregate.average(), Some(4.0));

    // User B rates 2.
    aggregate = rate(aggregate, None, 2);
    assert_eq!(aggregate.total_rating_sum, 6);
    assert_eq!(aggregate.rating_count, 2);
    assert_eq!(aggregate.average(), Some(3.0));

    // User A re-rates 5.
    aggregate = rate(aggregate, Some(4), 5);
    assert_eq!(aggregate.total_rating_sum, 7);
    assert_eq!(aggregate.rating_count, 2);
    assert_eq!(aggregate.average(), Some(3.5));
}

#[test]
fn test_interleaving_order_does_not_matter() {
    // Two raters applied in either order land on the same aggregate.
    let start = RatingAggregate::default();

    let ab = rate(rate(start, None, 5), None, 2);
    let ba = rate(rate(start, None, 2), None, 5);

    assert_eq!(ab, ba);
    assert_eq!(ab.rating_count, 2);
    assert_eq!(ab.total_rating_sum, 7);
}

#[test]
fn test_rating_bounds() {
    assert!(validate_rating(MIN_RATING).is_ok());
    assert!(validate_rating(3).is_ok());
    assert!(validate_rating(MAX_RATING).is_ok());

    assert!(matches!(validate_rating(0), Err(AppError::Validation(_))));
    assert!(matches!(validate_rating(6), Err(AppError::Validation(_))));
    assert!(matches!(validate_rating(255), Err(AppError::Validation(_))));

    let err = validate_rating(6).unwrap_err();
    assert!(err.to_string().contains("between 1 and 5"));
}

#[test]
fn test_average_rounds_to_one_decimal() {
    let aggregate = RatingAggregate {
        total_rating_sum: 11,
        rating_count: 3,
    };
    // 11 / 3 = 3.666... -> 3.7
    assert_eq!(aggregate.average(), Some(3.7));

    let aggregate = RatingAggregate {
        total_rating_sum: 10,
        rating_count: 3,
    };
    // 10 / 3 = 3.333... -> 3.3
    assert_eq!(aggregate.average(), Some(3.3));
}

#[test]
fn test_average_undefined_without_ratings() {
    let aggregate = RatingAggregate::default();
    assert_eq!(aggregate.average(), None);

    let summary = RatingSummary::from_aggregate(aggregate, None);
    assert_eq!(summary.average_rating, None);
    assert_eq!(summary.rating_count, 0);
    assert_eq!(summary.total_rating_sum, 0);
}

#[tokio::test]
async fn test_submit_rejects_out_of_range_before_store_access() {
    let redis = dead_pool();
    let user_id = Uuid::new_v4();

    for bad in [0u8, 6, 100] {
        let err = submit_rating(
            RatableKind::Story,
            Uuid::new_v4(),
            user_id,
            user_id,
            bad,
            redis.clone(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "rating {bad}");
    }
}

#[tokio::test]
async fn test_submit_for_another_user_is_unauthorized() {
    let redis = dead_pool();

    let err = submit_rating(
        RatableKind::Chapter,
        Uuid::new_v4(),
        Uuid::new_v4(),
        Uuid::new_v4(),
        4,
        redis,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::Unauthorized(_)));
}

#[test]
fn test_summary_carries_user_rating() {
    let aggregate = RatingAggregate {
        total_rating_sum: 9,
        rating_count: 2,
    };
    let summary = RatingSummary::from_aggregate(aggregate, Some(5));
    assert_eq!(summary.average_rating, Some(4.5));
    assert_eq!(summary.user_rating, Some(5));
}
