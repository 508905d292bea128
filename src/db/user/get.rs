use chrono::{DateTime, Utc};
use redis::AsyncCommands;
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    db,
    errors::AppError,
    models::{User, redis::RedisKey, user::Role},
    state::RedisClient,
};

pub async fn get_user_by_id(user_id: Uuid, redis: RedisClient) -> Result<User, AppError> {
    let mut conn = db::connection(&redis).await?;

    let key = RedisKey::user(user_id);

    let data: HashMap<String, String> = conn
        .hgetall(&key)
        .await
        .map_err(AppError::RedisCommandError)?;

    if data.is_empty() {
        return Err(AppError::NotFound("User not found".into()));
    }

    let user = User {
        id: user_id,
        username: data.get("username").cloned().unwrap_or_default(),
        display_name: data.get("display_name").filter(|v| !v.is_empty()).cloned(),
        role: data
            .get("role")
            .map(|v| Role::parse(v))
            .unwrap_or(Role::Reader),
        created_at: data
            .get("created_at")
            .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_default(),
    };

    Ok(user)
}

pub async fn get_user_id_by_username(
    username: &str,
    redis: RedisClient,
) -> Result<Uuid, AppError> {
    let mut conn = db::connection(&redis).await?;

    let username_key = RedisKey::username(username);

    match conn.get::<_, Option<String>>(&username_key).await {
        Ok(Some(user_id_str)) => Uuid::parse_str(&user_id_str).map_err(|e| {
            AppError::Deserialization(format!("Invalid UUID from username lookup: {}", e))
        }),
        Ok(None) => Err(AppError::NotFound(format!(
            "User not found for username: {}",
            username
        ))),
        Err(e) => {
            tracing::error!("Error during username lookup for '{}': {}", username, e);
            Err(AppError::RedisCommandError(e))
        }
    }
}
