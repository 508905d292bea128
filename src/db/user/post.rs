use chrono::Utc;
use redis::AsyncCommands;
use uuid::Uuid;

use crate::{
    auth::generate_jwt,
    db,
    errors::AppError,
    models::{User, redis::RedisKey, user::Role},
    state::RedisClient,
};

/// Registers a user and returns a signed token. Registering an existing
/// username signs the caller back in as that user (the simulated auth
/// provider has no passwords).
pub async fn register_user(
    username: String,
    display_name: Option<String>,
    role: Role,
    redis: RedisClient,
) -> Result<String, AppError> {
    let username = username.trim().to_lowercase();
    if username.is_empty() || !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(AppError::Validation(
            "Username must be non-empty and alphanumeric".into(),
        ));
    }

    let mut conn = db::connection(&redis).await?;

    let username_key = RedisKey::username(&username);
    let existing_id: Option<String> = conn
        .get(&username_key)
        .await
        .map_err(AppError::RedisCommandError)?;

    if let Some(existing_id) = existing_id {
        let user_id = Uuid::parse_str(&existing_id)
            .map_err(|e| AppError::Deserialization(format!("Invalid stored user id: {e}")))?;
        drop(conn);
        let user = db::user::get_user_by_id(user_id, redis).await?;
        return generate_jwt(&user);
    }

    let user = User {
        id: Uuid::new_v4(),
        username: username.clone(),
        display_name,
        role,
        created_at: Utc::now(),
    };

    let fields = [
        ("username", user.username.clone()),
        ("display_name", user.display_name.clone().unwrap_or_default()),
        ("role", user.role.as_str().to_string()),
        ("created_at", user.created_at.to_rfc3339()),
    ];

    let _: () = redis::pipe()
        .hset_multiple(RedisKey::user(user.id), &fields)
        .ignore()
        .set(&username_key, user.id.to_string())
        .ignore()
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    tracing::info!("Registered user {} ('{}')", user.id, user.username);

    generate_jwt(&user)
}
