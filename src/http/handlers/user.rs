use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    db::user::{
        get::{get_user_by_id, get_user_id_by_username},
        post::register_user,
    },
    models::{User, user::Role},
    state::AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserPayload {
    pub username: String,
    pub display_name: Option<String>,
}

pub async fn register_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterUserPayload>,
) -> Result<Json<String>, (StatusCode, String)> {
    // The single simulated admin account is picked by name via env.
    let admin_username = std::env::var("ADMIN_USERNAME").unwrap_or_default();
    let role = if !admin_username.is_empty()
        && payload.username.trim().eq_ignore_ascii_case(&admin_username)
    {
        Role::Admin
    } else {
        Role::Reader
    };

    match register_user(
        payload.username.clone(),
        payload.display_name,
        role,
        state.redis.clone(),
    )
    .await
    {
        Ok(token) => {
            tracing::info!("User registered with username: {}", payload.username);
            Ok(Json(token))
        }
        Err(err) => {
            tracing::error!("Error registering user: {}", err);
            Err(err.to_response())
        }
    }
}

pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<User>, (StatusCode, String)> {
    let user = get_user_by_id(user_id, state.redis.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error retrieving user: {}", e);
            e.to_response()
        })?;

    Ok(Json(user))
}

pub async fn get_user_by_username_handler(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<User>, (StatusCode, String)> {
    let user_id = get_user_id_by_username(&username, state.redis.clone())
        .await
        .map_err(|e| e.to_response())?;

    let user = get_user_by_id(user_id, state.redis.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error retrieving user '{}': {}", username, e);
            e.to_response()
        })?;

    Ok(Json(user))
}
