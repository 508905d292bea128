use uuid::Uuid;

use crate::models::rating::RatableKind;

pub struct RedisKey;

impl RedisKey {
    pub fn user(user_id: Uuid) -> String {
        format!("user:{user_id}")
    }

    pub fn username(username: &str) -> String {
        let username = username.to_lowercase();
        format!("username:{username}")
    }

    pub fn story(id: Uuid) -> String {
        format!("story:{id}")
    }

    pub fn story_slug(slug: &str) -> String {
        format!("story_slug:{slug}")
    }

    /// Sorted set of published story ids, scored by created_at.
    pub fn stories_published() -> String {
        "stories:published".into()
    }

    /// Sorted set of a story's chapter ids, scored by position.
    pub fn story_chapters(story_id: Uuid) -> String {
        format!("story:{story_id}:chapters")
    }

    pub fn chapter(id: Uuid) -> String {
        format!("chapter:{id}")
    }

    pub fn entity(kind: RatableKind, id: Uuid) -> String {
        match kind {
            RatableKind::Story => Self::story(id),
            RatableKind::Chapter => Self::chapter(id),
        }
    }

    pub fn rating(kind: RatableKind, entity_id: Uuid, user_id: Uuid) -> String {
        match kind {
            RatableKind::Story => format!("rating:story:{entity_id}:{user_id}"),
            RatableKind::Chapter => format!("rating:chapter:{entity_id}:{user_id}"),
        }
    }

    /// List of serialized comments, newest first.
    pub fn comments(kind: RatableKind, entity_id: Uuid) -> String {
        match kind {
            RatableKind::Story => format!("comments:story:{entity_id}"),
            RatableKind::Chapter => format!("comments:chapter:{entity_id}"),
        }
    }

    /// Set of story ids saved by a user.
    pub fn library(user_id: Uuid) -> String {
        format!("library:{user_id}")
    }
}
