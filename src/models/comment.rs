use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Comments are kept per entity in a newest-first list, capped so a busy
/// story cannot grow one unbounded.
pub const MAX_COMMENTS_PER_ENTITY: usize = 200;
pub const MAX_COMMENT_LENGTH: usize = 2000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub user_id: Uuid,
    // Display cache, same caveat as Story::author_name.
    pub author_name: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Escapes HTML so stored comment bodies are safe to render verbatim.
pub fn sanitize_body(body: &str) -> String {
    html_escape::encode_text(body.trim()).into_owned()
}
