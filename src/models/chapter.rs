use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::rating::RatingAggregate;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: Uuid,
    pub story_id: Uuid,
    pub position: u32,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[serde(flatten)]
    pub rating: RatingAggregate,
}

/// Chapter listing entry without the full content body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterSummary {
    pub id: Uuid,
    pub story_id: Uuid,
    pub position: u32,
    pub title: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}
