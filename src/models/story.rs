use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::rating::RatingAggregate;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub author_id: Uuid,
    // Display cache copied from the author record at creation time.
    // May go stale; the user record is the source of truth.
    pub author_name: String,
    pub cover_url: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[serde(flatten)]
    pub rating: RatingAggregate,
}

/// words lowercased and joined with '-', everything else stripped
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_dash = true;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.is_empty() { "story".into() } else { slug }
}
