pub mod delete;
pub mod get;
pub mod patch;
pub mod post;

pub use delete::delete_story;
pub use get::{get_published_stories, get_story_by_id, get_story_by_slug};
pub use patch::{StoryUpdate, update_story};
pub use post::create_story;
