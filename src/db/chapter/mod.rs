pub mod delete;
pub mod get;
pub mod patch;
pub mod post;

pub use delete::delete_chapter;
pub use get::{get_chapter_by_id, get_story_chapters};
pub use patch::{ChapterUpdate, update_chapter};
pub use post::create_chapter;
