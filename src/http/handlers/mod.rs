pub mod chapter;
pub mod comment;
pub mod library;
pub mod rating;
pub mod story;
pub mod user;

pub use chapter::{
    create_chapter_handler, delete_chapter_handler, get_chapter_handler, list_chapters_handler,
    update_chapter_handler,
};
pub use comment::{
    delete_chapter_comment_handler, delete_story_comment_handler, list_chapter_comments_handler,
    list_story_comments_handler, post_chapter_comment_handler, post_story_comment_handler,
};
pub use library::{add_to_library_handler, get_library_handler, remove_from_library_handler};
pub use rating::{
    get_chapter_rating_handler, get_story_rating_handler, rate_chapter_handler, rate_story_handler,
};
pub use story::{
    create_story_handler, delete_story_handler, get_story_handler, list_stories_handler,
    update_story_handler,
};
pub use user::{get_user_by_username_handler, get_user_handler, register_user_handler};
