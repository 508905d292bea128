pub mod delete;
pub mod get;
pub mod post;

pub use delete::delete_comment;
pub use get::get_comments;
pub use post::post_comment;
