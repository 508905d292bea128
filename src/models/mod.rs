pub mod chapter;
pub mod comment;
pub mod rating;
pub mod redis;
pub mod story;
pub mod user;

pub use user::User;
