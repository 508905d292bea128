pub mod get;
pub mod put;

pub use get::{get_rating_summary, get_user_rating};
pub use put::submit_rating;
