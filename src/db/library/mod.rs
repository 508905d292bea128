pub mod get;
pub mod put;

pub use get::get_library;
pub use put::{add_to_library, remove_from_library};
