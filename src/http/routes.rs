use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::{http::handlers, state::AppState};

pub fn create_http_routes(state: AppState) -> Router {
    Router::new()
        .route("/users", post(handlers::register_user_handler))
        .route("/users/{user_id}", get(handlers::get_user_handler))
        .route(
            "/users/by-username/{username}",
            get(handlers::get_user_by_username_handler),
        )
        .route(
            "/stories",
            get(handlers::list_stories_handler).post(handlers::create_story_handler),
        )
        .route(
            "/stories/{id_or_slug}",
            get(handlers::get_story_handler)
                .patch(handlers::update_story_handler)
                .delete(handlers::delete_story_handler),
        )
        .route(
            "/stories/{story_id}/chapters",
            get(handlers::list_chapters_handler).post(handlers::create_chapter_handler),
        )
        .route(
            "/chapters/{chapter_id}",
            get(handlers::get_chapter_handler)
                .patch(handlers::update_chapter_handler)
                .delete(handlers::delete_chapter_handler),
        )
        .route(
            "/stories/{story_id}/rating",
            put(handlers::rate_story_handler).get(handlers::get_story_rating_handler),
        )
        .route(
            "/chapters/{chapter_id}/rating",
            put(handlers::rate_chapter_handler).get(handlers::get_chapter_rating_handler),
        )
        .route(
            "/stories/{story_id}/comments",
            get(handlers::list_story_comments_handler).post(handlers::post_story_comment_handler),
        )
        .route(
            "/stories/{story_id}/comments/{comment_id}",
            delete(handlers::delete_story_comment_handler),
        )
        .route(
            "/chapters/{chapter_id}/comments",
            get(handlers::list_chapter_comments_handler)
                .post(handlers::post_chapter_comment_handler),
        )
        .route(
            "/chapters/{chapter_id}/comments/{comment_id}",
            delete(handlers::delete_chapter_comment_handler),
        )
        .route("/library", get(handlers::get_library_handler))
        .route(
            "/library/{story_id}",
            put(handlers::add_to_library_handler).delete(handlers::remove_from_library_handler),
        )
        .with_state(state)
}
