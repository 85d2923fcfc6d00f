use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/instructors",
            post(handlers::instructor::create_instructor)
                .get(handlers::instructor::list_instructors),
        )
        .route(
            "/api/instructors/confirmed",
            post(handlers::instructor::create_instructor_confirmed),
        )
        .route(
            "/api/instructors/next-id",
            get(handlers::instructor::next_instructor_id),
        )
        .route(
            "/api/instructors/search",
            get(handlers::instructor::search_instructors),
        )
        .route(
            "/api/instructors/:id",
            get(handlers::instructor::get_instructor)
                .delete(handlers::instructor::delete_instructor),
        )
}
