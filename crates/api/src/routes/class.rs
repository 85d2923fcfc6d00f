use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/classes",
            post(handlers::class::create_class).get(handlers::class::list_classes),
        )
        .route(
            "/api/classes/override",
            post(handlers::class::create_class_override),
        )
        .route("/api/classes/next-id", get(handlers::class::next_class_id))
        .route(
            "/api/classes/:id",
            get(handlers::class::get_class).delete(handlers::class::delete_class),
        )
        .route("/api/schedule", get(handlers::class::get_schedule))
}
