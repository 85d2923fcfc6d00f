use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/customers",
            post(handlers::customer::create_customer).get(handlers::customer::list_customers),
        )
        .route(
            "/api/customers/confirmed",
            post(handlers::customer::create_customer_confirmed),
        )
        .route(
            "/api/customers/next-id",
            get(handlers::customer::next_customer_id),
        )
        .route(
            "/api/customers/search",
            get(handlers::customer::search_customers),
        )
        .route(
            "/api/customers/:id",
            get(handlers::customer::get_customer).delete(handlers::customer::delete_customer),
        )
}
