use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use availability_cell::router::availability_routes;
use availability_cell::SlotAggregator;

pub fn create_router(aggregator: Arc<SlotAggregator>) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic booking API is running!" }))
        .nest("/api", availability_routes(aggregator))
}
