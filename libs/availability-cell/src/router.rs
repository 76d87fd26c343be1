use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use crate::handlers;
use crate::services::SlotAggregator;

pub fn availability_routes(aggregator: Arc<SlotAggregator>) -> Router {
    // Public: slot availability needs no authentication
    Router::new()
        .route("/available-slots", get(handlers::get_available_slots))
        .with_state(aggregator)
}
