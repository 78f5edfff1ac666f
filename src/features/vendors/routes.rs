use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::vendors::handlers;
use crate::features::vendors::services::VendorService;

/// Create routes for the vendors feature
pub fn routes(service: Arc<VendorService>) -> Router {
    Router::new()
        .route("/api/vendors", get(handlers::list_vendors))
        .route(
            "/api/vendors/owner-facet",
            get(handlers::product_owner_facet),
        )
        .with_state(service)
}
