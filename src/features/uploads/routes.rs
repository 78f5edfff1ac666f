use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::uploads::handlers;
use crate::features::uploads::services::UploadService;

/// Create routes for the uploads feature
pub fn routes(service: Arc<UploadService>) -> Router {
    Router::new()
        .route(
            "/api/uploads",
            post(handlers::upload_image).delete(handlers::delete_upload),
        )
        .with_state(service)
}
