use std::sync::Arc;

use axum::{
    routing::{delete, post},
    Router,
};

use crate::features::notifications::handlers;
use crate::features::notifications::services::NotificationService;

/// Create routes for the notifications feature
pub fn routes(service: Arc<NotificationService>) -> Router {
    Router::new()
        .route(
            "/api/notifications",
            post(handlers::create_notification).get(handlers::list_notifications),
        )
        .route(
            "/api/notifications/{id}",
            delete(handlers::delete_notification),
        )
        .with_state(service)
}
