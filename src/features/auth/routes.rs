use axum::{routing::get, Router};

use crate::features::auth::handlers;

pub fn routes() -> Router {
    Router::new().route("/api/auth/me", get(handlers::get_me))
}
