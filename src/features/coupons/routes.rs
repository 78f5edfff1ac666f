use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::coupons::handlers;
use crate::features::coupons::services::CouponService;

/// Create routes for the coupons feature
pub fn routes(service: Arc<CouponService>) -> Router {
    Router::new()
        .route(
            "/api/coupons",
            post(handlers::create_coupon).get(handlers::list_coupons),
        )
        .route(
            "/api/coupons/{id}",
            get(handlers::get_coupon)
                .put(handlers::update_coupon)
                .delete(handlers::delete_coupon),
        )
        .with_state(service)
}
