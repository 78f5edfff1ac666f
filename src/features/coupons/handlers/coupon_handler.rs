use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::{CurrentActor, MaybeActor};
use crate::features::coupons::dtos::{CouponResponseDto, CreateCouponDto, UpdateCouponDto};
use crate::features::coupons::services::CouponService;
use crate::shared::types::{ApiResponse, Meta};

/// List coupons visible to the caller, highest priority first
#[utoipa::path(
    get,
    path = "/api/coupons",
    responses(
        (status = 200, description = "List of coupons", body = ApiResponse<Vec<CouponResponseDto>>)
    ),
    security(("bearer_auth" = [])),
    tag = "coupons"
)]
pub async fn list_coupons(
    State(service): State<Arc<CouponService>>,
    MaybeActor(actor): MaybeActor,
) -> Result<Json<ApiResponse<Vec<CouponResponseDto>>>> {
    let rows = service.list(actor.as_ref()).await?;
    let meta = Meta {
        total: rows.len() as i64,
    };
    Ok(Json(ApiResponse::success(Some(rows), None, Some(meta))))
}

/// Get a coupon by id
#[utoipa::path(
    get,
    path = "/api/coupons/{id}",
    params(("id" = Uuid, Path, description = "Coupon id")),
    responses(
        (status = 200, description = "Coupon found", body = ApiResponse<CouponResponseDto>),
        (status = 404, description = "Coupon not found")
    ),
    security(("bearer_auth" = [])),
    tag = "coupons"
)]
pub async fn get_coupon(
    State(service): State<Arc<CouponService>>,
    MaybeActor(actor): MaybeActor,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CouponResponseDto>>> {
    let coupon = service.get_by_id(actor.as_ref(), id).await?;
    Ok(Json(ApiResponse::success(Some(coupon), None, None)))
}

/// Create a coupon
///
/// The code is uppercased before validation and storage.
#[utoipa::path(
    post,
    path = "/api/coupons",
    request_body = CreateCouponDto,
    responses(
        (status = 200, description = "Coupon created", body = ApiResponse<CouponResponseDto>),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Not authenticated"),
        (status = 409, description = "Coupon code already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "coupons"
)]
pub async fn create_coupon(
    State(service): State<Arc<CouponService>>,
    CurrentActor(actor): CurrentActor,
    AppJson(dto): AppJson<CreateCouponDto>,
) -> Result<Json<ApiResponse<CouponResponseDto>>> {
    let dto = dto.normalize();
    dto.validate()?;
    let coupon = service.create(&actor, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(coupon),
        Some("Coupon created".to_string()),
        None,
    )))
}

/// Update a coupon
#[utoipa::path(
    put,
    path = "/api/coupons/{id}",
    params(("id" = Uuid, Path, description = "Coupon id")),
    request_body = UpdateCouponDto,
    responses(
        (status = 200, description = "Coupon updated", body = ApiResponse<CouponResponseDto>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Coupon not found")
    ),
    security(("bearer_auth" = [])),
    tag = "coupons"
)]
pub async fn update_coupon(
    State(service): State<Arc<CouponService>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateCouponDto>,
) -> Result<Json<ApiResponse<CouponResponseDto>>> {
    dto.validate()?;
    let coupon = service.update(&actor, id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(coupon),
        Some("Coupon updated".to_string()),
        None,
    )))
}

/// Delete a coupon
#[utoipa::path(
    delete,
    path = "/api/coupons/{id}",
    params(("id" = Uuid, Path, description = "Coupon id")),
    responses(
        (status = 200, description = "Coupon deleted"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Coupon not found")
    ),
    security(("bearer_auth" = [])),
    tag = "coupons"
)]
pub async fn delete_coupon(
    State(service): State<Arc<CouponService>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&actor, id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Coupon deleted".to_string()),
        None,
    )))
}
