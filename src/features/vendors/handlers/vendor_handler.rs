use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::auth::guards::{MaybeActor, RequireAdmin};
use crate::features::vendors::dtos::OwnerFacetDto;
use crate::features::vendors::models::Vendor;
use crate::features::vendors::services::VendorService;
use crate::shared::types::{ApiResponse, Meta};

/// List all vendors (admin only)
#[utoipa::path(
    get,
    path = "/api/vendors",
    responses(
        (status = 200, description = "Vendor directory", body = ApiResponse<Vec<Vendor>>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin access required")
    ),
    security(("bearer_auth" = [])),
    tag = "vendors"
)]
pub async fn list_vendors(
    State(service): State<Arc<VendorService>>,
    RequireAdmin(actor): RequireAdmin,
) -> Result<Json<ApiResponse<Vec<Vendor>>>> {
    let vendors = service.list(&actor).await?;
    let meta = Meta {
        total: vendors.len() as i64,
    };
    Ok(Json(ApiResponse::success(Some(vendors), None, Some(meta))))
}

/// Distinct product owners in the caller's scope, with display names
#[utoipa::path(
    get,
    path = "/api/vendors/owner-facet",
    responses(
        (status = 200, description = "Owner facet", body = ApiResponse<Vec<OwnerFacetDto>>)
    ),
    security(("bearer_auth" = [])),
    tag = "vendors"
)]
pub async fn product_owner_facet(
    State(service): State<Arc<VendorService>>,
    MaybeActor(actor): MaybeActor,
) -> Result<Json<ApiResponse<Vec<OwnerFacetDto>>>> {
    let owners = service.product_owner_facet(actor.as_ref()).await?;
    let meta = Meta {
        total: owners.len() as i64,
    };
    Ok(Json(ApiResponse::success(Some(owners), None, Some(meta))))
}
