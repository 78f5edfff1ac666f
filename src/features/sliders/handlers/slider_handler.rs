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
use crate::features::sliders::dtos::{CreateSliderDto, SliderResponseDto, UpdateSliderDto};
use crate::features::sliders::services::SliderService;
use crate::shared::types::{ApiResponse, Meta};

/// List slider banners visible to the caller, highest priority first
#[utoipa::path(
    get,
    path = "/api/sliders",
    responses(
        (status = 200, description = "List of sliders", body = ApiResponse<Vec<SliderResponseDto>>)
    ),
    security(("bearer_auth" = [])),
    tag = "sliders"
)]
pub async fn list_sliders(
    State(service): State<Arc<SliderService>>,
    MaybeActor(actor): MaybeActor,
) -> Result<Json<ApiResponse<Vec<SliderResponseDto>>>> {
    let rows = service.list(actor.as_ref()).await?;
    let meta = Meta {
        total: rows.len() as i64,
    };
    Ok(Json(ApiResponse::success(Some(rows), None, Some(meta))))
}

/// Get a slider by id
#[utoipa::path(
    get,
    path = "/api/sliders/{id}",
    params(("id" = Uuid, Path, description = "Slider id")),
    responses(
        (status = 200, description = "Slider found", body = ApiResponse<SliderResponseDto>),
        (status = 404, description = "Slider not found")
    ),
    security(("bearer_auth" = [])),
    tag = "sliders"
)]
pub async fn get_slider(
    State(service): State<Arc<SliderService>>,
    MaybeActor(actor): MaybeActor,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SliderResponseDto>>> {
    let slider = service.get_by_id(actor.as_ref(), id).await?;
    Ok(Json(ApiResponse::success(Some(slider), None, None)))
}

/// Create a slider banner
#[utoipa::path(
    post,
    path = "/api/sliders",
    request_body = CreateSliderDto,
    responses(
        (status = 200, description = "Slider created", body = ApiResponse<SliderResponseDto>),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "sliders"
)]
pub async fn create_slider(
    State(service): State<Arc<SliderService>>,
    CurrentActor(actor): CurrentActor,
    AppJson(dto): AppJson<CreateSliderDto>,
) -> Result<Json<ApiResponse<SliderResponseDto>>> {
    dto.validate()?;
    let slider = service.create(&actor, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(slider),
        Some("Slider created".to_string()),
        None,
    )))
}

/// Update a slider banner
#[utoipa::path(
    put,
    path = "/api/sliders/{id}",
    params(("id" = Uuid, Path, description = "Slider id")),
    request_body = UpdateSliderDto,
    responses(
        (status = 200, description = "Slider updated", body = ApiResponse<SliderResponseDto>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Slider not found")
    ),
    security(("bearer_auth" = [])),
    tag = "sliders"
)]
pub async fn update_slider(
    State(service): State<Arc<SliderService>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateSliderDto>,
) -> Result<Json<ApiResponse<SliderResponseDto>>> {
    dto.validate()?;
    let slider = service.update(&actor, id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(slider),
        Some("Slider updated".to_string()),
        None,
    )))
}

/// Delete a slider banner
#[utoipa::path(
    delete,
    path = "/api/sliders/{id}",
    params(("id" = Uuid, Path, description = "Slider id")),
    responses(
        (status = 200, description = "Slider deleted"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Slider not found")
    ),
    security(("bearer_auth" = [])),
    tag = "sliders"
)]
pub async fn delete_slider(
    State(service): State<Arc<SliderService>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&actor, id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Slider deleted".to_string()),
        None,
    )))
}
