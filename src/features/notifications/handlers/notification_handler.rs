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
use crate::features::notifications::dtos::{CreateNotificationDto, NotificationResponseDto};
use crate::features::notifications::services::NotificationService;
use crate::shared::types::{ApiResponse, Meta};

/// List notifications visible to the caller, highest priority first
#[utoipa::path(
    get,
    path = "/api/notifications",
    responses(
        (status = 200, description = "List of notifications", body = ApiResponse<Vec<NotificationResponseDto>>)
    ),
    security(("bearer_auth" = [])),
    tag = "notifications"
)]
pub async fn list_notifications(
    State(service): State<Arc<NotificationService>>,
    MaybeActor(actor): MaybeActor,
) -> Result<Json<ApiResponse<Vec<NotificationResponseDto>>>> {
    let rows = service.list(actor.as_ref()).await?;
    let meta = Meta {
        total: rows.len() as i64,
    };
    Ok(Json(ApiResponse::success(Some(rows), None, Some(meta))))
}

/// Send a notification
#[utoipa::path(
    post,
    path = "/api/notifications",
    request_body = CreateNotificationDto,
    responses(
        (status = 200, description = "Notification sent", body = ApiResponse<NotificationResponseDto>),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "notifications"
)]
pub async fn create_notification(
    State(service): State<Arc<NotificationService>>,
    CurrentActor(actor): CurrentActor,
    AppJson(dto): AppJson<CreateNotificationDto>,
) -> Result<Json<ApiResponse<NotificationResponseDto>>> {
    dto.validate()?;
    let notification = service.create(&actor, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(notification),
        Some("Notification sent".to_string()),
        None,
    )))
}

/// Delete a notification
#[utoipa::path(
    delete,
    path = "/api/notifications/{id}",
    params(("id" = Uuid, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Notification deleted"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Notification not found")
    ),
    security(("bearer_auth" = [])),
    tag = "notifications"
)]
pub async fn delete_notification(
    State(service): State<Arc<NotificationService>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&actor, id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Notification deleted".to_string()),
        None,
    )))
}
