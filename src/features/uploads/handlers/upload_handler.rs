use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::debug;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::auth::guards::CurrentActor;
use crate::features::uploads::dtos::{DeleteUploadByUrlDto, UploadImageForm, UploadResponseDto};
use crate::features::uploads::services::UploadService;
use crate::shared::types::ApiResponse;

/// Upload an image
///
/// Accepts multipart/form-data with a single `file` field. Only image
/// content types are accepted.
#[utoipa::path(
    post,
    path = "/api/uploads",
    request_body(
        content = UploadImageForm,
        content_type = "multipart/form-data",
        description = "Image upload form"
    ),
    responses(
        (status = 201, description = "Image uploaded", body = ApiResponse<UploadResponseDto>),
        (status = 400, description = "Missing file, wrong content type or file too large"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "uploads"
)]
pub async fn upload_image(
    State(service): State<Arc<UploadService>>,
    CurrentActor(actor): CurrentActor,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<UploadResponseDto>>)> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut content_type: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        if field_name == "file" {
            let ct = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());
            let fname = field
                .file_name()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "unnamed".to_string());
            let data = field.bytes().await.map_err(|e| {
                debug!("Failed to read file bytes: {}", e);
                AppError::BadRequest(format!("Failed to read file data: {}", e))
            })?;

            file_data = Some(data.to_vec());
            file_name = Some(fname);
            content_type = Some(ct);
        } else {
            debug!("Ignoring unknown field: {}", field_name);
        }
    }

    let file_data =
        file_data.ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;
    let file_name =
        file_name.ok_or_else(|| AppError::BadRequest("Filename is required".to_string()))?;
    let content_type =
        content_type.ok_or_else(|| AppError::BadRequest("Content type is required".to_string()))?;

    let response = service
        .upload_image(&actor, file_data, &file_name, &content_type)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(response), None, None)),
    ))
}

/// Delete an upload by its public URL
///
/// Only the owner of the upload (or an admin) may delete it.
#[utoipa::path(
    delete,
    path = "/api/uploads",
    request_body = DeleteUploadByUrlDto,
    responses(
        (status = 200, description = "Upload deleted"),
        (status = 400, description = "Invalid URL"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Upload not found")
    ),
    security(("bearer_auth" = [])),
    tag = "uploads"
)]
pub async fn delete_upload(
    State(service): State<Arc<UploadService>>,
    CurrentActor(actor): CurrentActor,
    Json(dto): Json<DeleteUploadByUrlDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()?;
    service.delete_by_url(&actor, &dto.url).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Upload deleted".to_string()),
        None,
    )))
}
