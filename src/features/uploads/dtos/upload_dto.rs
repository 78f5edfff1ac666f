use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Multipart upload form (documentation only; parsing is manual)
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadImageForm {
    /// Image file content
    #[schema(value_type = String, format = Binary)]
    pub file: String,
}

/// Request DTO for deleting an upload by its public URL
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DeleteUploadByUrlDto {
    #[validate(url(message = "url must be a valid URL"))]
    pub url: String,
}

/// Response DTO for a completed upload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadResponseDto {
    pub id: Uuid,
    pub url: String,
    pub file_key: String,
    pub content_type: String,
    pub file_size: i64,
    pub created_at: DateTime<Utc>,
}
