use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::Actor;
use crate::features::uploads::dtos::UploadResponseDto;
use crate::features::uploads::models::Upload;
use crate::modules::storage::MinIOClient;
use crate::shared::policy;

const COLUMNS: &str = "id, owner_id, file_key, url, content_type, file_size, created_at";

/// Service for image blob uploads.
///
/// Blobs live in the bucket, metadata lives in the `uploads` table. The
/// public URL is what record DTOs carry around.
pub struct UploadService {
    pool: PgPool,
    storage: Arc<MinIOClient>,
    max_upload_size: usize,
}

impl UploadService {
    pub fn new(pool: PgPool, storage: Arc<MinIOClient>, max_upload_size: usize) -> Self {
        Self {
            pool,
            storage,
            max_upload_size,
        }
    }

    /// Upload an image and record its metadata
    pub async fn upload_image(
        &self,
        actor: &Actor,
        data: Vec<u8>,
        file_name: &str,
        content_type: &str,
    ) -> Result<UploadResponseDto> {
        if !content_type.starts_with("image/") {
            return Err(AppError::BadRequest(format!(
                "Content type '{}' is not an image",
                content_type
            )));
        }

        if data.len() > self.max_upload_size {
            return Err(AppError::BadRequest(format!(
                "File too large. Maximum size is {} bytes",
                self.max_upload_size
            )));
        }

        if data.is_empty() {
            return Err(AppError::BadRequest("File is empty".to_string()));
        }

        let file_key = Self::object_key(file_name);
        self.storage.upload(&file_key, data.clone(), content_type).await?;
        let url = self.storage.public_url(&file_key);

        let query = format!(
            "INSERT INTO uploads (owner_id, file_key, url, content_type, file_size) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {}",
            COLUMNS
        );

        let upload = sqlx::query_as::<_, Upload>(&query)
            .bind(Some(actor.id.clone()))
            .bind(&file_key)
            .bind(&url)
            .bind(content_type)
            .bind(data.len() as i64)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to record upload: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!("Image uploaded: key={}, size={}", file_key, upload.file_size);

        Ok(UploadResponseDto {
            id: upload.id,
            url: upload.url,
            file_key: upload.file_key,
            content_type: upload.content_type,
            file_size: upload.file_size,
            created_at: upload.created_at,
        })
    }

    /// Delete an upload by its public URL. Owner or admin only.
    pub async fn delete_by_url(&self, actor: &Actor, url: &str) -> Result<()> {
        let key = self
            .storage
            .extract_key_from_url(url)
            .ok_or_else(|| AppError::BadRequest("URL does not point into storage".to_string()))?;

        let query = format!("SELECT {} FROM uploads WHERE file_key = $1", COLUMNS);
        let upload = sqlx::query_as::<_, Upload>(&query)
            .bind(&key)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound(format!("Upload '{}' not found", key)))?;

        if !policy::can_modify(Some(actor), &upload) {
            return Err(AppError::Forbidden(
                "You do not have permission to delete this upload".to_string(),
            ));
        }

        self.storage.delete(&key).await?;

        sqlx::query("DELETE FROM uploads WHERE id = $1")
            .bind(upload.id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        tracing::info!("Upload deleted: key={}", key);

        Ok(())
    }

    /// Bucket key: random prefix keeps uploads collision-free while the
    /// original extension survives for content sniffing
    fn object_key(file_name: &str) -> String {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()) && !ext.is_empty());

        match extension {
            Some(ext) => format!("images/{}.{}", Uuid::new_v4(), ext),
            None => format!("images/{}", Uuid::new_v4()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_key_keeps_clean_extension() {
        let key = UploadService::object_key("menu photo.JPG");
        assert!(key.starts_with("images/"));
        assert!(key.ends_with(".jpg"));
    }

    #[test]
    fn object_key_drops_suspicious_extension() {
        let key = UploadService::object_key("weird.name.");
        assert!(!key.contains(".."));
        assert!(key.starts_with("images/"));

        let no_ext = UploadService::object_key("README");
        assert!(no_ext.starts_with("images/"));
        assert!(!no_ext.contains('.'));
    }
}
