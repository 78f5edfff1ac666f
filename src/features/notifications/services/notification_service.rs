use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::Actor;
use crate::features::notifications::dtos::{CreateNotificationDto, NotificationResponseDto};
use crate::features::notifications::models::Notification;
use crate::shared::constants::ADMIN_OWNER_ID;
use crate::shared::policy;

const COLUMNS: &str = "id, owner_id, title, body, image_url, priority, created_at, updated_at";

/// Service for notification operations.
///
/// Notifications are immutable once sent; the only mutation is deletion.
pub struct NotificationService {
    pool: PgPool,
}

impl NotificationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_all(&self) -> Result<Vec<Notification>> {
        let query = format!("SELECT {} FROM notifications ORDER BY created_at", COLUMNS);
        sqlx::query_as::<_, Notification>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch notifications: {:?}", e);
                AppError::Database(e)
            })
    }

    /// List notifications visible to the actor, highest priority first
    pub async fn list(&self, actor: Option<&Actor>) -> Result<Vec<NotificationResponseDto>> {
        let mut visible = policy::visible_records(actor, self.fetch_all().await?);
        policy::sort_by_priority_then_recency(&mut visible);

        Ok(visible
            .into_iter()
            .map(|n| NotificationResponseDto::from_model(n, actor))
            .collect())
    }

    pub async fn create(
        &self,
        actor: &Actor,
        dto: CreateNotificationDto,
    ) -> Result<NotificationResponseDto> {
        let owner_id = if actor.is_admin() {
            Some(dto.owner_id.unwrap_or_else(|| ADMIN_OWNER_ID.to_string()))
        } else {
            Some(actor.id.clone())
        };

        let query = format!(
            "INSERT INTO notifications (owner_id, title, body, image_url, priority) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {}",
            COLUMNS
        );

        let notification = sqlx::query_as::<_, Notification>(&query)
            .bind(&owner_id)
            .bind(&dto.title)
            .bind(&dto.body)
            .bind(&dto.image_url)
            .bind(dto.priority)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create notification: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!(
            "Notification created: id={}, title={}",
            notification.id,
            notification.title
        );

        Ok(NotificationResponseDto::from_model(notification, Some(actor)))
    }

    pub async fn delete(&self, actor: &Actor, id: Uuid) -> Result<()> {
        let all = self.fetch_all().await?;
        let target = all
            .iter()
            .find(|n| n.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Notification '{}' not found", id)))?;

        if !policy::can_modify(Some(actor), target) {
            return Err(AppError::Forbidden(
                "You do not have permission to delete this notification".to_string(),
            ));
        }

        sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete notification: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!("Notification deleted: id={}", id);

        Ok(())
    }
}
