use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::auth::model::Actor;
use crate::features::notifications::models::Notification;
use crate::shared::policy;

/// Request DTO for creating a notification
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateNotificationDto {
    #[validate(length(min = 1, max = 150, message = "title must be 1-150 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 2000, message = "body must be 1-2000 characters"))]
    pub body: String,

    pub image_url: Option<String>,

    #[validate(range(min = 0, max = 10, message = "priority must be 0-10"))]
    pub priority: Option<i32>,

    /// Owner vendor id; only honored for admin callers
    pub owner_id: Option<String>,
}

/// Response DTO for a notification listing row
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotificationResponseDto {
    pub id: Uuid,
    pub owner_id: Option<String>,
    pub title: String,
    pub body: String,
    pub image_url: Option<String>,
    pub priority: Option<i32>,
    pub created_at: DateTime<Utc>,
    /// Whether the current actor may delete this row
    pub can_modify: bool,
}

impl NotificationResponseDto {
    pub fn from_model(notification: Notification, actor: Option<&Actor>) -> Self {
        let can_modify = policy::can_modify(actor, &notification);

        Self {
            id: notification.id,
            owner_id: notification.owner_id,
            title: notification.title,
            body: notification.body,
            image_url: notification.image_url,
            priority: notification.priority,
            created_at: notification.created_at,
            can_modify,
        }
    }
}
