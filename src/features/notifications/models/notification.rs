use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::policy::{Owned, Ranked};

/// Announcement pushed to marketplace users
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Notification {
    pub id: Uuid,
    pub owner_id: Option<String>,
    pub title: String,
    pub body: String,
    pub image_url: Option<String>,
    pub priority: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Notification {
    fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }
}

impl Ranked for Notification {
    fn priority(&self) -> Option<i32> {
        self.priority
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
