use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::policy::{Owned, Ranked};

/// Promotional slider banner, optionally linked to a category
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CategorySlider {
    pub id: Uuid,
    pub owner_id: Option<String>,
    pub title: String,
    pub image_url: String,
    /// Category the banner navigates to, if any
    pub category_id: Option<Uuid>,
    pub is_active: bool,
    pub priority: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for CategorySlider {
    fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }
}

impl Ranked for CategorySlider {
    fn priority(&self) -> Option<i32> {
        self.priority
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
