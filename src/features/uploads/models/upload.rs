use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::policy::Owned;

/// Metadata row for an uploaded image blob
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Upload {
    pub id: Uuid,
    pub owner_id: Option<String>,
    /// Object key inside the bucket
    pub file_key: String,
    /// Public URL embedded on records
    pub url: String,
    pub content_type: String,
    pub file_size: i64,
    pub created_at: DateTime<Utc>,
}

impl Owned for Upload {
    fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }
}
