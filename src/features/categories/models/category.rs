use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::policy::{Nested, Owned, Ranked};

/// Category moderation status matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "category_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CategoryStatus {
    Pending,
    Approved,
    Rejected,
}

/// Food type flag, only meaningful on root categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "food_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FoodType {
    Veg,
    NonVeg,
}

/// Database model for category
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: Uuid,
    /// Vendor id, the "admin" sentinel, or NULL for unowned/legacy rows
    pub owner_id: Option<String>,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub image_url: Option<String>,
    pub is_main_category: bool,
    /// Leaf flag: this category may not get children
    pub is_last: bool,
    pub food_type: Option<FoodType>,
    pub status: CategoryStatus,
    pub priority: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Category {
    fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }
}

impl Nested for Category {
    fn record_id(&self) -> Uuid {
        self.id
    }

    fn parent_id(&self) -> Option<Uuid> {
        self.parent_id
    }

    fn is_leaf(&self) -> bool {
        self.is_last
    }
}

impl Ranked for Category {
    fn priority(&self) -> Option<i32> {
        self.priority
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
