use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::auth::model::Actor;
use crate::features::categories::models::{Category, CategoryStatus, FoodType};
use crate::shared::policy;

/// Request DTO for creating a category
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,

    /// Parent category; omit for a root ("main") category
    pub parent_id: Option<Uuid>,

    pub image_url: Option<String>,

    /// Marks the category as a leaf that may not get children
    #[serde(default)]
    pub is_last: bool,

    /// Only meaningful on root categories
    pub food_type: Option<FoodType>,

    #[validate(range(min = 0, max = 10, message = "priority must be 0-10"))]
    pub priority: Option<i32>,

    /// Owner vendor id; only honored for admin callers (vendors always own
    /// what they create)
    pub owner_id: Option<String>,
}

/// Request DTO for updating a category; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,

    pub image_url: Option<String>,

    pub is_last: Option<bool>,

    pub food_type: Option<FoodType>,

    pub status: Option<CategoryStatus>,

    #[validate(range(min = 0, max = 10, message = "priority must be 0-10"))]
    pub priority: Option<i32>,
}

/// Response DTO for a category listing row
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub owner_id: Option<String>,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub image_url: Option<String>,
    pub is_main_category: bool,
    pub is_last: bool,
    pub food_type: Option<FoodType>,
    pub status: CategoryStatus,
    pub priority: Option<i32>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Whether the current actor may edit/delete this row
    pub can_modify: bool,
    /// Whether a "view children" affordance should be shown
    pub can_expand: bool,
    pub child_count: i64,
}

impl CategoryResponseDto {
    /// Build a listing row, deriving the per-actor affordances from the
    /// actor's full visible set.
    pub fn from_visible(category: Category, actor: Option<&Actor>, visible: &[Category]) -> Self {
        let can_modify = policy::can_modify(actor, &category);
        let can_expand = policy::can_expand(&category, visible);
        let child_count = policy::child_count(visible, category.id) as i64;

        Self {
            id: category.id,
            owner_id: category.owner_id,
            parent_id: category.parent_id,
            name: category.name,
            image_url: category.image_url,
            is_main_category: category.is_main_category,
            is_last: category.is_last,
            food_type: category.food_type,
            status: category.status,
            priority: category.priority,
            created_at: category.created_at,
            can_modify,
            can_expand,
            child_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::ActorRole;
    use chrono::Utc;

    fn category(owner: Option<&str>, parent: Option<Uuid>, is_last: bool) -> Category {
        Category {
            id: Uuid::new_v4(),
            owner_id: owner.map(|s| s.to_string()),
            parent_id: parent,
            name: "Pizza".to_string(),
            image_url: None,
            is_main_category: parent.is_none(),
            is_last,
            food_type: None,
            status: CategoryStatus::Approved,
            priority: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn row_carries_actor_affordances() {
        let vendor = Actor {
            id: "v1".to_string(),
            role: ActorRole::Vendor,
        };
        let root = category(Some("v1"), None, false);
        let child = category(Some("v1"), Some(root.id), true);
        let visible = vec![root.clone(), child.clone()];

        let row = CategoryResponseDto::from_visible(root, Some(&vendor), &visible);
        assert!(row.can_modify);
        assert!(row.can_expand);
        assert_eq!(row.child_count, 1);

        // leaf without children: no expansion, still editable by owner
        let leaf_row = CategoryResponseDto::from_visible(child, Some(&vendor), &visible);
        assert!(leaf_row.can_modify);
        assert!(!leaf_row.can_expand);
        assert_eq!(leaf_row.child_count, 0);
    }
}
