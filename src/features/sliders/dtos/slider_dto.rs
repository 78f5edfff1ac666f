use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::auth::model::Actor;
use crate::features::sliders::models::CategorySlider;
use crate::shared::policy;

/// Request DTO for creating a slider banner
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSliderDto {
    #[validate(length(min = 1, max = 150, message = "title must be 1-150 characters"))]
    pub title: String,

    #[validate(url(message = "image_url must be a valid URL"))]
    pub image_url: String,

    /// Category the banner navigates to, if any
    pub category_id: Option<Uuid>,

    #[serde(default = "default_is_active")]
    pub is_active: bool,

    #[validate(range(min = 0, max = 10, message = "priority must be 0-10"))]
    pub priority: Option<i32>,

    /// Owner vendor id; only honored for admin callers
    pub owner_id: Option<String>,
}

fn default_is_active() -> bool {
    true
}

/// Request DTO for updating a slider; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSliderDto {
    #[validate(length(min = 1, max = 150, message = "title must be 1-150 characters"))]
    pub title: Option<String>,

    #[validate(url(message = "image_url must be a valid URL"))]
    pub image_url: Option<String>,

    pub category_id: Option<Uuid>,

    pub is_active: Option<bool>,

    #[validate(range(min = 0, max = 10, message = "priority must be 0-10"))]
    pub priority: Option<i32>,
}

/// Response DTO for a slider listing row
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SliderResponseDto {
    pub id: Uuid,
    pub owner_id: Option<String>,
    pub title: String,
    pub image_url: String,
    pub category_id: Option<Uuid>,
    pub is_active: bool,
    pub priority: Option<i32>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Whether the current actor may edit/delete this row
    pub can_modify: bool,
}

impl SliderResponseDto {
    pub fn from_model(slider: CategorySlider, actor: Option<&Actor>) -> Self {
        let can_modify = policy::can_modify(actor, &slider);

        Self {
            id: slider.id,
            owner_id: slider.owner_id,
            title: slider.title,
            image_url: slider.image_url,
            category_id: slider.category_id,
            is_active: slider.is_active,
            priority: slider.priority,
            created_at: slider.created_at,
            can_modify,
        }
    }
}
