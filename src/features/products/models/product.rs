use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::policy::{OfferType, Owned, Ranked};

/// Moderation state of a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "product_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Pending,
    Approved,
    Rejected,
}

/// Menu item placed on a category path of up to three levels.
///
/// `category_id` is the root, `sub_category_id` and
/// `nested_sub_category_id` refine it. Deeper levels are only meaningful
/// when the level above is set.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub owner_id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category_id: Option<Uuid>,
    pub sub_category_id: Option<Uuid>,
    pub nested_sub_category_id: Option<Uuid>,
    #[schema(value_type = String, example = "12.50")]
    pub original_price: Decimal,
    #[schema(value_type = String, example = "9.99")]
    pub selling_price: Decimal,
    pub offer_type: OfferType,
    pub buy_x: Option<i32>,
    pub get_y: Option<i32>,
    /// Product granted for free by `bogof`/`bxgyf` offers
    pub free_product_id: Option<Uuid>,
    pub is_available: bool,
    pub status: ProductStatus,
    pub priority: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Product {
    fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }
}

impl Ranked for Product {
    fn priority(&self) -> Option<i32> {
        self.priority
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
