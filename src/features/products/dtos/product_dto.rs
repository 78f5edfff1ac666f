use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::auth::model::Actor;
use crate::features::products::models::{Product, ProductStatus};
use crate::shared::policy::{self, OfferType};

/// Request DTO for creating a product
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductDto {
    #[validate(length(min = 1, max = 150, message = "name must be 1-150 characters"))]
    pub name: String,

    #[validate(length(max = 1000, message = "description must be at most 1000 characters"))]
    pub description: Option<String>,

    pub image_url: Option<String>,

    /// Root category of the placement path
    pub category_id: Option<Uuid>,
    pub sub_category_id: Option<Uuid>,
    pub nested_sub_category_id: Option<Uuid>,

    #[schema(value_type = String, example = "12.50")]
    pub original_price: Decimal,

    #[schema(value_type = String, example = "9.99")]
    pub selling_price: Decimal,

    #[serde(default = "default_offer_type")]
    pub offer_type: OfferType,

    #[validate(range(min = 1, message = "buy_x must be positive"))]
    pub buy_x: Option<i32>,

    #[validate(range(min = 1, message = "get_y must be positive"))]
    pub get_y: Option<i32>,

    pub free_product_id: Option<Uuid>,

    #[serde(default = "default_is_available")]
    pub is_available: bool,

    #[validate(range(min = 0, max = 10, message = "priority must be 0-10"))]
    pub priority: Option<i32>,

    /// Owner vendor id; only honored for admin callers
    pub owner_id: Option<String>,
}

fn default_offer_type() -> OfferType {
    OfferType::None
}

fn default_is_available() -> bool {
    true
}

/// Request DTO for updating a product; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProductDto {
    #[validate(length(min = 1, max = 150, message = "name must be 1-150 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 1000, message = "description must be at most 1000 characters"))]
    pub description: Option<String>,

    pub image_url: Option<String>,

    pub category_id: Option<Uuid>,
    pub sub_category_id: Option<Uuid>,
    pub nested_sub_category_id: Option<Uuid>,

    #[schema(value_type = Option<String>, example = "12.50")]
    pub original_price: Option<Decimal>,

    #[schema(value_type = Option<String>, example = "9.99")]
    pub selling_price: Option<Decimal>,

    pub offer_type: Option<OfferType>,

    #[validate(range(min = 1, message = "buy_x must be positive"))]
    pub buy_x: Option<i32>,

    #[validate(range(min = 1, message = "get_y must be positive"))]
    pub get_y: Option<i32>,

    pub free_product_id: Option<Uuid>,

    pub is_available: Option<bool>,

    pub status: Option<ProductStatus>,

    #[validate(range(min = 0, max = 10, message = "priority must be 0-10"))]
    pub priority: Option<i32>,
}

/// Response DTO for a product listing row
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponseDto {
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
    pub free_product_id: Option<Uuid>,
    /// Display line for the offer, e.g. "Buy 2 Get 1 Free!"
    pub offer_text: String,
    pub is_available: bool,
    pub status: ProductStatus,
    pub priority: Option<i32>,
    pub created_at: DateTime<Utc>,
    /// Whether the current actor may edit/delete this row
    pub can_modify: bool,
}

impl ProductResponseDto {
    pub fn from_model(product: Product, actor: Option<&Actor>) -> Self {
        let can_modify = policy::can_modify(actor, &product);
        let offer_text =
            policy::resolve_offer_text(product.offer_type, product.buy_x, product.get_y);

        Self {
            id: product.id,
            owner_id: product.owner_id,
            name: product.name,
            description: product.description,
            image_url: product.image_url,
            category_id: product.category_id,
            sub_category_id: product.sub_category_id,
            nested_sub_category_id: product.nested_sub_category_id,
            original_price: product.original_price,
            selling_price: product.selling_price,
            offer_type: product.offer_type,
            buy_x: product.buy_x,
            get_y: product.get_y,
            free_product_id: product.free_product_id,
            offer_text,
            is_available: product.is_available,
            status: product.status,
            priority: product.priority,
            created_at: product.created_at,
            can_modify,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::ActorRole;

    fn product(offer: OfferType, buy_x: Option<i32>, get_y: Option<i32>) -> Product {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4(),
            owner_id: Some("v1".to_string()),
            name: "Margherita".to_string(),
            description: None,
            image_url: None,
            category_id: None,
            sub_category_id: None,
            nested_sub_category_id: None,
            original_price: Decimal::new(1250, 2),
            selling_price: Decimal::new(999, 2),
            offer_type: offer,
            buy_x,
            get_y,
            free_product_id: None,
            is_available: true,
            status: ProductStatus::Approved,
            priority: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn row_carries_offer_text() {
        let row = ProductResponseDto::from_model(product(OfferType::Bxgy, Some(2), Some(1)), None);
        assert_eq!(row.offer_text, "Buy 2 Get 1!");

        let row = ProductResponseDto::from_model(product(OfferType::None, None, None), None);
        assert_eq!(row.offer_text, "No offer");
    }

    #[test]
    fn owner_can_modify_own_row() {
        let vendor = Actor {
            id: "v1".to_string(),
            role: ActorRole::Vendor,
        };
        let row = ProductResponseDto::from_model(product(OfferType::None, None, None), Some(&vendor));
        assert!(row.can_modify);
    }
}
