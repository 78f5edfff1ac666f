use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::auth::model::Actor;
use crate::features::coupons::models::{Coupon, DiscountType};
use crate::shared::policy;
use crate::shared::validation::COUPON_CODE_REGEX;

/// Request DTO for creating a coupon
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCouponDto {
    /// Redemption code; normalized to uppercase before validation
    #[validate(regex(
        path = *COUPON_CODE_REGEX,
        message = "code must be 3-20 uppercase letters or digits"
    ))]
    pub code: String,

    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<String>,

    pub discount_type: DiscountType,

    #[schema(value_type = String, example = "15.00")]
    pub discount_value: Decimal,

    pub active_from: DateTime<Utc>,

    pub expires_at: DateTime<Utc>,

    #[validate(range(min = 1, message = "usage_limit must be positive"))]
    pub usage_limit: Option<i32>,

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

impl CreateCouponDto {
    /// Codes are stored and compared uppercase
    pub fn normalize(mut self) -> Self {
        self.code = self.code.trim().to_uppercase();
        self
    }
}

/// Request DTO for updating a coupon; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCouponDto {
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<String>,

    pub discount_type: Option<DiscountType>,

    #[schema(value_type = Option<String>, example = "20.00")]
    pub discount_value: Option<Decimal>,

    pub active_from: Option<DateTime<Utc>>,

    pub expires_at: Option<DateTime<Utc>>,

    #[validate(range(min = 1, message = "usage_limit must be positive"))]
    pub usage_limit: Option<i32>,

    pub is_active: Option<bool>,

    #[validate(range(min = 0, max = 10, message = "priority must be 0-10"))]
    pub priority: Option<i32>,
}

/// Response DTO for a coupon listing row
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CouponResponseDto {
    pub id: Uuid,
    pub owner_id: Option<String>,
    pub code: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    #[schema(value_type = String, example = "15.00")]
    pub discount_value: Decimal,
    pub active_from: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub usage_limit: Option<i32>,
    pub used_count: i32,
    pub is_active: bool,
    /// Whether the coupon is redeemable right now (enabled and inside its window)
    pub currently_active: bool,
    pub priority: Option<i32>,
    pub created_at: DateTime<Utc>,
    /// Whether the current actor may edit/delete this row
    pub can_modify: bool,
}

impl CouponResponseDto {
    pub fn from_model(coupon: Coupon, actor: Option<&Actor>, now: DateTime<Utc>) -> Self {
        let can_modify = policy::can_modify(actor, &coupon);
        let currently_active = policy::is_coupon_active(
            coupon.is_active,
            coupon.active_from,
            coupon.expires_at,
            now,
        );

        Self {
            id: coupon.id,
            owner_id: coupon.owner_id,
            code: coupon.code,
            description: coupon.description,
            discount_type: coupon.discount_type,
            discount_value: coupon.discount_value,
            active_from: coupon.active_from,
            expires_at: coupon.expires_at,
            usage_limit: coupon.usage_limit,
            used_count: coupon.used_count,
            is_active: coupon.is_active,
            currently_active,
            priority: coupon.priority,
            created_at: coupon.created_at,
            can_modify,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn coupon(active: bool, from_offset: i64, to_offset: i64) -> Coupon {
        let now = Utc::now();
        Coupon {
            id: Uuid::new_v4(),
            owner_id: Some("v1".to_string()),
            code: "SAVE10".to_string(),
            description: None,
            discount_type: DiscountType::Percentage,
            discount_value: Decimal::new(1000, 2),
            active_from: now + Duration::hours(from_offset),
            expires_at: now + Duration::hours(to_offset),
            usage_limit: None,
            used_count: 0,
            is_active: active,
            priority: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn currently_active_respects_window_and_switch() {
        let now = Utc::now();

        let live = CouponResponseDto::from_model(coupon(true, -1, 1), None, now);
        assert!(live.currently_active);

        let disabled = CouponResponseDto::from_model(coupon(false, -1, 1), None, now);
        assert!(!disabled.currently_active);

        let expired = CouponResponseDto::from_model(coupon(true, -3, -1), None, now);
        assert!(!expired.currently_active);
    }

    #[test]
    fn normalize_uppercases_code() {
        let dto = CreateCouponDto {
            code: " save10 ".to_string(),
            description: None,
            discount_type: DiscountType::Fixed,
            discount_value: Decimal::new(500, 2),
            active_from: Utc::now(),
            expires_at: Utc::now(),
            usage_limit: None,
            is_active: true,
            priority: None,
            owner_id: None,
        };
        assert_eq!(dto.normalize().code, "SAVE10");
    }
}
