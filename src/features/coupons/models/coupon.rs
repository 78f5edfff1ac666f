use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::policy::{Owned, Ranked};

/// How a coupon discounts an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "discount_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

/// Discount coupon with an activity window
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Coupon {
    pub id: Uuid,
    pub owner_id: Option<String>,
    /// Uppercase redemption code, unique across the marketplace
    pub code: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    #[schema(value_type = String, example = "15.00")]
    pub discount_value: Decimal,
    pub active_from: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub usage_limit: Option<i32>,
    pub used_count: i32,
    /// Manual kill switch, independent of the time window
    pub is_active: bool,
    pub priority: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Coupon {
    fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }
}

impl Ranked for Coupon {
    fn priority(&self) -> Option<i32> {
        self.priority
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
