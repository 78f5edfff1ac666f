use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::Actor;
use crate::features::coupons::dtos::{CouponResponseDto, CreateCouponDto, UpdateCouponDto};
use crate::features::coupons::models::Coupon;
use crate::shared::constants::ADMIN_OWNER_ID;
use crate::shared::policy;

const COLUMNS: &str = "id, owner_id, code, description, discount_type, discount_value, \
                       active_from, expires_at, usage_limit, used_count, is_active, priority, \
                       created_at, updated_at";

/// Service for coupon operations
pub struct CouponService {
    pool: PgPool,
}

impl CouponService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_all(&self) -> Result<Vec<Coupon>> {
        let query = format!("SELECT {} FROM coupons ORDER BY created_at", COLUMNS);
        sqlx::query_as::<_, Coupon>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch coupons: {:?}", e);
                AppError::Database(e)
            })
    }

    /// List coupons visible to the actor, highest priority first
    pub async fn list(&self, actor: Option<&Actor>) -> Result<Vec<CouponResponseDto>> {
        let mut visible = policy::visible_records(actor, self.fetch_all().await?);
        policy::sort_by_priority_then_recency(&mut visible);

        let now = Utc::now();
        Ok(visible
            .into_iter()
            .map(|c| CouponResponseDto::from_model(c, actor, now))
            .collect())
    }

    /// Get a single coupon visible to the actor
    pub async fn get_by_id(&self, actor: Option<&Actor>, id: Uuid) -> Result<CouponResponseDto> {
        let visible = policy::visible_records(actor, self.fetch_all().await?);

        visible
            .into_iter()
            .find(|c| c.id == id)
            .map(|c| CouponResponseDto::from_model(c, actor, Utc::now()))
            .ok_or_else(|| AppError::NotFound(format!("Coupon '{}' not found", id)))
    }

    pub async fn create(&self, actor: &Actor, dto: CreateCouponDto) -> Result<CouponResponseDto> {
        // An inverted window is stored as-is; `currently_active` simply
        // reports false for it.
        let owner_id = if actor.is_admin() {
            Some(dto.owner_id.clone().unwrap_or_else(|| ADMIN_OWNER_ID.to_string()))
        } else {
            Some(actor.id.clone())
        };

        let query = format!(
            "INSERT INTO coupons \
             (owner_id, code, description, discount_type, discount_value, active_from, \
              expires_at, usage_limit, is_active, priority) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {}",
            COLUMNS
        );

        let coupon = sqlx::query_as::<_, Coupon>(&query)
            .bind(&owner_id)
            .bind(&dto.code)
            .bind(&dto.description)
            .bind(dto.discount_type)
            .bind(dto.discount_value)
            .bind(dto.active_from)
            .bind(dto.expires_at)
            .bind(dto.usage_limit)
            .bind(dto.is_active)
            .bind(dto.priority)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    AppError::Conflict(format!("Coupon code '{}' already exists", dto.code))
                }
                _ => {
                    tracing::error!("Failed to create coupon: {:?}", e);
                    AppError::Database(e)
                }
            })?;

        tracing::info!("Coupon created: id={}, code={}", coupon.id, coupon.code);

        Ok(CouponResponseDto::from_model(coupon, Some(actor), Utc::now()))
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: Uuid,
        dto: UpdateCouponDto,
    ) -> Result<CouponResponseDto> {
        let all = self.fetch_all().await?;
        let existing = all
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Coupon '{}' not found", id)))?;

        if !policy::can_modify(Some(actor), existing) {
            return Err(AppError::Forbidden(
                "You do not have permission to modify this coupon".to_string(),
            ));
        }

        let query = format!(
            "UPDATE coupons SET \
             description = COALESCE($2, description), \
             discount_type = COALESCE($3, discount_type), \
             discount_value = COALESCE($4, discount_value), \
             active_from = COALESCE($5, active_from), \
             expires_at = COALESCE($6, expires_at), \
             usage_limit = COALESCE($7, usage_limit), \
             is_active = COALESCE($8, is_active), \
             priority = COALESCE($9, priority), \
             updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {}",
            COLUMNS
        );

        let coupon = sqlx::query_as::<_, Coupon>(&query)
            .bind(id)
            .bind(&dto.description)
            .bind(dto.discount_type)
            .bind(dto.discount_value)
            .bind(dto.active_from)
            .bind(dto.expires_at)
            .bind(dto.usage_limit)
            .bind(dto.is_active)
            .bind(dto.priority)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update coupon: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(CouponResponseDto::from_model(coupon, Some(actor), Utc::now()))
    }

    pub async fn delete(&self, actor: &Actor, id: Uuid) -> Result<()> {
        let all = self.fetch_all().await?;
        let target = all
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Coupon '{}' not found", id)))?;

        if !policy::can_modify(Some(actor), target) {
            return Err(AppError::Forbidden(
                "You do not have permission to delete this coupon".to_string(),
            ));
        }

        sqlx::query("DELETE FROM coupons WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete coupon: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!("Coupon deleted: id={}", id);

        Ok(())
    }
}
