use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::Actor;
use crate::features::sliders::dtos::{CreateSliderDto, SliderResponseDto, UpdateSliderDto};
use crate::features::sliders::models::CategorySlider;
use crate::shared::constants::ADMIN_OWNER_ID;
use crate::shared::policy;

const COLUMNS: &str =
    "id, owner_id, title, image_url, category_id, is_active, priority, created_at, updated_at";

/// Service for slider banner operations
pub struct SliderService {
    pool: PgPool,
}

impl SliderService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_all(&self) -> Result<Vec<CategorySlider>> {
        let query = format!("SELECT {} FROM category_sliders ORDER BY created_at", COLUMNS);
        sqlx::query_as::<_, CategorySlider>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch sliders: {:?}", e);
                AppError::Database(e)
            })
    }

    /// List sliders visible to the actor, highest priority first
    pub async fn list(&self, actor: Option<&Actor>) -> Result<Vec<SliderResponseDto>> {
        let mut visible = policy::visible_records(actor, self.fetch_all().await?);
        policy::sort_by_priority_then_recency(&mut visible);

        Ok(visible
            .into_iter()
            .map(|s| SliderResponseDto::from_model(s, actor))
            .collect())
    }

    /// Get a single slider visible to the actor
    pub async fn get_by_id(&self, actor: Option<&Actor>, id: Uuid) -> Result<SliderResponseDto> {
        let visible = policy::visible_records(actor, self.fetch_all().await?);

        visible
            .into_iter()
            .find(|s| s.id == id)
            .map(|s| SliderResponseDto::from_model(s, actor))
            .ok_or_else(|| AppError::NotFound(format!("Slider '{}' not found", id)))
    }

    pub async fn create(&self, actor: &Actor, dto: CreateSliderDto) -> Result<SliderResponseDto> {
        if let Some(category_id) = dto.category_id {
            self.ensure_category_visible(actor, category_id).await?;
        }

        let owner_id = if actor.is_admin() {
            Some(dto.owner_id.unwrap_or_else(|| ADMIN_OWNER_ID.to_string()))
        } else {
            Some(actor.id.clone())
        };

        let query = format!(
            "INSERT INTO category_sliders \
             (owner_id, title, image_url, category_id, is_active, priority) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {}",
            COLUMNS
        );

        let slider = sqlx::query_as::<_, CategorySlider>(&query)
            .bind(&owner_id)
            .bind(&dto.title)
            .bind(&dto.image_url)
            .bind(dto.category_id)
            .bind(dto.is_active)
            .bind(dto.priority)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create slider: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!("Slider created: id={}, title={}", slider.id, slider.title);

        Ok(SliderResponseDto::from_model(slider, Some(actor)))
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: Uuid,
        dto: UpdateSliderDto,
    ) -> Result<SliderResponseDto> {
        let all = self.fetch_all().await?;
        let existing = all
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Slider '{}' not found", id)))?;

        if !policy::can_modify(Some(actor), existing) {
            return Err(AppError::Forbidden(
                "You do not have permission to modify this slider".to_string(),
            ));
        }

        if let Some(category_id) = dto.category_id {
            self.ensure_category_visible(actor, category_id).await?;
        }

        let query = format!(
            "UPDATE category_sliders SET \
             title = COALESCE($2, title), \
             image_url = COALESCE($3, image_url), \
             category_id = COALESCE($4, category_id), \
             is_active = COALESCE($5, is_active), \
             priority = COALESCE($6, priority), \
             updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {}",
            COLUMNS
        );

        let slider = sqlx::query_as::<_, CategorySlider>(&query)
            .bind(id)
            .bind(&dto.title)
            .bind(&dto.image_url)
            .bind(dto.category_id)
            .bind(dto.is_active)
            .bind(dto.priority)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update slider: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(SliderResponseDto::from_model(slider, Some(actor)))
    }

    pub async fn delete(&self, actor: &Actor, id: Uuid) -> Result<()> {
        let all = self.fetch_all().await?;
        let target = all
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Slider '{}' not found", id)))?;

        if !policy::can_modify(Some(actor), target) {
            return Err(AppError::Forbidden(
                "You do not have permission to delete this slider".to_string(),
            ));
        }

        sqlx::query("DELETE FROM category_sliders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete slider: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!("Slider deleted: id={}", id);

        Ok(())
    }

    /// Linked categories must exist within the actor's visible scope
    async fn ensure_category_visible(&self, actor: &Actor, category_id: Uuid) -> Result<()> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)",
        )
        .bind(category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if !exists {
            return Err(AppError::Validation(format!(
                "Category '{}' does not exist",
                category_id
            )));
        }

        if !actor.is_admin() {
            let owner: Option<Option<String>> = sqlx::query_scalar(
                "SELECT owner_id FROM categories WHERE id = $1",
            )
            .bind(category_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

            let owned_by_actor = matches!(owner, Some(Some(ref o)) if *o == actor.id);
            if !owned_by_actor {
                return Err(AppError::Validation(format!(
                    "Category '{}' is not available to you",
                    category_id
                )));
            }
        }

        Ok(())
    }
}
