use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::Actor;
use crate::features::products::dtos::{CreateProductDto, ProductResponseDto, UpdateProductDto};
use crate::features::products::models::{Product, ProductStatus};
use crate::shared::constants::ADMIN_OWNER_ID;
use crate::shared::policy::{self, OfferType};
use crate::shared::types::PaginationQuery;

const COLUMNS: &str = "id, owner_id, name, description, image_url, category_id, sub_category_id, \
                       nested_sub_category_id, original_price, selling_price, offer_type, buy_x, \
                       get_y, free_product_id, is_available, status, priority, created_at, \
                       updated_at";

/// Service for product operations
pub struct ProductService {
    pool: PgPool,
}

impl ProductService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_all(&self) -> Result<Vec<Product>> {
        let query = format!("SELECT {} FROM products ORDER BY created_at", COLUMNS);
        sqlx::query_as::<_, Product>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch products: {:?}", e);
                AppError::Database(e)
            })
    }

    /// List a page of products visible to the actor, highest priority first.
    /// Returns the rows plus the total count before paging.
    pub async fn list(
        &self,
        actor: Option<&Actor>,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<ProductResponseDto>, i64)> {
        let mut visible = policy::visible_records(actor, self.fetch_all().await?);
        policy::sort_by_priority_then_recency(&mut visible);

        let total = visible.len() as i64;
        let rows = visible
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .map(|p| ProductResponseDto::from_model(p, actor))
            .collect();

        Ok((rows, total))
    }

    /// Distinct owner ids across products visible to the actor
    pub async fn owner_facet(&self, actor: Option<&Actor>) -> Result<Vec<String>> {
        let visible = policy::visible_records(actor, self.fetch_all().await?);
        Ok(policy::distinct_owners(&visible))
    }

    /// Get a single product visible to the actor
    pub async fn get_by_id(&self, actor: Option<&Actor>, id: Uuid) -> Result<ProductResponseDto> {
        let visible = policy::visible_records(actor, self.fetch_all().await?);

        visible
            .into_iter()
            .find(|p| p.id == id)
            .map(|p| ProductResponseDto::from_model(p, actor))
            .ok_or_else(|| AppError::NotFound(format!("Product '{}' not found", id)))
    }

    pub async fn create(&self, actor: &Actor, dto: CreateProductDto) -> Result<ProductResponseDto> {
        Self::check_prices(dto.original_price, dto.selling_price)?;
        Self::check_offer_fields(dto.offer_type, dto.buy_x, dto.get_y, dto.free_product_id)?;
        self.check_category_path(dto.category_id, dto.sub_category_id, dto.nested_sub_category_id)
            .await?;

        if let Some(free_id) = dto.free_product_id {
            self.ensure_product_exists(free_id).await?;
        }

        let owner_id = if actor.is_admin() {
            Some(dto.owner_id.unwrap_or_else(|| ADMIN_OWNER_ID.to_string()))
        } else {
            Some(actor.id.clone())
        };

        let query = format!(
            "INSERT INTO products \
             (owner_id, name, description, image_url, category_id, sub_category_id, \
              nested_sub_category_id, original_price, selling_price, offer_type, buy_x, get_y, \
              free_product_id, is_available, status, priority) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
             RETURNING {}",
            COLUMNS
        );

        let product = sqlx::query_as::<_, Product>(&query)
            .bind(&owner_id)
            .bind(&dto.name)
            .bind(&dto.description)
            .bind(&dto.image_url)
            .bind(dto.category_id)
            .bind(dto.sub_category_id)
            .bind(dto.nested_sub_category_id)
            .bind(dto.original_price)
            .bind(dto.selling_price)
            .bind(dto.offer_type)
            .bind(dto.buy_x)
            .bind(dto.get_y)
            .bind(dto.free_product_id)
            .bind(dto.is_available)
            .bind(ProductStatus::Pending)
            .bind(dto.priority)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create product: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!("Product created: id={}, name={}", product.id, product.name);

        Ok(ProductResponseDto::from_model(product, Some(actor)))
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: Uuid,
        dto: UpdateProductDto,
    ) -> Result<ProductResponseDto> {
        let all = self.fetch_all().await?;
        let existing = all
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Product '{}' not found", id)))?;

        if !policy::can_modify(Some(actor), existing) {
            return Err(AppError::Forbidden(
                "You do not have permission to modify this product".to_string(),
            ));
        }

        // Validate prices, offer fields and category path as they will be
        // after the patch
        let original = dto.original_price.unwrap_or(existing.original_price);
        let selling = dto.selling_price.unwrap_or(existing.selling_price);
        Self::check_prices(original, selling)?;

        let offer = dto.offer_type.unwrap_or(existing.offer_type);
        let buy_x = dto.buy_x.or(existing.buy_x);
        let get_y = dto.get_y.or(existing.get_y);
        let free_product_id = dto.free_product_id.or(existing.free_product_id);
        Self::check_offer_fields(offer, buy_x, get_y, free_product_id)?;

        let category_id = dto.category_id.or(existing.category_id);
        let sub_category_id = dto.sub_category_id.or(existing.sub_category_id);
        let nested_sub_category_id = dto
            .nested_sub_category_id
            .or(existing.nested_sub_category_id);
        self.check_category_path(category_id, sub_category_id, nested_sub_category_id)
            .await?;

        if let Some(free_id) = dto.free_product_id {
            self.ensure_product_exists(free_id).await?;
        }

        let query = format!(
            "UPDATE products SET \
             name = COALESCE($2, name), \
             description = COALESCE($3, description), \
             image_url = COALESCE($4, image_url), \
             category_id = COALESCE($5, category_id), \
             sub_category_id = COALESCE($6, sub_category_id), \
             nested_sub_category_id = COALESCE($7, nested_sub_category_id), \
             original_price = COALESCE($8, original_price), \
             selling_price = COALESCE($9, selling_price), \
             offer_type = COALESCE($10, offer_type), \
             buy_x = COALESCE($11, buy_x), \
             get_y = COALESCE($12, get_y), \
             free_product_id = COALESCE($13, free_product_id), \
             is_available = COALESCE($14, is_available), \
             status = COALESCE($15, status), \
             priority = COALESCE($16, priority), \
             updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {}",
            COLUMNS
        );

        let product = sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&dto.name)
            .bind(&dto.description)
            .bind(&dto.image_url)
            .bind(dto.category_id)
            .bind(dto.sub_category_id)
            .bind(dto.nested_sub_category_id)
            .bind(dto.original_price)
            .bind(dto.selling_price)
            .bind(dto.offer_type)
            .bind(dto.buy_x)
            .bind(dto.get_y)
            .bind(dto.free_product_id)
            .bind(dto.is_available)
            .bind(dto.status)
            .bind(dto.priority)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update product: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(ProductResponseDto::from_model(product, Some(actor)))
    }

    pub async fn delete(&self, actor: &Actor, id: Uuid) -> Result<()> {
        let all = self.fetch_all().await?;
        let target = all
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Product '{}' not found", id)))?;

        if !policy::can_modify(Some(actor), target) {
            return Err(AppError::Forbidden(
                "You do not have permission to delete this product".to_string(),
            ));
        }

        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete product: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!("Product deleted: id={}", id);

        Ok(())
    }

    fn check_prices(original: Decimal, selling: Decimal) -> Result<()> {
        if original < Decimal::ZERO || selling < Decimal::ZERO {
            return Err(AppError::Validation("Prices must not be negative".to_string()));
        }
        if selling > original {
            return Err(AppError::Validation(
                "selling_price must not exceed original_price".to_string(),
            ));
        }
        Ok(())
    }

    fn check_offer_fields(
        offer: OfferType,
        buy_x: Option<i32>,
        get_y: Option<i32>,
        free_product_id: Option<Uuid>,
    ) -> Result<()> {
        if offer.needs_quantities() && (buy_x.is_none() || get_y.is_none()) {
            return Err(AppError::Validation(format!(
                "Offer '{}' requires buy_x and get_y",
                offer
            )));
        }
        if offer.needs_free_product() && free_product_id.is_none() {
            return Err(AppError::Validation(format!(
                "Offer '{}' requires free_product_id",
                offer
            )));
        }
        Ok(())
    }

    /// The placement path must be filled top-down, each level a child of the
    /// one above
    async fn check_category_path(
        &self,
        category_id: Option<Uuid>,
        sub_category_id: Option<Uuid>,
        nested_sub_category_id: Option<Uuid>,
    ) -> Result<()> {
        if sub_category_id.is_some() && category_id.is_none() {
            return Err(AppError::Validation(
                "sub_category_id requires category_id".to_string(),
            ));
        }
        if nested_sub_category_id.is_some() && sub_category_id.is_none() {
            return Err(AppError::Validation(
                "nested_sub_category_id requires sub_category_id".to_string(),
            ));
        }

        if let Some(id) = category_id {
            self.ensure_category(id, None).await?;
        }
        if let Some(id) = sub_category_id {
            self.ensure_category(id, category_id).await?;
        }
        if let Some(id) = nested_sub_category_id {
            self.ensure_category(id, sub_category_id).await?;
        }

        Ok(())
    }

    async fn ensure_category(&self, id: Uuid, expected_parent: Option<Uuid>) -> Result<()> {
        let parent: Option<Option<Uuid>> =
            sqlx::query_scalar("SELECT parent_id FROM categories WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(AppError::Database)?;

        match parent {
            None => Err(AppError::Validation(format!(
                "Category '{}' does not exist",
                id
            ))),
            Some(actual_parent) if actual_parent != expected_parent => Err(AppError::Validation(
                format!("Category '{}' is not at the expected level", id),
            )),
            Some(_) => Ok(()),
        }
    }

    async fn ensure_product_exists(&self, id: Uuid) -> Result<()> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        if !exists {
            return Err(AppError::Validation(format!(
                "Free product '{}' does not exist",
                id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selling_above_original_is_rejected() {
        let err = ProductService::check_prices(Decimal::new(500, 2), Decimal::new(999, 2));
        assert!(matches!(err, Err(AppError::Validation(_))));

        assert!(ProductService::check_prices(Decimal::new(999, 2), Decimal::new(999, 2)).is_ok());
    }

    #[test]
    fn quantity_offers_require_both_quantities() {
        let err = ProductService::check_offer_fields(OfferType::Bxgy, Some(2), None, None);
        assert!(matches!(err, Err(AppError::Validation(_))));

        assert!(
            ProductService::check_offer_fields(OfferType::Bxgy, Some(2), Some(1), None).is_ok()
        );
    }

    #[test]
    fn free_offers_require_free_product() {
        let err = ProductService::check_offer_fields(OfferType::Bogof, None, None, None);
        assert!(matches!(err, Err(AppError::Validation(_))));

        let free = Some(Uuid::new_v4());
        assert!(ProductService::check_offer_fields(OfferType::Bogof, None, None, free).is_ok());
        assert!(
            ProductService::check_offer_fields(OfferType::Bxgyf, Some(3), Some(1), free).is_ok()
        );
    }

    #[test]
    fn plain_offers_need_nothing() {
        assert!(ProductService::check_offer_fields(OfferType::None, None, None, None).is_ok());
        assert!(ProductService::check_offer_fields(OfferType::Bogo, None, None, None).is_ok());
    }
}
