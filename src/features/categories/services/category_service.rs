use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::Actor;
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::models::{Category, CategoryStatus};
use crate::shared::constants::{ADMIN_OWNER_ID, MAX_CATEGORY_DEPTH};
use crate::shared::policy;

const COLUMNS: &str = "id, owner_id, parent_id, name, image_url, is_main_category, is_last, \
                       food_type, status, priority, created_at, updated_at";

/// Service for category operations.
///
/// Fetches the collection, scopes it through `shared::policy`, and walks the
/// hierarchy one level at a time. All role decisions happen in the policy
/// layer, never in SQL.
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_all(&self) -> Result<Vec<Category>> {
        let query = format!("SELECT {} FROM categories ORDER BY created_at", COLUMNS);
        sqlx::query_as::<_, Category>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch categories: {:?}", e);
                AppError::Database(e)
            })
    }

    /// List root ("main") categories visible to the actor
    pub async fn list_roots(&self, actor: Option<&Actor>) -> Result<Vec<CategoryResponseDto>> {
        let visible = policy::visible_records(actor, self.fetch_all().await?);

        let rows = policy::roots(visible.clone())
            .into_iter()
            .map(|c| CategoryResponseDto::from_visible(c, actor, &visible))
            .collect();

        Ok(rows)
    }

    /// List direct children of `parent_id` visible to the actor.
    ///
    /// One level only; the caller walks the tree node by node.
    pub async fn list_children(
        &self,
        actor: Option<&Actor>,
        parent_id: Uuid,
    ) -> Result<Vec<CategoryResponseDto>> {
        let visible = policy::visible_records(actor, self.fetch_all().await?);

        if !visible.iter().any(|c| c.id == parent_id) {
            return Err(AppError::NotFound(format!(
                "Category '{}' not found",
                parent_id
            )));
        }

        let rows = policy::children_of(visible.clone(), parent_id)
            .into_iter()
            .map(|c| CategoryResponseDto::from_visible(c, actor, &visible))
            .collect();

        Ok(rows)
    }

    /// Get a single category visible to the actor
    pub async fn get_by_id(&self, actor: Option<&Actor>, id: Uuid) -> Result<CategoryResponseDto> {
        let visible = policy::visible_records(actor, self.fetch_all().await?);

        visible
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .map(|c| CategoryResponseDto::from_visible(c, actor, &visible))
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", id)))
    }

    /// Create a category.
    ///
    /// Rejects children under a leaf parent and nesting beyond three levels,
    /// so the leaf invariant holds by construction.
    pub async fn create(&self, actor: &Actor, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let all = self.fetch_all().await?;

        if let Some(parent_id) = dto.parent_id {
            let visible = policy::visible_records(Some(actor), all.clone());
            let parent = visible
                .iter()
                .find(|c| c.id == parent_id)
                .ok_or_else(|| {
                    AppError::NotFound(format!("Parent category '{}' not found", parent_id))
                })?;

            if parent.is_last {
                return Err(AppError::Validation(
                    "Cannot create a subcategory under a leaf category".to_string(),
                ));
            }

            let parent_depth = Self::depth_of(&all, parent_id);
            if parent_depth >= MAX_CATEGORY_DEPTH {
                return Err(AppError::Validation(format!(
                    "Category nesting is limited to {} levels",
                    MAX_CATEGORY_DEPTH
                )));
            }
        }

        // Vendors always own what they create; admins may assign an owner or
        // fall back to the marketplace sentinel.
        let owner_id = if actor.is_admin() {
            Some(dto.owner_id.unwrap_or_else(|| ADMIN_OWNER_ID.to_string()))
        } else {
            Some(actor.id.clone())
        };

        let is_main_category = dto.parent_id.is_none();
        // Food type only applies at the root
        let food_type = if is_main_category { dto.food_type } else { None };

        let query = format!(
            "INSERT INTO categories \
             (owner_id, parent_id, name, image_url, is_main_category, is_last, food_type, status, priority) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {}",
            COLUMNS
        );

        let category = sqlx::query_as::<_, Category>(&query)
            .bind(&owner_id)
            .bind(dto.parent_id)
            .bind(&dto.name)
            .bind(&dto.image_url)
            .bind(is_main_category)
            .bind(dto.is_last)
            .bind(food_type)
            .bind(CategoryStatus::Pending)
            .bind(dto.priority)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create category: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!(
            "Category created: id={}, name={}, owner={:?}",
            category.id,
            category.name,
            category.owner_id
        );

        let visible = policy::visible_records(Some(actor), self.fetch_all().await?);
        Ok(CategoryResponseDto::from_visible(
            category,
            Some(actor),
            &visible,
        ))
    }

    /// Update a category; absent fields are left unchanged
    pub async fn update(
        &self,
        actor: &Actor,
        id: Uuid,
        dto: UpdateCategoryDto,
    ) -> Result<CategoryResponseDto> {
        let all = self.fetch_all().await?;
        let existing = all
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", id)))?;

        if !policy::can_modify(Some(actor), existing) {
            return Err(AppError::Forbidden(
                "You do not have permission to modify this category".to_string(),
            ));
        }

        let query = format!(
            "UPDATE categories SET \
             name = COALESCE($2, name), \
             image_url = COALESCE($3, image_url), \
             is_last = COALESCE($4, is_last), \
             food_type = COALESCE($5, food_type), \
             status = COALESCE($6, status), \
             priority = COALESCE($7, priority), \
             updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {}",
            COLUMNS
        );

        let category = sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&dto.name)
            .bind(&dto.image_url)
            .bind(dto.is_last)
            .bind(dto.food_type)
            .bind(dto.status)
            .bind(dto.priority)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update category: {:?}", e);
                AppError::Database(e)
            })?;

        let visible = policy::visible_records(Some(actor), self.fetch_all().await?);
        Ok(CategoryResponseDto::from_visible(
            category,
            Some(actor),
            &visible,
        ))
    }

    /// Delete a category with an explicit cascade decision.
    ///
    /// `cascade = true` removes the whole subtree; `cascade = false` is
    /// refused with a conflict while descendants exist, so children are
    /// never silently orphaned. Returns the number of deleted records.
    pub async fn delete(&self, actor: &Actor, id: Uuid, cascade: bool) -> Result<u64> {
        let all = self.fetch_all().await?;
        let target = all
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", id)))?;

        if !policy::can_modify(Some(actor), target) {
            return Err(AppError::Forbidden(
                "You do not have permission to delete this category".to_string(),
            ));
        }

        let descendants = Self::descendant_ids(&all, id);
        if !cascade && !descendants.is_empty() {
            return Err(AppError::Conflict(format!(
                "Category has {} descendant(s); pass cascade=true to delete the subtree",
                descendants.len()
            )));
        }

        let mut ids = vec![id];
        ids.extend(descendants);

        let deleted = sqlx::query("DELETE FROM categories WHERE id = ANY($1)")
            .bind(&ids)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete category: {:?}", e);
                AppError::Database(e)
            })?
            .rows_affected();

        tracing::info!("Category deleted: id={}, cascade={}, removed={}", id, cascade, deleted);

        Ok(deleted)
    }

    /// Depth of a node counted from its root (root = 1). Walks the parent
    /// chain; a broken chain or cycle stops the walk.
    fn depth_of(all: &[Category], id: Uuid) -> usize {
        let mut depth = 0;
        let mut current = Some(id);
        while let Some(node_id) = current {
            depth += 1;
            if depth > MAX_CATEGORY_DEPTH {
                break;
            }
            current = all
                .iter()
                .find(|c| c.id == node_id)
                .and_then(|c| c.parent_id);
        }
        depth
    }

    /// All descendant ids of `id`, breadth-first, one level at a time
    fn descendant_ids(all: &[Category], id: Uuid) -> Vec<Uuid> {
        let mut found = Vec::new();
        let mut frontier = vec![id];
        while let Some(parent) = frontier.pop() {
            for child in all.iter().filter(|c| c.parent_id == Some(parent)) {
                found.push(child.id);
                frontier.push(child.id);
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::models::FoodType;
    use chrono::Utc;
    use fake::{faker::company::en::Buzzword, Fake};

    fn category(id: Uuid, parent: Option<Uuid>) -> Category {
        Category {
            id,
            owner_id: Some("v1".to_string()),
            parent_id: parent,
            name: Buzzword().fake::<&str>().to_string(),
            image_url: None,
            is_main_category: parent.is_none(),
            is_last: false,
            food_type: Some(FoodType::Veg),
            status: CategoryStatus::Approved,
            priority: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn depth_counts_from_root() {
        let root = Uuid::new_v4();
        let mid = Uuid::new_v4();
        let leaf = Uuid::new_v4();
        let all = vec![
            category(root, None),
            category(mid, Some(root)),
            category(leaf, Some(mid)),
        ];

        assert_eq!(CategoryService::depth_of(&all, root), 1);
        assert_eq!(CategoryService::depth_of(&all, mid), 2);
        assert_eq!(CategoryService::depth_of(&all, leaf), 3);
    }

    #[test]
    fn descendants_cover_all_levels() {
        let root = Uuid::new_v4();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let a1 = Uuid::new_v4();
        let all = vec![
            category(root, None),
            category(a, Some(root)),
            category(b, Some(root)),
            category(a1, Some(a)),
        ];

        let mut descendants = CategoryService::descendant_ids(&all, root);
        descendants.sort();
        let mut expected = vec![a, b, a1];
        expected.sort();
        assert_eq!(descendants, expected);

        assert!(CategoryService::descendant_ids(&all, a1).is_empty());
    }
}
