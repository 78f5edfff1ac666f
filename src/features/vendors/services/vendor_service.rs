use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::Actor;
use crate::features::products::services::ProductService;
use crate::features::vendors::dtos::OwnerFacetDto;
use crate::features::vendors::models::Vendor;
use crate::shared::constants::ADMIN_OWNER_ID;

/// Service for vendor directory reads.
///
/// Vendor accounts are managed elsewhere; this service only lists them and
/// resolves owner ids to display names.
pub struct VendorService {
    pool: PgPool,
    products: Arc<ProductService>,
}

impl VendorService {
    pub fn new(pool: PgPool, products: Arc<ProductService>) -> Self {
        Self { pool, products }
    }

    /// Full vendor directory; admin only
    pub async fn list(&self, actor: &Actor) -> Result<Vec<Vendor>> {
        if !actor.is_admin() {
            return Err(AppError::Forbidden(
                "Only administrators may list vendors".to_string(),
            ));
        }

        sqlx::query_as::<_, Vendor>(
            "SELECT id, restaurant_name, email, status, created_at \
             FROM vendors ORDER BY restaurant_name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch vendors: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Distinct product owners within the actor's visible scope, resolved to
    /// display names. The marketplace sentinel resolves to "Admin"; owners
    /// with no matching vendor row fall back to their raw id.
    pub async fn product_owner_facet(&self, actor: Option<&Actor>) -> Result<Vec<OwnerFacetDto>> {
        let owner_ids = self.products.owner_facet(actor).await?;
        if owner_ids.is_empty() {
            return Ok(Vec::new());
        }

        let names: Vec<(String, String)> = sqlx::query_as(
            "SELECT id, restaurant_name FROM vendors WHERE id = ANY($1)",
        )
        .bind(&owner_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to resolve vendor names: {:?}", e);
            AppError::Database(e)
        })?;

        let by_id: HashMap<String, String> = names.into_iter().collect();

        Ok(owner_ids
            .into_iter()
            .map(|owner_id| {
                let display_name = if owner_id == ADMIN_OWNER_ID {
                    "Admin".to_string()
                } else {
                    by_id.get(&owner_id).cloned().unwrap_or_else(|| owner_id.clone())
                };
                OwnerFacetDto {
                    owner_id,
                    display_name,
                }
            })
            .collect())
    }
}
