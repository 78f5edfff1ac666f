use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::{CurrentActor, MaybeActor};
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::services::CategoryService;
use crate::shared::types::{ApiResponse, Meta};

/// Query params for listing categories
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListCategoriesQuery {
    /// List children of this category; omit for root categories
    pub parent_id: Option<Uuid>,
}

/// Query params for deleting a category
#[derive(Debug, Deserialize, IntoParams)]
pub struct DeleteCategoryQuery {
    /// Delete the whole subtree. Without it, deletion is refused while
    /// descendants exist.
    #[serde(default)]
    pub cascade: bool,
}

/// List categories visible to the caller
///
/// Without `parent_id` returns root ("main") categories; with it, the direct
/// children of that node. Anonymous callers get an empty list.
#[utoipa::path(
    get,
    path = "/api/categories",
    params(ListCategoriesQuery),
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 404, description = "Parent category not found")
    ),
    security(("bearer_auth" = [])),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
    MaybeActor(actor): MaybeActor,
    Query(query): Query<ListCategoriesQuery>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let rows = match query.parent_id {
        Some(parent_id) => service.list_children(actor.as_ref(), parent_id).await?,
        None => service.list_roots(actor.as_ref()).await?,
    };

    let meta = Meta {
        total: rows.len() as i64,
    };
    Ok(Json(ApiResponse::success(Some(rows), None, Some(meta))))
}

/// Get a category by id
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(("id" = Uuid, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found")
    ),
    security(("bearer_auth" = [])),
    tag = "categories"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    MaybeActor(actor): MaybeActor,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.get_by_id(actor.as_ref(), id).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 200, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "categories"
)]
pub async fn create_category(
    State(service): State<Arc<CategoryService>>,
    CurrentActor(actor): CurrentActor,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    dto.validate()?;
    let category = service.create(&actor, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(category),
        Some("Category created".to_string()),
        None,
    )))
}

/// Update a category
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(("id" = Uuid, Path, description = "Category id")),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryResponseDto>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Category not found")
    ),
    security(("bearer_auth" = [])),
    tag = "categories"
)]
pub async fn update_category(
    State(service): State<Arc<CategoryService>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateCategoryDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    dto.validate()?;
    let category = service.update(&actor, id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(category),
        Some("Category updated".to_string()),
        None,
    )))
}

/// Delete a category
///
/// Deletion requires an explicit cascade decision: without `cascade=true`
/// the request is refused while the category still has descendants.
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category id"),
        DeleteCategoryQuery
    ),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category has descendants and cascade was not requested")
    ),
    security(("bearer_auth" = [])),
    tag = "categories"
)]
pub async fn delete_category(
    State(service): State<Arc<CategoryService>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<Uuid>,
    Query(query): Query<DeleteCategoryQuery>,
) -> Result<Json<ApiResponse<()>>> {
    let deleted = service.delete(&actor, id, query.cascade).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some(format!("Deleted {} category record(s)", deleted)),
        None,
    )))
}
