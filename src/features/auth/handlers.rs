use axum::Json;

use crate::core::error::Result;
use crate::features::auth::guards::CurrentActor;
use crate::features::auth::model::Actor;
use crate::shared::types::ApiResponse;

/// Get the authenticated actor behind the current token
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current actor", body = ApiResponse<Actor>),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn get_me(CurrentActor(actor): CurrentActor) -> Result<Json<ApiResponse<Actor>>> {
    Ok(Json(ApiResponse::success(Some(actor), None, None)))
}
