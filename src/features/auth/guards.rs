//! Role-based authorization guards.
//!
//! The identity middleware places the validated `Actor` into request
//! extensions; these extractors pull it back out and enforce the required
//! capability tier.
//!
//! There are exactly two tiers:
//! - admin (main_admin or admin): sees and may modify everything
//! - vendor: scoped to records it owns
//!
//! List endpoints accept `MaybeActor` so an anonymous caller gets an empty
//! result set instead of a 401; mutations use `CurrentActor`/`RequireAdmin`.

use crate::core::error::AppError;
use crate::features::auth::model::Actor;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Extracts the authenticated actor, rejecting anonymous callers.
///
/// # Example
/// ```ignore
/// pub async fn handler(CurrentActor(actor): CurrentActor) { ... }
/// ```
pub struct CurrentActor(pub Actor);

impl<S> FromRequestParts<S> for CurrentActor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let actor = parts
            .extensions
            .get::<Actor>()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

        Ok(CurrentActor(actor.clone()))
    }
}

/// Extracts the actor if one is present; anonymous callers get `None`.
pub struct MaybeActor(pub Option<Actor>);

impl<S> FromRequestParts<S> for MaybeActor
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeActor(parts.extensions.get::<Actor>().cloned()))
    }
}

/// Guard for admin-tier operations (main_admin or admin role).
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(actor): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub Actor);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let actor = parts
            .extensions
            .get::<Actor>()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

        if !actor.is_admin() {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        Ok(RequireAdmin(actor.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{with_actor, TestActor};
    use axum::{routing::get, Json, Router};
    use axum_test::TestServer;

    async fn admin_only(RequireAdmin(actor): RequireAdmin) -> Json<Actor> {
        Json(actor)
    }

    async fn whoami(MaybeActor(actor): MaybeActor) -> Json<Option<Actor>> {
        Json(actor)
    }

    fn router() -> Router {
        Router::new()
            .route("/admin-only", get(admin_only))
            .route("/whoami", get(whoami))
    }

    #[tokio::test]
    async fn admin_guard_allows_admin() {
        let server = TestServer::new(with_actor(router(), TestActor::Admin)).unwrap();
        let response = server.get("/admin-only").await;
        response.assert_status_ok();
    }

    #[tokio::test]
    async fn admin_guard_rejects_vendor() {
        let server = TestServer::new(with_actor(router(), TestActor::Vendor)).unwrap();
        let response = server.get("/admin-only").await;
        response.assert_status_forbidden();
    }

    #[tokio::test]
    async fn admin_guard_rejects_anonymous() {
        let server = TestServer::new(router()).unwrap();
        let response = server.get("/admin-only").await;
        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn maybe_actor_passes_anonymous_through() {
        let server = TestServer::new(router()).unwrap();
        let response = server.get("/whoami").await;
        response.assert_status_ok();
        let body: Option<Actor> = response.json();
        assert!(body.is_none());
    }
}
