#[cfg(test)]
use crate::features::auth::model::{Actor, ActorRole};

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

/// Actor presets for router tests
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub enum TestActor {
    MainAdmin,
    Admin,
    Vendor,
}

#[cfg(test)]
pub fn create_test_actor(kind: TestActor) -> Actor {
    match kind {
        TestActor::MainAdmin => Actor {
            id: "test-main-admin".to_string(),
            role: ActorRole::MainAdmin,
        },
        TestActor::Admin => Actor {
            id: "test-admin".to_string(),
            role: ActorRole::Admin,
        },
        TestActor::Vendor => Actor {
            id: "test-vendor".to_string(),
            role: ActorRole::Vendor,
        },
    }
}

/// Wrap a router with middleware that injects the given actor, standing in
/// for the identity middleware in tests.
#[cfg(test)]
pub fn with_actor(router: Router, kind: TestActor) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| async move {
            request.extensions_mut().insert(create_test_actor(kind));
            let response: Response = next.run(request).await;
            response
        },
    ))
}
