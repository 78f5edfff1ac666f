use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Role carried by every authenticated actor.
///
/// `main_admin` and `admin` form a single capability tier: both see and may
/// modify the entire marketplace. `vendor` is scoped to its own records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    MainAdmin,
    Admin,
    Vendor,
}

/// The authenticated caller of an operation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Actor {
    /// Account id; for vendors this equals the vendor id records are owned by
    pub id: String,
    pub role: ActorRole,
}

impl Actor {
    /// Admin capability tier (main_admin or admin)
    pub fn is_admin(&self) -> bool {
        matches!(self.role, ActorRole::MainAdmin | ActorRole::Admin)
    }

    pub fn is_vendor(&self) -> bool {
        matches!(self.role, ActorRole::Vendor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_tiers_collapse() {
        let main_admin = Actor {
            id: "a1".to_string(),
            role: ActorRole::MainAdmin,
        };
        let admin = Actor {
            id: "a2".to_string(),
            role: ActorRole::Admin,
        };
        let vendor = Actor {
            id: "v1".to_string(),
            role: ActorRole::Vendor,
        };

        assert!(main_admin.is_admin());
        assert!(admin.is_admin());
        assert!(!vendor.is_admin());
        assert!(vendor.is_vendor());
    }

    #[test]
    fn role_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ActorRole::MainAdmin).unwrap(),
            "\"main_admin\""
        );
        assert_eq!(
            serde_json::to_string(&ActorRole::Vendor).unwrap(),
            "\"vendor\""
        );
    }
}
