use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Account state of a vendor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "vendor_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VendorStatus {
    Pending,
    Approved,
    Suspended,
}

/// Restaurant vendor account.
///
/// Vendor accounts are provisioned by the identity system; this service
/// only reads them. The id doubles as the `owner_id` on owned records.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Vendor {
    pub id: String,
    pub restaurant_name: String,
    pub email: String,
    pub status: VendorStatus,
    pub created_at: DateTime<Utc>,
}
