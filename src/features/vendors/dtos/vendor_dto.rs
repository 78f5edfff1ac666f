use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One entry of the product owner facet
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OwnerFacetDto {
    /// Owner id as stored on product rows
    pub owner_id: String,
    /// Restaurant name, or "Admin" for marketplace-owned records
    pub display_name: String,
}
