/// Default page size for paginated list endpoints
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum allowed page size
pub const MAX_PAGE_SIZE: i64 = 100;

/// Priority assumed when a record has none or an invalid one
pub const DEFAULT_PRIORITY: i32 = 5;

/// Sentinel owner id marking records owned by the marketplace itself
/// rather than a vendor
pub const ADMIN_OWNER_ID: &str = "admin";

/// Maximum category nesting depth (root -> sub -> nested sub)
pub const MAX_CATEGORY_DEPTH: usize = 3;
