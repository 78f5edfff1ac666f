//! Role-scoped visibility and hierarchy policy.
//!
//! Every role/ownership decision in the admin API goes through this module.
//! The functions are pure and total: no I/O, no hidden state, defaults
//! instead of errors for malformed field values. Services fetch records,
//! hand them here together with the (possibly anonymous) actor, and render
//! what comes back.

pub mod offers;
pub mod visibility;

pub use offers::{resolve_offer_text, OfferType};
pub use visibility::{
    can_expand, can_modify, child_count, children_of, distinct_owners, is_coupon_active,
    roots, sort_by_priority_then_recency, visible_records, Nested, Owned, Ranked,
};
