use chrono::{DateTime, Utc};
use std::collections::HashSet;
use uuid::Uuid;

use crate::features::auth::model::Actor;
use crate::shared::constants::DEFAULT_PRIORITY;

/// Record kinds that carry vendor ownership.
///
/// `None` marks unowned/legacy rows; those are visible to admins only.
pub trait Owned {
    fn owner_id(&self) -> Option<&str>;
}

/// Record kinds that nest (categories).
pub trait Nested {
    fn record_id(&self) -> Uuid;
    fn parent_id(&self) -> Option<Uuid>;
    /// Leaf flag: the record is not supposed to have children
    fn is_leaf(&self) -> bool;
}

/// Record kinds ordered by priority then recency (sliders, products).
pub trait Ranked {
    /// `None` means the record never got a priority; the default applies
    fn priority(&self) -> Option<i32>;
    fn created_at(&self) -> DateTime<Utc>;
}

/// Which of the given records may this actor see?
///
/// Admins see the whole marketplace, unowned/legacy rows included. Vendors
/// see exactly the rows they own. Anonymous callers see nothing.
pub fn visible_records<R: Owned>(actor: Option<&Actor>, records: Vec<R>) -> Vec<R> {
    match actor {
        None => Vec::new(),
        Some(a) if a.is_admin() => records,
        Some(a) => records
            .into_iter()
            .filter(|r| r.owner_id() == Some(a.id.as_str()))
            .collect(),
    }
}

/// May this actor mutate the record? Admin, or owner.
///
/// Gates edit/delete only; visibility is decided by `visible_records`.
pub fn can_modify<R: Owned>(actor: Option<&Actor>, record: &R) -> bool {
    match actor {
        None => false,
        Some(a) if a.is_admin() => true,
        Some(a) => record.owner_id() == Some(a.id.as_str()),
    }
}

/// Distinct owner ids across the records, in first-seen order, NULL excluded.
/// Feeds the vendor facet dropdown.
pub fn distinct_owners<R: Owned>(records: &[R]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut owners = Vec::new();
    for record in records {
        if let Some(owner) = record.owner_id() {
            if seen.insert(owner.to_string()) {
                owners.push(owner.to_string());
            }
        }
    }
    owners
}

/// Root records (no parent). One of the two single-level query modes.
pub fn roots<R: Nested>(records: Vec<R>) -> Vec<R> {
    records
        .into_iter()
        .filter(|r| r.parent_id().is_none())
        .collect()
}

/// Direct children of `parent`. The other single-level query mode; callers
/// walk the tree one level at a time.
pub fn children_of<R: Nested>(records: Vec<R>, parent: Uuid) -> Vec<R> {
    records
        .into_iter()
        .filter(|r| r.parent_id() == Some(parent))
        .collect()
}

/// Number of direct children of `parent`.
pub fn child_count<R: Nested>(records: &[R], parent: Uuid) -> usize {
    records
        .iter()
        .filter(|r| r.parent_id() == Some(parent))
        .count()
}

/// Should the record offer a "view children" affordance?
///
/// A leaf that nonetheless has children (earlier bug, race) stays navigable:
/// existing data wins over the leaf flag.
pub fn can_expand<R: Nested>(record: &R, records: &[R]) -> bool {
    !record.is_leaf() || child_count(records, record.record_id()) > 0
}

/// Stable sort: priority descending, then created_at descending.
///
/// Records with no priority sort as `DEFAULT_PRIORITY`. Full ties keep their
/// input order, which makes the result deterministic even though the store
/// gives no ordering guarantee.
pub fn sort_by_priority_then_recency<R: Ranked>(records: &mut [R]) {
    records.sort_by(|a, b| {
        let pa = a.priority().unwrap_or(DEFAULT_PRIORITY);
        let pb = b.priority().unwrap_or(DEFAULT_PRIORITY);
        pb.cmp(&pa).then_with(|| b.created_at().cmp(&a.created_at()))
    });
}

/// Is a coupon redeemable at `now`?
///
/// An inverted window (`active_from > expires_at`) evaluates to false for
/// every `now`, which is the intended handling of malformed coupons.
pub fn is_coupon_active(
    enabled: bool,
    active_from: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> bool {
    enabled && active_from <= now && now <= expires_at
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::ActorRole;
    use chrono::TimeZone;

    #[derive(Debug, Clone, PartialEq)]
    struct Rec {
        id: Uuid,
        owner: Option<String>,
        parent: Option<Uuid>,
        leaf: bool,
        priority: Option<i32>,
        created_at: DateTime<Utc>,
    }

    impl Owned for Rec {
        fn owner_id(&self) -> Option<&str> {
            self.owner.as_deref()
        }
    }

    impl Nested for Rec {
        fn record_id(&self) -> Uuid {
            self.id
        }
        fn parent_id(&self) -> Option<Uuid> {
            self.parent
        }
        fn is_leaf(&self) -> bool {
            self.leaf
        }
    }

    impl Ranked for Rec {
        fn priority(&self) -> Option<i32> {
            self.priority
        }
        fn created_at(&self) -> DateTime<Utc> {
            self.created_at
        }
    }

    fn rec(owner: Option<&str>) -> Rec {
        Rec {
            id: Uuid::new_v4(),
            owner: owner.map(|s| s.to_string()),
            parent: None,
            leaf: false,
            priority: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn admin() -> Actor {
        Actor {
            id: "admin-1".to_string(),
            role: ActorRole::Admin,
        }
    }

    fn main_admin() -> Actor {
        Actor {
            id: "root".to_string(),
            role: ActorRole::MainAdmin,
        }
    }

    fn vendor(id: &str) -> Actor {
        Actor {
            id: id.to_string(),
            role: ActorRole::Vendor,
        }
    }

    #[test]
    fn admins_see_everything_including_unowned() {
        let records = vec![rec(Some("v1")), rec(Some("v2")), rec(None), rec(Some("admin"))];

        for actor in [admin(), main_admin()] {
            let visible = visible_records(Some(&actor), records.clone());
            assert_eq!(visible.len(), 4);
        }
    }

    #[test]
    fn vendor_sees_exactly_own_records() {
        let mine = rec(Some("v1"));
        let records = vec![mine.clone(), rec(Some("v2")), rec(None)];

        let visible = visible_records(Some(&vendor("v1")), records);
        assert_eq!(visible, vec![mine]);
    }

    #[test]
    fn unowned_records_hidden_from_vendors() {
        let records = vec![rec(None), rec(None)];
        assert!(visible_records(Some(&vendor("v1")), records).is_empty());
    }

    #[test]
    fn anonymous_sees_nothing() {
        let records = vec![rec(Some("v1")), rec(None)];
        assert!(visible_records(None, records).is_empty());
    }

    #[test]
    fn visibility_is_idempotent() {
        let records = vec![rec(Some("v1")), rec(Some("v2")), rec(None)];
        let actor = vendor("v1");

        let once = visible_records(Some(&actor), records.clone());
        let twice = visible_records(Some(&actor), once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn can_modify_admin_or_owner_only() {
        let owned_by_v2 = rec(Some("v2"));
        let unowned = rec(None);

        assert!(can_modify(Some(&admin()), &owned_by_v2));
        assert!(can_modify(Some(&vendor("v2")), &owned_by_v2));
        assert!(!can_modify(Some(&vendor("v1")), &owned_by_v2));
        assert!(!can_modify(Some(&vendor("v1")), &unowned));
        assert!(!can_modify(None, &owned_by_v2));
    }

    #[test]
    fn distinct_owners_dedupes_and_skips_null() {
        let records = vec![rec(Some("a")), rec(Some("b")), rec(Some("a")), rec(None)];
        assert_eq!(distinct_owners(&records), vec!["a", "b"]);
    }

    #[test]
    fn roots_and_children_are_separate_modes() {
        let root = rec(Some("v1"));
        let mut child = rec(Some("v1"));
        child.parent = Some(root.id);
        let mut grandchild = rec(Some("v1"));
        grandchild.parent = Some(child.id);

        let all = vec![root.clone(), child.clone(), grandchild.clone()];

        let top = roots(all.clone());
        assert_eq!(top, vec![root.clone()]);

        // one level only: grandchild is not returned for root
        let under_root = children_of(all.clone(), root.id);
        assert_eq!(under_root, vec![child.clone()]);

        assert_eq!(child_count(&all, root.id), 1);
        assert_eq!(child_count(&all, child.id), 1);
        assert_eq!(child_count(&all, grandchild.id), 0);
    }

    #[test]
    fn child_count_matches_parent_exactly() {
        let parent = Uuid::new_v4();
        let other = Uuid::new_v4();
        let mut a = rec(None);
        a.parent = Some(parent);
        let mut b = rec(None);
        b.parent = Some(parent);
        let mut c = rec(None);
        c.parent = Some(other);

        assert_eq!(child_count(&[a, b, c], parent), 2);
    }

    #[test]
    fn leaf_with_children_is_still_navigable() {
        let mut leaf = rec(None);
        leaf.leaf = true;
        let mut child = rec(None);
        child.parent = Some(leaf.id);

        let records = vec![leaf.clone(), child];
        assert!(can_expand(&leaf, &records));

        let childless_leaf = Rec {
            leaf: true,
            ..rec(None)
        };
        assert!(!can_expand(&childless_leaf, &[childless_leaf.clone()]));
    }

    #[test]
    fn sort_orders_by_priority_then_recency() {
        let t1 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        let mut low_old = rec(None);
        low_old.priority = Some(1);
        low_old.created_at = t1;
        let mut high_old = rec(None);
        high_old.priority = Some(9);
        high_old.created_at = t1;
        let mut high_new = rec(None);
        high_new.priority = Some(9);
        high_new.created_at = t2;

        let mut records = vec![low_old.clone(), high_old.clone(), high_new.clone()];
        sort_by_priority_then_recency(&mut records);

        assert_eq!(records, vec![high_new, high_old, low_old]);
    }

    #[test]
    fn sort_defaults_missing_priority() {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut defaulted = rec(None);
        defaulted.priority = None;
        defaulted.created_at = t;
        let mut below_default = rec(None);
        below_default.priority = Some(3);
        below_default.created_at = t;
        let mut above_default = rec(None);
        above_default.priority = Some(7);
        above_default.created_at = t;

        let mut records = vec![below_default.clone(), defaulted.clone(), above_default.clone()];
        sort_by_priority_then_recency(&mut records);

        // None behaves as priority 5, landing between 7 and 3
        assert_eq!(records, vec![above_default, defaulted, below_default]);
    }

    #[test]
    fn sort_is_stable_on_full_ties() {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut first = rec(None);
        first.priority = Some(5);
        first.created_at = t;
        let mut second = rec(None);
        second.priority = Some(5);
        second.created_at = t;

        let mut records = vec![first.clone(), second.clone()];
        sort_by_priority_then_recency(&mut records);
        assert_eq!(records, vec![first, second]);
    }

    #[test]
    fn coupon_window_bounds_inclusive() {
        let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let until = Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap();
        let inside = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();

        assert!(is_coupon_active(true, from, until, inside));
        assert!(is_coupon_active(true, from, until, from));
        assert!(is_coupon_active(true, from, until, until));
        assert!(!is_coupon_active(true, from, until, after));
        assert!(!is_coupon_active(false, from, until, inside));
    }

    #[test]
    fn inverted_coupon_window_never_active() {
        let from = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let until = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        for now in [
            Utc.with_ymd_and_hms(2023, 12, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
        ] {
            assert!(!is_coupon_active(true, from, until, now));
        }
    }
}
