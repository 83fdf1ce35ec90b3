//! Self-lockout protection.
//!
//! A requester may never remove, through the manager, a membership they
//! currently hold if losing it would cost them access:
//!
//! - a superuser's own admin-group memberships, and
//! - the group that authorized this very session.
//!
//! Other users' rows and groups the requester does not hold are never locked.

use std::collections::BTreeSet;

use groupmgr_core::GroupName;

use crate::{Requester, UserRecord};

/// Whether the `(target, group)` checkbox must be disabled for `requester`.
pub fn is_locked(
    group: &GroupName,
    requester: &Requester,
    target: &UserRecord,
    admin_groups: &BTreeSet<GroupName>,
    authorizing_group: Option<&GroupName>,
) -> bool {
    if target.name != requester.name || !target.is_member(group) {
        return false;
    }

    if requester.is_superuser && admin_groups.contains(group) {
        return true;
    }

    authorizing_group.is_some_and(|g| g == group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn admin() -> BTreeSet<GroupName> {
        [GroupName::new("admin")].into_iter().collect()
    }

    #[test]
    fn superuser_cannot_leave_admin_group() {
        let r = Requester::new("root").with_groups(["admin"]).superuser();
        let me = UserRecord::new("root").with_groups(["admin"]);

        assert!(is_locked(&GroupName::new("admin"), &r, &me, &admin(), None));
    }

    #[test]
    fn authorizing_group_is_locked_for_non_superuser() {
        let r = Requester::new("alice").with_groups(["moderators"]);
        let me = UserRecord::new("alice").with_groups(["moderators"]);
        let g = GroupName::new("moderators");

        assert!(is_locked(&g, &r, &me, &admin(), Some(&g)));
    }

    #[test]
    fn other_held_groups_stay_unlocked() {
        let r = Requester::new("alice").with_groups(["moderators", "posters"]);
        let me = UserRecord::new("alice").with_groups(["moderators", "posters"]);
        let auth = GroupName::new("moderators");

        assert!(!is_locked(&GroupName::new("posters"), &r, &me, &admin(), Some(&auth)));
    }

    #[test]
    fn other_users_rows_are_never_locked() {
        let r = Requester::new("root").with_groups(["admin"]).superuser();
        let other = UserRecord::new("joe").with_groups(["admin"]);
        let g = GroupName::new("admin");

        assert!(!is_locked(&g, &r, &other, &admin(), Some(&g)));
    }

    #[test]
    fn unheld_group_is_never_locked() {
        let r = Requester::new("root").superuser();
        let me = UserRecord::new("root");
        let g = GroupName::new("admin");

        assert!(!is_locked(&g, &r, &me, &admin(), Some(&g)));
    }

    #[test]
    fn admin_group_is_not_locked_for_non_superuser_without_authorization_by_it() {
        let r = Requester::new("alice").with_groups(["admin"]);
        let me = UserRecord::new("alice").with_groups(["admin"]);

        assert!(!is_locked(&GroupName::new("admin"), &r, &me, &admin(), None));
    }

    proptest! {
        /// Property: a lock always concerns the requester's own row and a
        /// group they currently hold.
        #[test]
        fn locks_only_own_held_memberships(
            target in prop::sample::select(vec!["alice", "bob"]),
            held in prop::collection::btree_set(prop::sample::select(vec!["a", "b", "admin"]), 0..3),
            group in prop::sample::select(vec!["a", "b", "admin"]),
            auth in prop::option::of(prop::sample::select(vec!["a", "b", "admin"])),
            superuser in any::<bool>(),
        ) {
            let mut r = Requester::new("alice");
            r.is_superuser = superuser;
            let user = UserRecord::new(target).with_groups(held);
            let group = GroupName::new(group);
            let auth = auth.map(GroupName::new);

            if is_locked(&group, &r, &user, &admin(), auth.as_ref()) {
                prop_assert_eq!(user.name.as_str(), "alice");
                prop_assert!(user.is_member(&group));
            }
        }
    }
}
